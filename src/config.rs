use crate::constants::{
    ALLOWED_EXTENSIONS, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT, MAX_FILE_SIZE, MIN_FILE_SIZE,
};
use crate::error::{Result, ShrinkError};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// What gets selected for a run. Built once at startup and never mutated.
///
/// The extension allow-list and the size bounds are dictated by the remote
/// service, so only the root and the recursion flag are caller supplied.
#[derive(Debug, Clone)]
pub struct Configuration {
    root: PathBuf,
    recursive: bool,
}

impl Configuration {
    pub fn new(root: impl Into<PathBuf>, recursive: bool) -> Self {
        Self {
            root: root.into(),
            recursive,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn recursive(&self) -> bool {
        self.recursive
    }

    pub fn extensions(&self) -> &'static [&'static str] {
        ALLOWED_EXTENSIONS
    }

    pub fn min_size(&self) -> u64 {
        MIN_FILE_SIZE
    }

    pub fn max_size(&self) -> u64 {
        MAX_FILE_SIZE
    }

    /// Human readable lines describing the run, one per setting.
    pub fn describe(&self) -> Vec<String> {
        vec![
            format!("entry folder: {}", self.root.display()),
            format!("recursive: {}", self.recursive),
            format!("extensions: .{}", self.extensions().join(", .")),
            format!("min size: {} bytes", self.min_size()),
            format!("max size: {} bytes", self.max_size()),
        ]
    }
}

/// How each submit request presents itself to the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentityMode {
    /// A stable crate user agent and no forwarded-for or token headers.
    #[default]
    Fixed,
    /// A fresh browser user agent, forwarded-for address and token per request.
    Rotating,
}

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub endpoint: Url,
    pub timeout: Duration,
    pub identity: IdentityMode,
    pub accept_invalid_certs: bool,
}

impl ClientOptions {
    pub fn new(
        endpoint: Option<&str>,
        timeout_secs: Option<u64>,
        identity: IdentityMode,
        accept_invalid_certs: bool,
    ) -> Result<Self> {
        let raw = endpoint.unwrap_or(DEFAULT_ENDPOINT);
        let endpoint = Url::parse(raw).map_err(|e| ShrinkError::InvalidUrl(raw.to_string(), e))?;

        let timeout = match timeout_secs {
            Some(0) => {
                return Err(ShrinkError::InvalidConfig(
                    "timeout must be at least one second".to_string(),
                ))
            }
            Some(secs) => Duration::from_secs(secs),
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            endpoint,
            timeout,
            identity,
            accept_invalid_certs,
        })
    }
}

/// Validates a concurrency cap. `None` keeps fan-out unbounded.
pub fn validate_concurrency(concurrency: Option<usize>) -> Result<Option<usize>> {
    match concurrency {
        Some(0) => Err(ShrinkError::InvalidConfig(
            "concurrency must be at least 1".to_string(),
        )),
        other => Ok(other),
    }
}
