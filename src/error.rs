use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShrinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory walk error: {0}")]
    WalkdirError(#[from] walkdir::Error),

    #[error("Entry path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed response from compression service (status {status}): {reason}")]
    MalformedResponse { status: u16, reason: String },

    #[error("Compression rejected by service: {message}")]
    Rejected { error: String, message: String },

    #[error("Invalid artifact URL '{0}': {1}")]
    InvalidUrl(String, url::ParseError),

    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ShrinkError>;
