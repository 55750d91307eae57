//! Outbound request identity for the submit call.
//!
//! Rotation only lowers the odds of the remote service throttling a single
//! fingerprint. It has no bearing on correctness and is off unless asked for.

use crate::config::IdentityMode;
use crate::constants::{CRATE_USER_AGENT, REQUEST_TOKEN_HEADER, USER_AGENTS};
use rand::Rng;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CACHE_CONTROL, USER_AGENT};
use std::net::Ipv4Addr;
use uuid::Uuid;

const FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity {
    pub user_agent: &'static str,
    pub forwarded_for: Option<Ipv4Addr>,
    pub request_token: Option<String>,
}

impl ClientIdentity {
    pub fn for_mode(mode: IdentityMode) -> Self {
        match mode {
            IdentityMode::Fixed => Self::fixed(),
            IdentityMode::Rotating => Self::random(),
        }
    }

    pub fn fixed() -> Self {
        Self {
            user_agent: CRATE_USER_AGENT,
            forwarded_for: None,
            request_token: None,
        }
    }

    pub fn random() -> Self {
        let mut rng = rand::rng();
        let user_agent = USER_AGENTS[rng.random_range(0..USER_AGENTS.len())];
        let forwarded_for = Ipv4Addr::new(
            rng.random_range(1..=254),
            rng.random_range(1..=254),
            rng.random_range(1..=254),
            rng.random_range(1..=254),
        );

        Self {
            user_agent,
            forwarded_for: Some(forwarded_for),
            request_token: Some(Uuid::new_v4().to_string()),
        }
    }

    /// Headers attached to one submit request. Always carries the user agent
    /// and a no-cache directive.
    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(self.user_agent));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        if let Some(addr) = self.forwarded_for {
            if let Ok(value) = HeaderValue::from_str(&addr.to_string()) {
                headers.insert(FORWARDED_FOR, value);
            }
        }
        if let Some(token) = &self.request_token {
            if let Ok(value) = HeaderValue::from_str(token) {
                headers.insert(REQUEST_TOKEN_HEADER, value);
            }
        }

        headers
    }
}
