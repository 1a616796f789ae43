//! Type definitions for the proxy module

use crate::search::SearchError;
use axum::extract::rejection::{BytesRejection, QueryRejection};
use axum::http::StatusCode;
use nutype::nutype;
use thiserror::Error;
use uuid::Uuid;

// ========== Credential Types ==========

/// Bearer token presented to the downstream API
#[nutype(
    sanitize(trim),
    validate(not_empty),
    derive(Clone, PartialEq, Eq, AsRef, TryFrom)
)]
pub struct BearerToken(String);

/// Session credential presented by a UI client
#[nutype(
    sanitize(trim),
    validate(not_empty),
    derive(Clone, Hash, PartialEq, Eq, AsRef, TryFrom)
)]
pub struct SessionToken(String);

// ========== Path and URL Types ==========

/// Path that bypasses session authentication
#[nutype(
    validate(predicate = |s: &str| s.starts_with('/')),
    derive(Clone, Debug, Display, Hash, PartialEq, Eq, AsRef, TryFrom)
)]
pub struct BypassPath(String);

/// Absolute base URL of a downstream service
#[nutype(
    sanitize(trim),
    validate(predicate = |s: &str| s.starts_with("http://") || s.starts_with("https://")),
    derive(Clone, Debug, Display, PartialEq, Eq, AsRef, TryFrom, Serialize, Deserialize)
)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Join a downstream path onto this base
    pub fn join(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.as_ref().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Request ID for correlating log lines of one inbound call
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Accept a client supplied ID when it is a well formed UUID
    pub fn parse(value: &str) -> Option<Self> {
        Uuid::parse_str(value).ok().map(Self)
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors that can occur while handling a forwarded request
#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Access token unavailable: {0}")]
    TokenUnavailable(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("Downstream responded with {status}: {body}")]
    Upstream { status: StatusCode, body: String },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<SearchError> for ProxyError {
    fn from(err: SearchError) -> Self {
        ProxyError::BadRequest(err.to_string())
    }
}

impl From<QueryRejection> for ProxyError {
    fn from(rejection: QueryRejection) -> Self {
        ProxyError::BadRequest(rejection.body_text())
    }
}

impl From<BytesRejection> for ProxyError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ProxyError::PayloadTooLarge(rejection.body_text())
        } else {
            ProxyError::BadRequest(rejection.body_text())
        }
    }
}

/// Result type for proxy operations
pub type ProxyResult<T> = Result<T, ProxyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_join_handles_slashes() {
        let base = BaseUrl::try_new("https://api.decke.test/".to_string()).unwrap();
        assert_eq!(
            base.join("/v1/businesses"),
            "https://api.decke.test/v1/businesses"
        );
        assert_eq!(base.join("v1"), "https://api.decke.test/v1");
    }

    #[test]
    fn base_url_requires_scheme() {
        assert!(BaseUrl::try_new("api.decke.test".to_string()).is_err());
    }

    #[test]
    fn blank_tokens_are_rejected() {
        assert!(BearerToken::try_new("   ".to_string()).is_err());
        assert!(SessionToken::try_new(String::new()).is_err());
    }

    #[test]
    fn request_id_parses_uuids_only() {
        let id = RequestId::new();
        assert_eq!(RequestId::parse(&id.to_string()), Some(id));
        assert_eq!(RequestId::parse("not-a-uuid"), None);
    }

    #[test]
    fn search_errors_become_bad_requests() {
        let error = ProxyError::from(SearchError::InvalidPage);
        assert!(matches!(error, ProxyError::BadRequest(msg) if msg == "page must be at least 1"));
    }
}
