//! HTTP header constants and well-known paths
//!
//! Header names, content types and route paths used throughout the
//! service live here so handlers, middleware and tests agree on them.

use ::http::header;

/// Header name for request ID used for tracing and correlation
pub const X_REQUEST_ID: &str = "x-request-id";

/// Authorization header prefix for bearer tokens
pub const BEARER_PREFIX: &str = "Bearer ";

/// Standard header re-exports for convenience
pub use header::{AUTHORIZATION, CACHE_CONTROL, CONNECTION, CONTENT_TYPE};

/// Inbound route paths
pub mod paths {
    /// Health check endpoint path
    pub const HEALTH: &str = "/health";

    pub const COMPANY_SEARCH: &str = "/api/companies/search";
    pub const COMPANY_AUTOCOMPLETE: &str = "/api/companies/autocomplete";
    pub const PEOPLE_SEARCH: &str = "/api/people/search";
}

pub mod content_types {
    pub const APPLICATION_JSON: &str = "application/json";
    pub const TEXT_EVENT_STREAM: &str = "text/event-stream";
}

/// Header values sent with a forwarded event stream
pub mod event_stream {
    pub const CACHE_CONTROL_NO_CACHE: &str = "no-cache";
    pub const CONNECTION_KEEP_ALIVE: &str = "keep-alive";
}

/// True when a content type announces a server-sent-events body
pub fn is_event_stream(content_type: Option<&str>) -> bool {
    content_type
        .map(|value| {
            value
                .trim_start()
                .to_ascii_lowercase()
                .starts_with(content_types::TEXT_EVENT_STREAM)
        })
        .unwrap_or(false)
}
