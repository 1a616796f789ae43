//! Log message constants for the service
//!
//! This module centralizes the messages emitted through `tracing` so the
//! same event always reads the same way. Variable parts are passed as
//! structured fields rather than interpolated.

/// Application startup and lifecycle messages
pub mod application {
    pub const STARTING: &str = "Starting Decke BFF";
    pub const LISTENING: &str = "Decke BFF listening";
    pub const SHUTTING_DOWN: &str = "Shutdown signal received, draining connections";
    pub const STOPPED: &str = "Decke BFF stopped";
}

/// Request/response processing messages
pub mod request_processing {
    pub const REQUEST_RECEIVED: &str = "Incoming request";
    pub const REQUEST_COMPLETED: &str = "Request completed";
    pub const REQUEST_FAILED: &str = "Request failed";
    pub const FORWARDING: &str = "Forwarding request downstream";
    pub const DOWNSTREAM_RESPONDED: &str = "Downstream responded";
    pub const STREAM_FORWARDING: &str = "Forwarding downstream event stream";
}

/// Authentication messages
pub mod auth {
    pub const MISSING_SESSION: &str = "Missing or malformed Authorization header";
    pub const INVALID_SESSION: &str = "Session token rejected";
    pub const TOKEN_REQUESTED: &str = "Requesting downstream access token";
}

/// Error messages
pub mod errors {
    pub const DOWNSTREAM_FAILURE: &str = "Downstream returned an error status";
    pub const DOWNSTREAM_BODY_UNREADABLE: &str = "Could not read downstream error body";
    pub const ERROR_BODY_UNREADABLE: &str = "Could not read error response body";
    pub const TOKEN_UNAVAILABLE: &str = "Downstream access token unavailable";
    pub const UNEXPECTED_FAILURE: &str = "Unexpected failure while handling request";
    pub const STREAM_READ_FAILED: &str = "Downstream event stream failed, closing";
}

/// Configuration messages
pub mod configuration {
    pub const CONFIG_LOADED: &str = "Configuration loaded";
}
