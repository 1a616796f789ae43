//! Unified error response handling for the proxy service
//!
//! Every failure leaves the service as `{"error": "<message>"}` with the
//! matching status code. Downstream failures keep the downstream status and
//! body text; unexpected failures are logged and answered with a static
//! message.

use crate::infrastructure::log_messages::errors;
use crate::proxy::headers::X_REQUEST_ID;
use crate::proxy::types::ProxyError;
use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// Message returned for failures whose details stay server side
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Standard error response format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    /// Convert to HTTP response, echoing the request ID when known
    pub fn into_response_with_status(
        self,
        status: StatusCode,
        request_id: Option<&str>,
    ) -> Response {
        let mut response = (status, Json(self)).into_response();

        if let Some(header_value) = request_id.and_then(|id| HeaderValue::from_str(id).ok()) {
            response.headers_mut().insert(X_REQUEST_ID, header_value);
        }

        response
    }
}

/// Extension trait for consistent error formatting
pub trait ErrorResponseExt {
    /// Convert to standardized error response
    fn to_error_response(&self) -> ErrorResponse;

    /// Get the appropriate HTTP status code
    fn status_code(&self) -> StatusCode;
}

impl ErrorResponseExt for ProxyError {
    fn to_error_response(&self) -> ErrorResponse {
        use ProxyError::*;

        match self {
            Unauthorized | TokenUnavailable(_) => ErrorResponse::new("Unauthorized"),
            BadRequest(message) | PayloadTooLarge(message) => ErrorResponse::new(message.clone()),
            Upstream { body, .. } => ErrorResponse::new(body.clone()),
            Client(_) | Serialization(_) | Internal(_) => {
                ErrorResponse::new(INTERNAL_ERROR_MESSAGE)
            }
        }
    }

    fn status_code(&self) -> StatusCode {
        use ProxyError::*;

        match self {
            Unauthorized | TokenUnavailable(_) => StatusCode::UNAUTHORIZED,
            BadRequest(_) => StatusCode::BAD_REQUEST,
            PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Upstream { status, .. } => *status,
            Client(_) | Serialization(_) | Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error conversion for Axum responses using standardized format
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            ProxyError::Upstream { status, .. } => {
                warn!(status = status.as_u16(), "{}", errors::DOWNSTREAM_FAILURE)
            }
            ProxyError::TokenUnavailable(reason) => {
                warn!(reason = %reason, "{}", errors::TOKEN_UNAVAILABLE)
            }
            _ if status.is_server_error() => {
                error!(error = %self, "{}", errors::UNEXPECTED_FAILURE)
            }
            _ => {}
        }

        self.to_error_response().into_response_with_status(status, None)
    }
}
