//! Middleware implementations for the BFF service

use crate::infrastructure::log_messages::{auth, errors, request_processing};
use crate::proxy::error_response::{ErrorResponse, INTERNAL_ERROR_MESSAGE};
use crate::proxy::headers::{content_types, paths, BEARER_PREFIX, X_REQUEST_ID};
use crate::proxy::types::*;
use axum::{
    body::to_bytes,
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

/// Configuration for session authentication middleware
#[derive(Clone)]
pub struct AuthConfig {
    /// Sessions accepted from UI clients
    pub session_tokens: HashSet<SessionToken>,
    /// Paths that bypass authentication
    pub bypass_paths: HashSet<BypassPath>,
}

impl AuthConfig {
    /// Accept the given sessions, keeping the default bypass paths
    pub fn with_sessions<I, S>(sessions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            session_tokens: sessions
                .into_iter()
                .filter_map(|session| SessionToken::try_new(session.into()).ok())
                .collect(),
            ..Self::default()
        }
    }

    fn bypasses(&self, path: &str) -> bool {
        BypassPath::try_new(path.to_string())
            .map(|path| self.bypass_paths.contains(&path))
            .unwrap_or(false)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_tokens: HashSet::new(),
            bypass_paths: BypassPath::try_new(paths::HEALTH.to_string())
                .into_iter()
                .collect(),
        }
    }
}

/// Request ID middleware - ensures every request has a unique ID for tracing
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|h| h.to_str().ok())
        .and_then(RequestId::parse)
        .unwrap_or_default();

    let Ok(header_value) = HeaderValue::from_str(&request_id.to_string()) else {
        return next.run(request).await;
    };

    request
        .headers_mut()
        .insert(X_REQUEST_ID, header_value.clone());

    let mut response = next.run(request).await;
    response.headers_mut().insert(X_REQUEST_ID, header_value);
    response
}

/// Session authentication middleware - validates the bearer session
pub async fn auth_middleware(
    State(auth_config): State<Arc<AuthConfig>>,
    request: Request,
    next: Next,
) -> Response {
    if auth_config.bypasses(request.uri().path()) {
        return next.run(request).await;
    }

    let session = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .and_then(|token| SessionToken::try_new(token.to_string()).ok());

    match session {
        Some(session) if auth_config.session_tokens.contains(&session) => next.run(request).await,
        Some(_) => {
            warn!(path = %request.uri().path(), "{}", auth::INVALID_SESSION);
            ProxyError::Unauthorized.into_response()
        }
        None => {
            warn!(path = %request.uri().path(), "{}", auth::MISSING_SESSION);
            ProxyError::Unauthorized.into_response()
        }
    }
}

/// Logging middleware - logs request/response details with timing
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();

    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    info!(
        request_id = request_id,
        method = %method,
        path = %uri.path(),
        "{}",
        request_processing::REQUEST_RECEIVED
    );

    let response = next.run(request).await;

    info!(
        request_id = request_id,
        method = %method,
        path = %uri.path(),
        status = response.status().as_u16(),
        duration_ms = start.elapsed().as_millis(),
        "{}",
        request_processing::REQUEST_COMPLETED
    );

    response
}

/// Largest plain-text error body read back when wrapping it in the envelope
const MAX_WRAPPED_ERROR_BYTES: usize = 16 * 1024;

/// Error handling wrapper - logs failures, tags them with the request ID and
/// wraps error bodies produced outside the handlers (body limit, unknown
/// routes) in the `{"error": ...}` envelope
pub async fn error_handling_middleware(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);

    let mut response = next.run(request).await;
    let status = response.status();

    if status.is_client_error() || status.is_server_error() {
        let request_id = request_id.as_deref().unwrap_or("unknown");
        if status.is_server_error() {
            error!(request_id, status = status.as_u16(), "{}", request_processing::REQUEST_FAILED);
        } else {
            warn!(request_id, status = status.as_u16(), "{}", request_processing::REQUEST_FAILED);
        }

        if !is_json(&response) {
            response = into_envelope(response, request_id).await;
        } else if let Ok(header_value) = HeaderValue::from_str(request_id) {
            response.headers_mut().insert(X_REQUEST_ID, header_value);
        }
    }

    response
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with(content_types::APPLICATION_JSON))
}

async fn into_envelope(response: Response, request_id: &str) -> Response {
    let (parts, body) = response.into_parts();

    let text = match to_bytes(body, MAX_WRAPPED_ERROR_BYTES).await {
        Ok(bytes) => String::from_utf8_lossy(&bytes).trim().to_string(),
        Err(e) => {
            warn!(request_id, error = %e, "{}", errors::ERROR_BODY_UNREADABLE);
            String::new()
        }
    };
    let message = if text.is_empty() {
        parts
            .status
            .canonical_reason()
            .unwrap_or(INTERNAL_ERROR_MESSAGE)
            .to_string()
    } else {
        text
    };

    let mut wrapped =
        ErrorResponse::new(message).into_response_with_status(parts.status, Some(request_id));
    for (name, value) in &parts.headers {
        let replaced = *name == header::CONTENT_TYPE
            || *name == header::CONTENT_LENGTH
            || name.as_str() == X_REQUEST_ID;
        if !replaced {
            wrapped.headers_mut().append(name.clone(), value.clone());
        }
    }
    wrapped
}
