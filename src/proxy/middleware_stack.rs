//! Middleware stack builder for clean composition
//!
//! This module provides a builder for composing the Tower middleware stack
//! applied to every BFF route.

use crate::proxy::middleware::*;
use axum::{
    middleware::{from_fn, from_fn_with_state},
    Router,
};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;

/// Default cap on inbound request bodies
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Builder for composing the BFF middleware stack
pub struct BffMiddlewareStack {
    auth_config: Arc<AuthConfig>,
    max_body_bytes: usize,
}

impl BffMiddlewareStack {
    pub fn new(auth_config: AuthConfig) -> Self {
        Self {
            auth_config: Arc::new(auth_config),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    /// Apply the complete middleware stack to a router
    ///
    /// The middleware are applied in the following order (outer to inner):
    /// 1. Request ID generation/propagation
    /// 2. Logging (with request ID)
    /// 3. Error logging and request ID tagging
    /// 4. Session authentication
    /// 5. Request body limit
    pub fn apply_to_router<S>(self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        router
            // Apply middleware in reverse order (innermost first in the builder)
            .layer(RequestBodyLimitLayer::new(self.max_body_bytes))
            .layer(from_fn_with_state(self.auth_config.clone(), auth_middleware))
            .layer(from_fn(error_handling_middleware))
            .layer(from_fn(logging_middleware))
            .layer(from_fn(request_id_middleware))
    }
}
