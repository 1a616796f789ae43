//! Shared request forwarding to the downstream API
//!
//! Every route funnels through [`Forwarder::send`]: fetch a bearer token,
//! issue the downstream call, surface non-2xx answers verbatim and hand back
//! either parsed JSON or the still-open event stream.

use crate::infrastructure::log_messages::{errors, request_processing};
use crate::proxy::headers::{content_types, is_event_stream, BEARER_PREFIX};
use crate::proxy::token::AccessTokenSource;
use crate::proxy::types::{BaseUrl, ProxyError, ProxyResult};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Error text used when a downstream error body cannot be read
pub const UNREADABLE_ERROR_BODY: &str = "Downstream error body unavailable";

/// One downstream call
#[derive(Debug, Clone)]
pub struct ForwardRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ForwardRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }
}

/// Successful downstream answer
pub enum UpstreamBody {
    /// Parsed JSON body; an empty body reads as `null`
    Json(Value),
    /// Server-sent events, left unread for verbatim forwarding
    EventStream(reqwest::Response),
}

/// Forwards requests to one downstream base URL
pub struct Forwarder {
    client: reqwest::Client,
    base_url: BaseUrl,
    tokens: Arc<dyn AccessTokenSource>,
}

impl Forwarder {
    pub fn new(
        client: reqwest::Client,
        base_url: BaseUrl,
        tokens: Arc<dyn AccessTokenSource>,
    ) -> Self {
        Self {
            client,
            base_url,
            tokens,
        }
    }

    /// Send one request downstream
    ///
    /// Non-2xx answers become [`ProxyError::Upstream`] carrying the
    /// downstream status and body text. Nothing is retried.
    pub async fn send(&self, request: ForwardRequest) -> ProxyResult<UpstreamBody> {
        let token = self.tokens.access_token().await?;
        let url = self.base_url.join(&request.path);
        let started = Instant::now();

        debug!(method = %request.method, url = %url, "{}", request_processing::FORWARDING);

        let mut builder = self
            .client
            .request(request.method, &url)
            .header(AUTHORIZATION, format!("{BEARER_PREFIX}{}", token.as_ref()))
            .header(
                ACCEPT,
                format!(
                    "{}, {}",
                    content_types::APPLICATION_JSON,
                    content_types::TEXT_EVENT_STREAM
                ),
            );

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();

        debug!(
            url = %url,
            status = status.as_u16(),
            duration_ms = started.elapsed().as_millis(),
            "{}",
            request_processing::DOWNSTREAM_RESPONDED
        );

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!(
                        status = status.as_u16(),
                        error = %e,
                        "{}",
                        errors::DOWNSTREAM_BODY_UNREADABLE
                    );
                    UNREADABLE_ERROR_BODY.to_string()
                }
            };
            return Err(ProxyError::Upstream { status, body });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok());
        if is_event_stream(content_type) {
            return Ok(UpstreamBody::EventStream(response));
        }

        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(UpstreamBody::Json(Value::Null));
        }
        Ok(UpstreamBody::Json(serde_json::from_slice(&bytes)?))
    }
}
