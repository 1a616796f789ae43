//! Verbatim forwarding of downstream server-sent events

use crate::infrastructure::log_messages::{errors, request_processing};
use crate::proxy::headers::{content_types, event_stream, CACHE_CONTROL, CONNECTION, CONTENT_TYPE};
use axum::body::Body;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use futures_util::{future, Stream, StreamExt};
use std::convert::Infallible;
use tracing::{debug, warn};

/// Relay chunks until the source ends or fails
///
/// A read error ends the relayed stream; whatever was already delivered
/// stays delivered.
pub fn relay_until_error<S, E>(source: S) -> impl Stream<Item = Result<Bytes, Infallible>> + Send
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    source
        .take_while(|chunk| {
            if let Err(e) = chunk {
                warn!(error = %e, "{}", errors::STREAM_READ_FAILED);
            }
            future::ready(chunk.is_ok())
        })
        .filter_map(|chunk| future::ready(chunk.ok().map(Ok)))
}

/// Build the outbound response for a downstream event stream
pub fn event_stream_response(upstream: reqwest::Response) -> Response {
    let status = upstream.status();
    debug!(status = status.as_u16(), "{}", request_processing::STREAM_FORWARDING);

    let body = Body::from_stream(relay_until_error(upstream.bytes_stream()));

    (
        status,
        [
            (CONTENT_TYPE, content_types::TEXT_EVENT_STREAM),
            (CACHE_CONTROL, event_stream::CACHE_CONTROL_NO_CACHE),
            (CONNECTION, event_stream::CONNECTION_KEEP_ALIVE),
        ],
        body,
    )
        .into_response()
}
