//! BFF service: routes, shared state and handlers
//!
//! Each handler follows the same shape: parse and validate the client
//! request, translate it with the `search` module, forward it through the
//! shared [`Forwarder`], then reshape the answer. A downstream event stream
//! is passed back untouched instead of being reshaped.
//!
//! ```rust,ignore
//! let service = BffService::new(forwarder, endpoints);
//! let router = service.into_router(BffMiddlewareStack::new(auth_config));
//! axum::serve(listener, router).await?;
//! ```

use crate::proxy::forwarder::{ForwardRequest, Forwarder, UpstreamBody};
use crate::proxy::headers::paths;
use crate::proxy::middleware_stack::BffMiddlewareStack;
use crate::proxy::streaming::event_stream_response;
use crate::proxy::types::ProxyResult;
use crate::search::{
    build_search_payload, normalize_search_response, normalize_suggestions, AutocompleteParams,
    SearchKind, SearchRequest,
};
use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, QueryRejection},
        Query, State,
    },
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

/// Downstream paths of the endpoints the BFF translates for
#[derive(Debug, Clone)]
pub struct DownstreamEndpoints {
    pub company_search: String,
    pub people_search: String,
    pub company_autocomplete: String,
}

impl DownstreamEndpoints {
    fn search_path(&self, kind: SearchKind) -> &str {
        match kind {
            SearchKind::Companies => &self.company_search,
            SearchKind::People => &self.people_search,
        }
    }
}

/// State shared by all handlers
pub struct AppState {
    forwarder: Forwarder,
    endpoints: DownstreamEndpoints,
}

/// The BFF HTTP service
pub struct BffService {
    state: Arc<AppState>,
}

impl BffService {
    pub fn new(forwarder: Forwarder, endpoints: DownstreamEndpoints) -> Self {
        Self {
            state: Arc::new(AppState {
                forwarder,
                endpoints,
            }),
        }
    }

    /// Create an Axum router for the service with the middleware stack applied
    pub fn into_router(self, middleware: BffMiddlewareStack) -> Router {
        let router = Router::new()
            .route(paths::HEALTH, get(health_handler))
            .route(paths::COMPANY_SEARCH, post(company_search_handler))
            .route(paths::PEOPLE_SEARCH, post(people_search_handler))
            .route(paths::COMPANY_AUTOCOMPLETE, get(company_autocomplete_handler))
            .with_state(self.state);

        middleware.apply_to_router(router)
    }
}

/// Health check handler
async fn health_handler() -> &'static str {
    "OK"
}

async fn company_search_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> ProxyResult<Response> {
    search(&state, SearchKind::Companies, &body?).await
}

async fn people_search_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> ProxyResult<Response> {
    search(&state, SearchKind::People, &body?).await
}

async fn search(state: &AppState, kind: SearchKind, body: &[u8]) -> ProxyResult<Response> {
    let request = SearchRequest::from_slice(body)?;
    let pagination = request.pagination()?;

    let payload = build_search_payload(
        kind.vocabulary(),
        &request.filters,
        request.name.as_deref(),
        pagination,
        kind.pagination_style(),
    );

    let forward = ForwardRequest::post(
        state.endpoints.search_path(kind),
        serde_json::to_value(&payload)?,
    );

    match state.forwarder.send(forward).await? {
        UpstreamBody::EventStream(upstream) => Ok(event_stream_response(upstream)),
        UpstreamBody::Json(response) => {
            Ok(Json(normalize_search_response(kind, &response, pagination)).into_response())
        }
    }
}

async fn company_autocomplete_handler(
    State(state): State<Arc<AppState>>,
    params: Result<Query<AutocompleteParams>, QueryRejection>,
) -> ProxyResult<Response> {
    let Query(params) = params?;
    let query = params.downstream_query(SearchKind::Companies.vocabulary())?;
    let forward =
        ForwardRequest::get(state.endpoints.company_autocomplete.as_str()).with_query(query);

    match state.forwarder.send(forward).await? {
        UpstreamBody::EventStream(upstream) => Ok(event_stream_response(upstream)),
        UpstreamBody::Json(response) => {
            Ok(Json(normalize_suggestions(&response)).into_response())
        }
    }
}
