//! HTTP surface of the BFF
//!
//! Session checks, bearer token acquisition, downstream forwarding,
//! event-stream passthrough and the error envelope live here; the field
//! mapping itself lives in [`crate::search`].

pub mod error_response;
pub mod forwarder;
pub mod headers;
pub mod middleware;
pub mod middleware_stack;
pub mod service;
pub mod streaming;
pub mod token;
pub mod types;


pub use forwarder::{ForwardRequest, Forwarder, UpstreamBody};
pub use middleware::AuthConfig;
pub use middleware_stack::BffMiddlewareStack;
pub use service::{BffService, DownstreamEndpoints};
pub use token::{
    AccessTokenSource, ClientCredentials, ClientCredentialsTokenSource, StaticTokenSource,
};
pub use types::{ProxyError, ProxyResult};
