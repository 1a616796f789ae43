//! Application bootstrap
//!
//! Wires configuration into the token source, forwarder and router, and
//! runs the HTTP server.

pub mod app;

pub use app::Application;
