//! Decke BFF - backend-for-frontend for company and people search
//!
//! The service authenticates UI sessions, translates the UI's filter
//! vocabulary into the downstream search API's field names, forwards the
//! request with a bearer token and reshapes the answer into the aliased
//! envelope the UI consumers read.

pub mod application;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod proxy;
pub mod search;

pub use application::Application;
pub use error::{Error, Result};
