//! Infrastructure layer for the Decke BFF
//!
//! Logging setup and the log message catalogue.

pub mod log_messages;
pub mod logging;

pub use logging::init_tracing;
