use thiserror::Error;

/// Decke BFF application error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Application error: {message}")]
    Application { message: String },

    #[error("Invalid configuration value: {field}")]
    InvalidConfig { field: String },
}

impl Error {
    pub fn application(message: impl Into<String>) -> Self {
        Self::Application {
            message: message.into(),
        }
    }

    pub fn invalid_config(field: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
