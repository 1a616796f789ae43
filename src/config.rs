use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub downstream: DownstreamSettings,
    pub token: TokenSettings,
    pub auth: AuthSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub max_body_bytes: usize,
}

/// Downstream search API location and route paths
#[derive(Debug, Deserialize, Clone)]
pub struct DownstreamSettings {
    pub base_url: String,
    pub company_search_path: String,
    pub people_search_path: String,
    pub company_autocomplete_path: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenMode {
    Static,
    ClientCredentials,
}

/// How the bearer token for downstream calls is obtained
#[derive(Debug, Deserialize, Clone)]
pub struct TokenSettings {
    pub mode: TokenMode,
    pub static_token: Option<String>,
    pub token_url: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub audience: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthSettings {
    pub session_tokens: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
    pub format: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        Config::builder()
            // Start with default values
            .set_default("application.host", "0.0.0.0")?
            .set_default("application.port", 8080)?
            .set_default("application.environment", environment.clone())?
            .set_default("application.max_body_bytes", 1024 * 1024)?
            .set_default("downstream.base_url", "http://localhost:9000")?
            .set_default("downstream.company_search_path", "/api/v1/businesses/search")?
            .set_default("downstream.people_search_path", "/api/v1/prospects/search")?
            .set_default(
                "downstream.company_autocomplete_path",
                "/api/v1/businesses/autocomplete",
            )?
            .set_default("token.mode", "static")?
            .set_default("auth.session_tokens", Vec::<String>::new())?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "json")?
            // Add configuration file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{environment}")).required(false))
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables with prefix
            .add_source(
                Environment::with_prefix("DECKE_BFF")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("auth.session_tokens")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.application.host, self.application.port)
    }
}
