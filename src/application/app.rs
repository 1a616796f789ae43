use crate::config::{Settings, TokenMode, TokenSettings};
use crate::error::{Error, Result};
use crate::infrastructure::log_messages::{application, configuration};
use crate::proxy::types::{BaseUrl, BearerToken};
use crate::proxy::{
    AccessTokenSource, AuthConfig, BffMiddlewareStack, BffService, ClientCredentials,
    ClientCredentialsTokenSource, DownstreamEndpoints, Forwarder, StaticTokenSource,
};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, instrument};

/// Main application struct that coordinates all components
pub struct Application {
    settings: Settings,
    router: Router,
}

impl Application {
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;

        let base_url = BaseUrl::try_new(settings.downstream.base_url.clone())
            .map_err(|_| Error::invalid_config("downstream.base_url"))?;
        let tokens = token_source(&settings.token, client.clone())?;
        let forwarder = Forwarder::new(client, base_url, tokens);

        let endpoints = DownstreamEndpoints {
            company_search: settings.downstream.company_search_path.clone(),
            people_search: settings.downstream.people_search_path.clone(),
            company_autocomplete: settings.downstream.company_autocomplete_path.clone(),
        };

        let middleware = BffMiddlewareStack::new(AuthConfig::with_sessions(
            settings.auth.session_tokens.iter().cloned(),
        ))
        .with_max_body_bytes(settings.application.max_body_bytes);

        let router = BffService::new(forwarder, endpoints).into_router(middleware);

        info!(
            downstream = %settings.downstream.base_url,
            token_mode = ?settings.token.mode,
            sessions = settings.auth.session_tokens.len(),
            "{}",
            configuration::CONFIG_LOADED
        );

        Ok(Self { settings, router })
    }

    #[instrument(skip(self))]
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(self.settings.bind_address()).await?;
        info!(address = %listener.local_addr()?, "{}", application::LISTENING);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("{}", application::STOPPED);
        Ok(())
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The fully layered router, for serving elsewhere or testing
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Build the configured bearer token source
pub fn token_source(
    settings: &TokenSettings,
    client: reqwest::Client,
) -> Result<Arc<dyn AccessTokenSource>> {
    match settings.mode {
        TokenMode::Static => {
            let token = settings
                .static_token
                .clone()
                .and_then(|token| BearerToken::try_new(token).ok())
                .ok_or_else(|| Error::invalid_config("token.static_token"))?;
            Ok(Arc::new(StaticTokenSource::new(token)))
        }
        TokenMode::ClientCredentials => {
            let required = |value: &Option<String>, field: &str| {
                value
                    .clone()
                    .filter(|value| !value.trim().is_empty())
                    .ok_or_else(|| Error::invalid_config(field))
            };
            let token_url = required(&settings.token_url, "token.token_url")?;
            let credentials = ClientCredentials {
                client_id: required(&settings.client_id, "token.client_id")?,
                client_secret: required(&settings.client_secret, "token.client_secret")?,
                audience: settings.audience.clone(),
            };
            Ok(Arc::new(ClientCredentialsTokenSource::new(
                client,
                token_url,
                credentials,
            )))
        }
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("{}", application::SHUTTING_DOWN);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_settings(mode: TokenMode) -> TokenSettings {
        TokenSettings {
            mode,
            static_token: None,
            token_url: None,
            client_id: None,
            client_secret: None,
            audience: None,
        }
    }

    #[test]
    fn static_mode_requires_token() {
        let result = token_source(&token_settings(TokenMode::Static), reqwest::Client::new());
        assert!(matches!(
            result,
            Err(Error::InvalidConfig { field }) if field == "token.static_token"
        ));
    }

    #[test]
    fn client_credentials_mode_requires_url_and_secrets() {
        let mut settings = token_settings(TokenMode::ClientCredentials);
        settings.token_url = Some("https://auth.decke.test/oauth/token".to_string());
        settings.client_id = Some("bff".to_string());

        let result = token_source(&settings, reqwest::Client::new());
        assert!(
            matches!(result, Err(Error::InvalidConfig { field }) if field == "token.client_secret")
        );

        settings.client_secret = Some("secret".to_string());
        assert!(token_source(&settings, reqwest::Client::new()).is_ok());
    }

    #[test]
    fn application_builds_from_settings() {
        let mut settings = Settings::new().unwrap();
        settings.token.mode = TokenMode::Static;
        settings.token.static_token = Some("downstream-token".to_string());

        let app = Application::from_settings(settings).unwrap();
        assert_eq!(
            app.settings().token.static_token.as_deref(),
            Some("downstream-token")
        );
        let _router = app.router();
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let mut settings = Settings::new().unwrap();
        settings.token.static_token = Some("downstream-token".to_string());
        settings.downstream.base_url = "localhost:9000".to_string();

        let result = Application::from_settings(settings);
        assert!(matches!(
            result,
            Err(Error::InvalidConfig { field }) if field == "downstream.base_url"
        ));
    }
}
