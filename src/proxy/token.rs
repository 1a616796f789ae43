//! Bearer tokens for downstream calls
//!
//! Every forwarded request carries a bearer token obtained from an
//! [`AccessTokenSource`]. Tokens are fetched per request; nothing is cached.

use crate::infrastructure::log_messages::auth;
use crate::proxy::types::{BearerToken, ProxyError, ProxyResult};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// Supplier of bearer tokens for the downstream API
#[async_trait]
pub trait AccessTokenSource: Send + Sync {
    async fn access_token(&self) -> ProxyResult<BearerToken>;
}

/// A fixed token from configuration
pub struct StaticTokenSource {
    token: BearerToken,
}

impl StaticTokenSource {
    pub fn new(token: BearerToken) -> Self {
        Self { token }
    }
}

#[async_trait]
impl AccessTokenSource for StaticTokenSource {
    async fn access_token(&self) -> ProxyResult<BearerToken> {
        Ok(self.token.clone())
    }
}

/// Client credentials used for the OAuth2 client-credentials grant
#[derive(Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub audience: Option<String>,
}

/// OAuth2 client-credentials grant against the identity provider
pub struct ClientCredentialsTokenSource {
    client: reqwest::Client,
    token_url: String,
    credentials: ClientCredentials,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl ClientCredentialsTokenSource {
    pub fn new(client: reqwest::Client, token_url: String, credentials: ClientCredentials) -> Self {
        Self {
            client,
            token_url,
            credentials,
        }
    }

    fn form(&self) -> Vec<(&'static str, &str)> {
        let mut form = vec![
            ("grant_type", "client_credentials"),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
        ];
        if let Some(audience) = &self.credentials.audience {
            form.push(("audience", audience.as_str()));
        }
        form
    }
}

#[async_trait]
impl AccessTokenSource for ClientCredentialsTokenSource {
    async fn access_token(&self) -> ProxyResult<BearerToken> {
        debug!(token_url = %self.token_url, "{}", auth::TOKEN_REQUESTED);

        let response = self
            .client
            .post(&self.token_url)
            .form(&self.form())
            .send()
            .await
            .map_err(|e| ProxyError::TokenUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProxyError::TokenUnavailable(format!(
                "token endpoint responded with {status}"
            )));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| ProxyError::TokenUnavailable(format!("unreadable token response: {e}")))?;

        BearerToken::try_new(body.access_token)
            .map_err(|_| ProxyError::TokenUnavailable("empty access token".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn credentials(audience: Option<&str>) -> ClientCredentials {
        ClientCredentials {
            client_id: "bff-client".to_string(),
            client_secret: "s3cret".to_string(),
            audience: audience.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn static_source_returns_configured_token() {
        let source = StaticTokenSource::new(BearerToken::try_new("abc".to_string()).unwrap());
        let token = source.access_token().await.unwrap();
        assert_eq!(token.as_ref(), "abc");
    }

    #[tokio::test]
    async fn client_credentials_grant_posts_form() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/oauth/token")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("grant_type".into(), "client_credentials".into()),
                Matcher::UrlEncoded("client_id".into(), "bff-client".into()),
                Matcher::UrlEncoded("client_secret".into(), "s3cret".into()),
                Matcher::UrlEncoded("audience".into(), "https://api.decke.test".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "access_token": "issued-token", "expires_in": 86400 }).to_string())
            .create_async()
            .await;

        let source = ClientCredentialsTokenSource::new(
            reqwest::Client::new(),
            format!("{}/oauth/token", server.url()),
            credentials(Some("https://api.decke.test")),
        );

        let token = source.access_token().await.unwrap();
        assert_eq!(token.as_ref(), "issued-token");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn rejected_grant_is_token_unavailable() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/oauth/token")
            .with_status(401)
            .with_body("invalid_client")
            .create_async()
            .await;

        let source = ClientCredentialsTokenSource::new(
            reqwest::Client::new(),
            format!("{}/oauth/token", server.url()),
            credentials(None),
        );

        let result = source.access_token().await;
        assert!(matches!(result, Err(ProxyError::TokenUnavailable(_))));
    }
}
