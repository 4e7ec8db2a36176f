//! Yahoo OAuth2 token refresh.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use oauth2::{
    basic::{BasicClient, BasicErrorResponse},
    AuthType, ClientId, ClientSecret, EndpointNotSet, EndpointSet, RedirectUrl, RefreshToken,
    RequestTokenError, TokenResponse, TokenUrl,
};

use crate::server::error::provider::ProviderError;

/// Lifetime assumed when the token endpoint omits `expires_in`
const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;

type YahooOAuthClient =
    BasicClient<EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// Result of a successful refresh exchange.
#[derive(Debug)]
pub struct RefreshedToken {
    pub access_token: String,
    /// Present when Yahoo rotated the refresh token
    pub refresh_token: Option<String>,
    /// Seconds until `access_token` expires
    pub expires_in: i64,
}

#[derive(Clone)]
pub struct ProviderOAuth {
    http: reqwest::Client,
    client: YahooOAuthClient,
    redirect_uri: RedirectUrl,
    refresh_locks: Arc<Mutex<HashMap<i32, Arc<tokio::sync::Mutex<()>>>>>,
}

impl ProviderOAuth {
    /// Creates the token client.
    ///
    /// Fails with [`ProviderError::InvalidUrl`] if `token_url` or `redirect_uri` is not a
    /// valid URL.
    pub fn new(
        http: reqwest::Client,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        token_url: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        let redirect_uri = RedirectUrl::new(redirect_uri.into())?;

        let client = BasicClient::new(ClientId::new(client_id.into()))
            .set_client_secret(ClientSecret::new(client_secret.into()))
            .set_auth_type(AuthType::BasicAuth)
            .set_token_uri(TokenUrl::new(token_url.into())?)
            .set_redirect_uri(redirect_uri.clone());

        Ok(Self {
            http,
            client,
            redirect_uri,
            refresh_locks: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    /// Exchanges a refresh token for a new access token.
    ///
    /// Authenticates with HTTP Basic client credentials and sends the registered redirect
    /// URI along, which Yahoo requires on refresh grants.
    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshedToken, ProviderError> {
        let refresh_token = RefreshToken::new(refresh_token.to_string());

        let token = self
            .client
            .exchange_refresh_token(&refresh_token)
            .add_extra_param("redirect_uri", self.redirect_uri.as_str())
            .request_async(&self.http)
            .await
            .map_err(refresh_error)?;

        let expires_in = token
            .expires_in()
            .and_then(|lifetime| i64::try_from(lifetime.as_secs()).ok())
            .unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS);

        Ok(RefreshedToken {
            access_token: token.access_token().secret().clone(),
            refresh_token: token.refresh_token().map(|token| token.secret().clone()),
            expires_in,
        })
    }

    /// Lock serializing token refreshes of one user within this process.
    pub fn refresh_lock(&self, user_id: i32) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self
            .refresh_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Drop locks nobody holds anymore so the map stays bounded by concurrent refreshes
        locks.retain(|id, lock| *id == user_id || Arc::strong_count(lock) > 1);

        locks
            .entry(user_id)
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }
}

fn refresh_error<RE>(err: RequestTokenError<RE, BasicErrorResponse>) -> ProviderError
where
    RE: std::error::Error + 'static,
{
    let reason = match err {
        RequestTokenError::ServerResponse(response) => response.error().to_string(),
        RequestTokenError::Request(e) => format!("request failed: {}", e),
        RequestTokenError::Parse(e, _) => format!("malformed token response: {}", e),
        RequestTokenError::Other(message) => message,
    };

    ProviderError::TokenRefresh(reason)
}
