//! Yahoo Fantasy Sports API client.
//!
//! Read-only access to the resources Huddle needs. Every request forces `format=json` and
//! carries the user's bearer token; payloads are returned as the decoded JSON envelope
//! Yahoo sends, callers navigate it themselves. A 401 is reported as
//! [`ProviderError::TokenExpired`] so callers can refresh the token and retry once, any
//! other non-2xx status is terminal.

pub mod news;
pub mod oauth;
pub mod write;

use reqwest::StatusCode;
use serde_json::Value;

use crate::server::error::provider::ProviderError;

/// Longest upstream error body kept in [`ProviderError::Api`]
const MAX_ERROR_MESSAGE_LEN: usize = 512;

#[derive(Clone)]
pub struct ProviderClient {
    http: reqwest::Client,
    base_url: String,
}

impl ProviderClient {
    /// Creates a client for the API rooted at `base_url`, e.g.
    /// `https://fantasysports.yahooapis.com/fantasy/v2`.
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Builds the request URL for a resource path, appending `format=json`.
    pub fn url(&self, resource: &str) -> String {
        let separator = if resource.contains('?') { '&' } else { '?' };

        format!(
            "{}/{}{}format=json",
            self.base_url,
            resource.trim_start_matches('/'),
            separator
        )
    }

    /// Issues an authenticated GET for `resource` and decodes the JSON body.
    pub async fn get(&self, access_token: &str, resource: &str) -> Result<Value, ProviderError> {
        let url = self.url(resource);

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            tracing::debug!(resource = %resource, "Yahoo API rejected access token");

            return Err(ProviderError::TokenExpired);
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();

            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: truncate_message(message),
            });
        }

        Ok(response.json::<Value>().await?)
    }

    /// Leagues the token's owner belongs to for a game (sport code or game key)
    pub async fn user_leagues(&self, access_token: &str, game: &str) -> Result<Value, ProviderError> {
        self.get(
            access_token,
            &format!("users;use_login=1/games;game_keys={}/leagues", game),
        )
        .await
    }

    pub async fn team_roster(&self, access_token: &str, team_key: &str) -> Result<Value, ProviderError> {
        self.get(access_token, &format!("team/{}/roster", team_key))
            .await
    }

    pub async fn league_standings(
        &self,
        access_token: &str,
        league_key: &str,
    ) -> Result<Value, ProviderError> {
        self.get(access_token, &format!("league/{}/standings", league_key))
            .await
    }

    /// Completed trades of a league
    pub async fn league_transactions(
        &self,
        access_token: &str,
        league_key: &str,
    ) -> Result<Value, ProviderError> {
        self.get(
            access_token,
            &format!("league/{}/transactions;types=trade", league_key),
        )
        .await
    }

    /// Pending trades involving `team_key`. Yahoo only lists pending trades per team.
    pub async fn team_pending_trades(
        &self,
        access_token: &str,
        league_key: &str,
        team_key: &str,
    ) -> Result<Value, ProviderError> {
        self.get(
            access_token,
            &format!(
                "league/{}/transactions;type=pending_trade;team_key={}",
                league_key, team_key
            ),
        )
        .await
    }

    pub async fn player_news(&self, access_token: &str, player_key: &str) -> Result<Value, ProviderError> {
        self.get(access_token, &format!("player/{}/news", player_key))
            .await
    }
}

/// Cuts `message` to at most [`MAX_ERROR_MESSAGE_LEN`] bytes on a character boundary.
fn truncate_message(mut message: String) -> String {
    if message.len() > MAX_ERROR_MESSAGE_LEN {
        let mut end = MAX_ERROR_MESSAGE_LEN;
        while !message.is_char_boundary(end) {
            end -= 1;
        }
        message.truncate(end);
    }

    message
}

#[cfg(test)]
mod tests {
    use mockito::Server;
    use serde_json::json;

    use super::{truncate_message, ProviderClient, MAX_ERROR_MESSAGE_LEN};
    use crate::server::error::provider::ProviderError;

    fn client(url: &str) -> ProviderClient {
        ProviderClient::new(reqwest::Client::new(), format!("{}/fantasy/v2/", url))
    }

    #[test]
    fn appends_json_format() {
        let client = ProviderClient::new(reqwest::Client::new(), "https://api.example/v2");

        assert_eq!(
            client.url("league/466.l.1/standings"),
            "https://api.example/v2/league/466.l.1/standings?format=json"
        );
        assert_eq!(
            client.url("/players?start=25"),
            "https://api.example/v2/players?start=25&format=json"
        );
    }

    #[tokio::test]
    async fn returns_payload_unmodified() {
        let mut server = Server::new_async().await;
        let body = json!({ "fantasy_content": { "league": [{ "league_key": "466.l.1" }] } });
        let mock = server
            .mock("GET", "/fantasy/v2/league/466.l.1/standings")
            .match_query(mockito::Matcher::UrlEncoded(
                "format".into(),
                "json".into(),
            ))
            .match_header("authorization", "Bearer token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let result = client(&server.url())
            .league_standings("token", "466.l.1")
            .await;

        mock.assert_async().await;
        assert_eq!(result.unwrap(), body);
    }

    #[tokio::test]
    async fn unauthorized_is_token_expired() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/fantasy/v2/team/466.l.1.t.1/roster")
            .match_query(mockito::Matcher::Any)
            .with_status(401)
            .create_async()
            .await;

        let result = client(&server.url()).team_roster("token", "466.l.1.t.1").await;

        assert!(matches!(result, Err(ProviderError::TokenExpired)));
    }

    #[tokio::test]
    async fn other_status_is_terminal_api_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/fantasy/v2/player/466.p.100/news")
            .match_query(mockito::Matcher::Any)
            .with_status(503)
            .with_body("unavailable")
            .create_async()
            .await;

        let result = client(&server.url()).player_news("token", "466.p.100").await;

        match result {
            Err(ProviderError::Api { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "unavailable");
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[test]
    fn truncates_on_char_boundary() {
        let message = format!("{}é tail", "a".repeat(MAX_ERROR_MESSAGE_LEN - 1));

        let truncated = truncate_message(message);

        assert_eq!(truncated, "a".repeat(MAX_ERROR_MESSAGE_LEN - 1));
        assert_eq!(truncate_message("short".to_string()), "short");
    }

    /// Expect a long non-ASCII error body to be cut, not to abort the request
    #[tokio::test]
    async fn long_multibyte_error_body_is_truncated() {
        let mut server = Server::new_async().await;
        let body = format!("{}é{}", "a".repeat(MAX_ERROR_MESSAGE_LEN - 1), "b".repeat(100));
        let _mock = server
            .mock("GET", "/fantasy/v2/team/466.l.1.t.1/roster")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .with_body(body)
            .create_async()
            .await;

        let result = client(&server.url()).team_roster("token", "466.l.1.t.1").await;

        match result {
            Err(ProviderError::Api { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message.len(), MAX_ERROR_MESSAGE_LEN - 1);
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }
}
