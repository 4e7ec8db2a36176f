//! Shared helpers for integration tests.

use std::sync::Arc;

use axum::{body::Body, response::Response};
use huddle::server::{
    model::app::AppState,
    provider::{oauth::ProviderOAuth, ProviderClient},
};
use huddle_test_utils::prelude::*;
use serde::de::DeserializeOwned;

/// Path the mock RSS feed is served under
pub static TEST_FEED_PATH: &str = "/feeds/nba.xml";

/// Builds [`AppState`] pointed at the test context's database and mock server.
pub trait TestContextExt {
    fn to_app_state(&self) -> AppState;
}

impl TestContextExt for TestContext {
    fn to_app_state(&self) -> AppState {
        let http = reqwest::Client::new();

        AppState {
            db: self.db.clone(),
            provider: ProviderClient::new(http.clone(), self.api_url()),
            oauth: ProviderOAuth::new(
                http.clone(),
                TEST_YAHOO_CLIENT_ID,
                TEST_YAHOO_CLIENT_SECRET,
                self.token_url(),
                format!("{}/api/auth/callback/yahoo", TEST_APP_URL),
            )
            .unwrap(),
            http,
            feed_urls: Arc::new(vec![format!("{}{}", self.server_url(), TEST_FEED_PATH)]),
            cron_secret: Some(TEST_CRON_SECRET.to_string()),
            development: false,
        }
    }
}

/// Reads a JSON response body.
pub async fn json_body<T: DeserializeOwned>(response: Response<Body>) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    serde_json::from_slice(&bytes).unwrap()
}
