use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::provider::{oauth::ProviderOAuth, ProviderClient};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub provider: ProviderClient,
    pub oauth: ProviderOAuth,
    /// Plain HTTP client used for RSS feeds
    pub http: reqwest::Client,
    pub feed_urls: Arc<Vec<String>>,
    pub cron_secret: Option<String>,
    pub development: bool,
}
