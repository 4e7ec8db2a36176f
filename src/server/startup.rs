use std::{sync::Arc, time::Duration};

use sea_orm::DatabaseConnection;
use tower_sessions::SessionManagerLayer;
use tower_sessions_redis_store::{fred::prelude::Pool, RedisStore};

use crate::server::{
    config::Config,
    error::Error,
    model::app::AppState,
    provider::{oauth::ProviderOAuth, ProviderClient},
    scheduler::JobContext,
};

/// Timeout applied to every outbound request, Yahoo API and RSS feeds alike
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the HTTP client shared by the Yahoo API client, the token exchange and feed fetching
pub fn build_http_client() -> Result<reqwest::Client, Error> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("huddle/", env!("CARGO_PKG_VERSION")))
        .timeout(HTTP_TIMEOUT)
        .build()?;

    Ok(client)
}

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Connect to Valkey/Redis and configure session management
pub async fn connect_to_session(
    config: &Config,
) -> Result<SessionManagerLayer<RedisStore<Pool>>, Error> {
    use time::Duration;
    use tower_sessions::{cookie::SameSite, Expiry};
    use tower_sessions_redis_store::fred::prelude::{ClientLike, Config as RedisConfig};

    let redis_config = RedisConfig::from_url(&config.valkey_url)?;
    let pool = Pool::new(redis_config, None, None, None, 6)?;

    pool.connect();
    pool.wait_for_connect().await?;

    let session_store = RedisStore::new(pool);

    let session = SessionManagerLayer::new(session_store)
        .with_secure(!config.development)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::days(7)));

    Ok(session)
}

/// Assemble the state shared by every request handler
///
/// Fails if the configured Yahoo token URL or redirect URI is not a valid URL.
pub fn build_app_state(
    config: &Config,
    db: DatabaseConnection,
    http: reqwest::Client,
) -> Result<AppState, Error> {
    let provider = ProviderClient::new(http.clone(), config.yahoo_api_url.clone());
    let oauth = ProviderOAuth::new(
        http.clone(),
        config.yahoo_client_id.clone(),
        config.yahoo_client_secret.clone(),
        config.yahoo_token_url.clone(),
        config.yahoo_redirect_uri(),
    )?;

    Ok(AppState {
        db,
        provider,
        oauth,
        http,
        feed_urls: Arc::new(config.news_feed_urls.clone()),
        cron_secret: config.cron_secret.clone(),
        development: config.development,
    })
}

/// Dependencies of scheduled jobs, shared with the request handlers
pub fn build_job_context(state: &AppState) -> JobContext {
    JobContext {
        db: state.db.clone(),
        http: state.http.clone(),
        feed_urls: Arc::clone(&state.feed_urls),
    }
}
