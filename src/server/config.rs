use crate::server::error::config::ConfigError;

/// Default base URL of the Yahoo Fantasy Sports API
pub const DEFAULT_YAHOO_API_URL: &str = "https://fantasysports.yahooapis.com/fantasy/v2";
/// Default Yahoo OAuth2 token endpoint
pub const DEFAULT_YAHOO_TOKEN_URL: &str = "https://api.login.yahoo.com/oauth2/get_token";
/// Run news ingestion every 30 minutes
pub const DEFAULT_NEWS_CRON: &str = "0 */30 * * * *";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

pub struct Config {
    pub database_url: String,
    pub valkey_url: String,
    pub yahoo_client_id: String,
    pub yahoo_client_secret: String,
    pub yahoo_api_url: String,
    pub yahoo_token_url: String,
    /// Canonical public URL of the application, without a trailing slash
    pub app_url: String,
    /// Bearer secret for the cron endpoint, required outside development
    pub cron_secret: Option<String>,
    pub development: bool,
    pub news_feed_urls: Vec<String>,
    pub news_cron: String,
    pub bind_address: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let development = optional_var("APP_ENV")
            .map(|env| env.eq_ignore_ascii_case("development"))
            .unwrap_or(false);

        let cron_secret = optional_var("CRON_SECRET");
        if cron_secret.is_none() && !development {
            return Err(ConfigError::MissingEnvVar("CRON_SECRET".to_string()));
        }

        let app_url = required_var("APP_URL")?.trim_end_matches('/').to_string();
        if !app_url.starts_with("http://") && !app_url.starts_with("https://") {
            return Err(ConfigError::InvalidEnvValue {
                var: "APP_URL".to_string(),
                reason: "must start with http:// or https://".to_string(),
            });
        }

        Ok(Self {
            database_url: required_var("DATABASE_URL")?,
            valkey_url: required_var("VALKEY_URL")?,
            yahoo_client_id: required_var("YAHOO_CLIENT_ID")?,
            yahoo_client_secret: required_var("YAHOO_CLIENT_SECRET")?,
            yahoo_api_url: optional_var("YAHOO_API_URL")
                .unwrap_or_else(|| DEFAULT_YAHOO_API_URL.to_string()),
            yahoo_token_url: optional_var("YAHOO_TOKEN_URL")
                .unwrap_or_else(|| DEFAULT_YAHOO_TOKEN_URL.to_string()),
            app_url,
            cron_secret,
            development,
            news_feed_urls: parse_feed_urls(&optional_var("NEWS_FEED_URLS").unwrap_or_default()),
            news_cron: optional_var("NEWS_CRON").unwrap_or_else(|| DEFAULT_NEWS_CRON.to_string()),
            bind_address: optional_var("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
        })
    }

    /// Redirect URI registered with Yahoo, sent along with refresh token exchanges
    pub fn yahoo_redirect_uri(&self) -> String {
        format!("{}/api/auth/callback/yahoo", self.app_url)
    }
}

fn required_var(name: &str) -> Result<String, ConfigError> {
    optional_var(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Splits a comma separated list of feed URLs, ignoring blanks.
pub fn parse_feed_urls(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::parse_feed_urls;

    #[test]
    fn splits_and_trims_feed_urls() {
        let urls = parse_feed_urls(" https://a.example/rss , ,https://b.example/rss");

        assert_eq!(urls, vec!["https://a.example/rss", "https://b.example/rss"]);
    }

    #[test]
    fn empty_feed_list() {
        assert!(parse_feed_urls("").is_empty());
    }
}
