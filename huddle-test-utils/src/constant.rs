//! Placeholder credentials and URLs shared by tests. None of these are real.

/// Mock Yahoo OAuth2 client ID
pub static TEST_YAHOO_CLIENT_ID: &str = "yahoo_client_id";

/// Mock Yahoo OAuth2 client secret
pub static TEST_YAHOO_CLIENT_SECRET: &str = "yahoo_client_secret";

/// Public URL the application runs under in tests
pub static TEST_APP_URL: &str = "http://localhost:8080";

/// Access token stored on accounts created by the user fixtures
pub static TEST_ACCESS_TOKEN: &str = "stored_access_token";

/// Refresh token stored on accounts created by the user fixtures
pub static TEST_REFRESH_TOKEN: &str = "stored_refresh_token";

/// Access token returned by the mock token endpoint
pub static TEST_REFRESHED_ACCESS_TOKEN: &str = "refreshed_access_token";

/// Bearer secret accepted by the cron endpoint in tests
pub static TEST_CRON_SECRET: &str = "cron_secret";

/// Path of the mock Yahoo token endpoint
pub static TEST_TOKEN_PATH: &str = "/oauth2/get_token";

/// Path prefix of the mock Yahoo Fantasy API
pub static TEST_API_PATH: &str = "/fantasy/v2";
