use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

/// Errors raised talking to the Yahoo Fantasy API or its OAuth token endpoint.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The API answered 401, the access token has to be refreshed before retrying.
    #[error("Yahoo access token expired")]
    TokenExpired,
    /// Any other non-2xx API response. Not retried.
    #[error("Yahoo API request failed with status {status}: {message}")]
    Api { status: u16, message: String },
    /// The token endpoint rejected the refresh token exchange.
    #[error("Yahoo token refresh failed: {0}")]
    TokenRefresh(String),
    /// Writes are made by the user on Yahoo's own pages, never through the API.
    #[error("Yahoo API write access is disabled: {0}")]
    WriteDisabled(&'static str),
    /// A configured Yahoo endpoint or redirect URI is not a valid URL.
    #[error("Invalid Yahoo OAuth URL: {0}")]
    InvalidUrl(#[from] oauth2::url::ParseError),
    #[error(transparent)]
    Request(#[from] reqwest::Error),
}

impl IntoResponse for ProviderError {
    fn into_response(self) -> Response {
        match self {
            Self::TokenRefresh(_) => {
                tracing::warn!("{}", self);

                error_response(
                    StatusCode::UNAUTHORIZED,
                    "Your Yahoo session expired, please link your account again",
                )
            }
            err => {
                tracing::error!("{}", err);

                error_response(
                    StatusCode::BAD_GATEWAY,
                    "Yahoo could not be reached, please try again",
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use super::ProviderError;

    #[test]
    fn failed_refresh_asks_to_relink() {
        let response = ProviderError::TokenRefresh("invalid_grant".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn upstream_failures_are_bad_gateway() {
        let api = ProviderError::Api {
            status: 503,
            message: "unavailable".to_string(),
        };

        assert_eq!(api.into_response().status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            ProviderError::TokenExpired.into_response().status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
