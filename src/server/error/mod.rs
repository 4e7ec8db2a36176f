//! Error types for the Huddle server.
//!
//! Domain errors (authentication, configuration, provider, trades, validation) are defined
//! in their own modules and aggregated into [`Error`]. Every error implements `IntoResponse`
//! so handlers can return `Result<_, Error>` directly; internal details are logged and never
//! sent to the client.

pub mod auth;
pub mod config;
pub mod provider;
pub mod trade;
pub mod validation;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        auth::AuthError, config::ConfigError, provider::ProviderError, trade::TradeError,
        validation::ValidationError,
    },
};

/// Main error type for the Huddle server.
///
/// Uses `#[from]` conversions so domain and library errors propagate with `?`.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Authentication error (session, linked provider account).
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Yahoo API or token endpoint error.
    #[error(transparent)]
    ProviderError(#[from] ProviderError),
    /// Marketplace trade authorization or state error.
    #[error(transparent)]
    TradeError(#[from] TradeError),
    /// Malformed request input, reported per field.
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    /// Parse error (failed to parse a value from string or other format).
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// Internal error indicating a bug in Huddle's code.
    #[error("Internal error: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Session error (session retrieval, storage, serialization).
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    /// Redis session store error (connection, command execution).
    #[error(transparent)]
    SessionRedisError(#[from] tower_sessions_redis_store::fred::prelude::Error),
    /// Cron scheduler error (job registration, scheduler startup).
    #[error(transparent)]
    SchedulerError(#[from] tokio_cron_scheduler::JobSchedulerError),
    /// HTTP error while fetching a news feed.
    #[error(transparent)]
    FeedRequestError(#[from] reqwest::Error),
    /// News feed could not be parsed as RSS.
    #[error(transparent)]
    FeedParseError(#[from] rss::Error),
    /// Player name pattern could not be compiled.
    #[error(transparent)]
    RegexError(#[from] regex::Error),
}

/// Maps domain errors to their own responses and everything else to a generic 500.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::ProviderError(err) => err.into_response(),
            Self::TradeError(err) => err.into_response(),
            Self::ValidationError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error and returns a generic message so implementation details never reach the
/// client.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}

/// Builds a JSON error response with a stable user-facing message.
pub(crate) fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorDto {
            error: message.to_string(),
        }),
    )
        .into_response()
}
