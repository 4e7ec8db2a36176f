use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("User ID is not present in session")]
    UserNotInSession,
    #[error("User ID {0:?} not found in database despite having an active session")]
    UserNotInDatabase(i32),
    /// No Yahoo account is linked, or the linked account is missing token fields.
    #[error("User ID {0:?} has no usable Yahoo account linked")]
    ProviderNotLinked(i32),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::UserNotInSession | Self::UserNotInDatabase(_) => {
                error_response(StatusCode::UNAUTHORIZED, "You need to sign in first")
            }
            Self::ProviderNotLinked(_) => error_response(
                StatusCode::FORBIDDEN,
                "Link your Yahoo account to continue",
            ),
        }
    }
}
