use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use entity::sea_orm_active_enums::TradeStatus;
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum TradeError {
    #[error("Trade ID {0:?} not found")]
    NotFound(i32),
    #[error("User ID {user_id:?} is not allowed to {action} trade ID {trade_id:?}")]
    Forbidden {
        trade_id: i32,
        user_id: i32,
        action: &'static str,
    },
    #[error("Trade ID {trade_id:?} cannot be changed from status {status:?}")]
    InvalidState { trade_id: i32, status: TradeStatus },
    #[error("{0} not found")]
    RecordNotFound(String),
    #[error("User ID {user_id:?} does not manage team ID {team_id:?}")]
    NotTeamManager { team_id: i32, user_id: i32 },
    #[error("User ID {user_id:?} manages no team in league ID {league_id:?}")]
    NotInLeague { league_id: i32, user_id: i32 },
}

impl IntoResponse for TradeError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::NotFound(_) => error_response(StatusCode::NOT_FOUND, "Trade not found"),
            Self::RecordNotFound(_) => error_response(StatusCode::NOT_FOUND, "Not found"),
            Self::Forbidden { .. } => error_response(
                StatusCode::FORBIDDEN,
                "You are not allowed to perform this action on this trade",
            ),
            Self::InvalidState { .. } => error_response(
                StatusCode::CONFLICT,
                "This trade is no longer open",
            ),
            Self::NotTeamManager { .. } => {
                error_response(StatusCode::FORBIDDEN, "You do not manage this team")
            }
            Self::NotInLeague { .. } => {
                error_response(StatusCode::FORBIDDEN, "You do not have a team in this league")
            }
        }
    }
}
