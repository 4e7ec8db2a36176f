use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        sync::{RosterSyncDto, TradeSyncDto},
    },
    server::{
        controller::util::get_user::get_user_from_session,
        error::Error,
        model::app::AppState,
        service::sync::{roster::RosterSyncService, TradeSyncService},
    },
};

pub static SYNC_TAG: &str = "sync";

/// Mirror the league's completed Yahoo trades
#[utoipa::path(
    post,
    path = "/api/leagues/{id}/sync-trades",
    tag = SYNC_TAG,
    params(("id" = i32, Path, description = "League ID")),
    responses(
        (status = 200, description = "Trades mirrored", body = TradeSyncDto),
        (status = 403, description = "Yahoo account not linked or no team in the league", body = ErrorDto),
        (status = 404, description = "League not found", body = ErrorDto),
        (status = 502, description = "Yahoo could not be reached", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn sync_league_trades(
    State(state): State<AppState>,
    session: Session,
    Path(league_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let result = TradeSyncService::new(&state.db, &state.provider, &state.oauth)
        .sync_league(user.id, league_id)
        .await?;

    Ok((StatusCode::OK, Json(result)))
}

/// Replace the team's roster with the one listed on Yahoo
#[utoipa::path(
    post,
    path = "/api/teams/{id}/sync-roster",
    tag = SYNC_TAG,
    params(("id" = i32, Path, description = "Team ID")),
    responses(
        (status = 200, description = "Roster synced", body = RosterSyncDto),
        (status = 403, description = "Yahoo account not linked or team managed by someone else", body = ErrorDto),
        (status = 404, description = "Team not found", body = ErrorDto),
        (status = 502, description = "Yahoo could not be reached", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn sync_team_roster(
    State(state): State<AppState>,
    session: Session,
    Path(team_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let result = RosterSyncService::new(&state.db, &state.provider, &state.oauth)
        .sync_team(user.id, team_id)
        .await?;

    Ok((StatusCode::OK, Json(result)))
}
