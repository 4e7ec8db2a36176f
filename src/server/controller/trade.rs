use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, ValidationErrorDto},
        trade::{CreateTradeDto, TradeDashboardDto, TradeDto},
    },
    server::{
        controller::util::get_user::get_user_from_session, error::Error,
        model::app::AppState, service::trade::TradeService,
    },
};

pub static TRADE_TAG: &str = "trade";

/// Create a marketplace listing, a direct trade, or an offer on a listing
#[utoipa::path(
    post,
    path = "/api/trades",
    tag = TRADE_TAG,
    request_body = CreateTradeDto,
    responses(
        (status = 201, description = "Trade created", body = TradeDto),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 422, description = "Invalid request fields", body = ValidationErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_trade(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<CreateTradeDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let trade = TradeService::new(&state.db).create(user.id, request).await?;

    Ok((StatusCode::CREATED, Json(trade)))
}

/// Open listings with their offers, and the trades the user sent and received
#[utoipa::path(
    get,
    path = "/api/trades/dashboard",
    tag = TRADE_TAG,
    responses(
        (status = 200, description = "Trade dashboard", body = TradeDashboardDto),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let dashboard = TradeService::new(&state.db).dashboard(user.id).await?;

    Ok((StatusCode::OK, Json(dashboard)))
}

/// Accept a trade addressed to the user
#[utoipa::path(
    post,
    path = "/api/trades/{id}/accept",
    tag = TRADE_TAG,
    params(("id" = i32, Path, description = "Trade ID")),
    responses(
        (status = 200, description = "Trade accepted", body = TradeDto),
        (status = 403, description = "Not the trade's target", body = ErrorDto),
        (status = 404, description = "Trade not found", body = ErrorDto),
        (status = 409, description = "Trade is no longer open", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn accept_trade(
    State(state): State<AppState>,
    session: Session,
    Path(trade_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let trade = TradeService::new(&state.db).accept(user.id, trade_id).await?;

    Ok((StatusCode::OK, Json(trade)))
}

/// Reject a trade addressed to the user
#[utoipa::path(
    post,
    path = "/api/trades/{id}/reject",
    tag = TRADE_TAG,
    params(("id" = i32, Path, description = "Trade ID")),
    responses(
        (status = 200, description = "Trade rejected", body = TradeDto),
        (status = 403, description = "Not the trade's target", body = ErrorDto),
        (status = 404, description = "Trade not found", body = ErrorDto),
        (status = 409, description = "Trade is no longer open", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn reject_trade(
    State(state): State<AppState>,
    session: Session,
    Path(trade_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let trade = TradeService::new(&state.db).reject(user.id, trade_id).await?;

    Ok((StatusCode::OK, Json(trade)))
}

/// Withdraw a trade the user initiated
#[utoipa::path(
    post,
    path = "/api/trades/{id}/cancel",
    tag = TRADE_TAG,
    params(("id" = i32, Path, description = "Trade ID")),
    responses(
        (status = 200, description = "Trade cancelled", body = TradeDto),
        (status = 403, description = "Not the trade's initiator", body = ErrorDto),
        (status = 404, description = "Trade not found", body = ErrorDto),
        (status = 409, description = "Trade is no longer open", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn cancel_trade(
    State(state): State<AppState>,
    session: Session,
    Path(trade_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let trade = TradeService::new(&state.db).cancel(user.id, trade_id).await?;

    Ok((StatusCode::OK, Json(trade)))
}
