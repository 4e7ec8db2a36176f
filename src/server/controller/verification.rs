use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, ValidationErrorDto},
        verification::{
            ProposalUrlDto, ProposalUrlRequestDto, VerificationRequestDto, VerificationResultDto,
        },
    },
    server::{
        controller::util::get_user::get_user_from_session,
        error::Error,
        model::app::AppState,
        service::{proposal::ProposalService, verification::VerificationService},
    },
};

pub static VERIFICATION_TAG: &str = "verification";

/// Build the Yahoo page URL where the user submits a trade proposal
#[utoipa::path(
    post,
    path = "/api/trades/proposal-url",
    tag = VERIFICATION_TAG,
    request_body = ProposalUrlRequestDto,
    responses(
        (status = 200, description = "Proposal URL and the request to verify it with", body = ProposalUrlDto),
        (status = 403, description = "User does not manage the source team", body = ErrorDto),
        (status = 404, description = "Team or player not found", body = ErrorDto),
        (status = 422, description = "Invalid request fields", body = ValidationErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_proposal_url(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<ProposalUrlRequestDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let proposal = ProposalService::new(&state.db)
        .proposal_url(user.id, request)
        .await?;

    Ok((StatusCode::OK, Json(proposal)))
}

/// Check whether Yahoo reflects a trade action the user took on Yahoo's pages
#[utoipa::path(
    post,
    path = "/api/trades/verify",
    tag = VERIFICATION_TAG,
    request_body = VerificationRequestDto,
    responses(
        (status = 200, description = "Verification outcome, `matched` is false until Yahoo reflects the action", body = VerificationResultDto),
        (status = 403, description = "Yahoo account not linked or no team in the league", body = ErrorDto),
        (status = 502, description = "Yahoo could not be reached", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn verify_trade(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<VerificationRequestDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let result = VerificationService::new(&state.db, &state.provider, &state.oauth)
        .verify(user.id, request)
        .await?;

    Ok((StatusCode::OK, Json(result)))
}
