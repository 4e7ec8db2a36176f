use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::{
    model::news::{CronFailureDto, CronSuccessDto},
    server::{model::app::AppState, service::news::NewsService},
};

pub static CRON_TAG: &str = "cron";

type HmacSha256 = Hmac<Sha256>;

/// Whether the request carries `Authorization: Bearer {secret}`.
///
/// Always true in development, never true without a configured secret otherwise.
pub fn is_cron_authorized(headers: &HeaderMap, secret: Option<&str>, development: bool) -> bool {
    if development {
        return true;
    }

    let Some(secret) = secret else {
        return false;
    };

    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|token| secret_matches(token, secret))
}

/// Compares both values through an HMAC keyed by the secret so the check runs in constant time.
fn secret_matches(token: &str, secret: &str) -> bool {
    let keyed = |message: &str| {
        HmacSha256::new_from_slice(secret.as_bytes())
            .ok()
            .map(|mut mac| {
                mac.update(message.as_bytes());
                mac
            })
    };

    let Some(expected) = keyed(secret).map(|mac| mac.finalize().into_bytes()) else {
        return false;
    };

    keyed(token).is_some_and(|mac| mac.verify_slice(&expected).is_ok())
}

/// Ingest player news from every configured feed
#[utoipa::path(
    get,
    path = "/api/cron/news",
    tag = CRON_TAG,
    responses(
        (status = 200, description = "Ingestion finished", body = CronSuccessDto),
        (status = 401, description = "Missing or wrong cron secret"),
        (status = 500, description = "Ingestion failed", body = CronFailureDto)
    ),
)]
pub async fn run_news_ingestion(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if !is_cron_authorized(&headers, state.cron_secret.as_deref(), state.development) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    match NewsService::new(&state.db, &state.http, &state.feed_urls)
        .ingest(None)
        .await
    {
        Ok(result) => (
            StatusCode::OK,
            Json(CronSuccessDto {
                success: true,
                result,
                timestamp: Utc::now(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("News ingestion failed: {}", e);

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(CronFailureDto {
                    success: false,
                    error: "News ingestion failed".to_string(),
                }),
            )
                .into_response()
        }
    }
}
