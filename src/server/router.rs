//! HTTP routing and OpenAPI documentation.
//!
//! Every endpoint is registered with its utoipa path specification so the collected OpenAPI
//! document always matches the served routes. Swagger UI is served at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// # Registered Endpoints
/// - `GET /api/cron/news` - Run news ingestion, requires the cron secret outside development
/// - `POST /api/trades` - Create a listing, direct trade or offer
/// - `GET /api/trades/dashboard` - Listings, offers received and offers sent
/// - `POST /api/trades/{id}/accept`, `/reject`, `/cancel` - Trade status changes
/// - `POST /api/trades/proposal-url` - Yahoo proposal page URL
/// - `POST /api/trades/verify` - Poll Yahoo for the outcome of a trade action
/// - `POST /api/leagues/{id}/sync-trades` - Mirror a league's Yahoo trades
/// - `POST /api/teams/{id}/sync-roster` - Sync a team roster from Yahoo
/// - `GET /api/notifications` - Recent notifications
/// - `POST /api/notifications/{id}/read`, `POST /api/notifications/read-all` - Mark as read
///
/// The OpenAPI specification is served at `/api/docs/openapi.json`.
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Huddle", description = "Huddle API"), tags(
        (name = controller::cron::CRON_TAG, description = "Scheduled job triggers"),
        (name = controller::trade::TRADE_TAG, description = "Marketplace trades"),
        (name = controller::verification::VERIFICATION_TAG, description = "Yahoo trade proposal and verification"),
        (name = controller::sync::SYNC_TAG, description = "Yahoo trade and roster sync"),
        (name = controller::notification::NOTIFICATION_TAG, description = "User notifications"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::cron::run_news_ingestion))
        .routes(routes!(controller::trade::create_trade))
        .routes(routes!(controller::trade::get_dashboard))
        .routes(routes!(controller::trade::accept_trade))
        .routes(routes!(controller::trade::reject_trade))
        .routes(routes!(controller::trade::cancel_trade))
        .routes(routes!(controller::verification::get_proposal_url))
        .routes(routes!(controller::verification::verify_trade))
        .routes(routes!(controller::sync::sync_league_trades))
        .routes(routes!(controller::sync::sync_team_roster))
        .routes(routes!(controller::notification::list_notifications))
        .routes(routes!(controller::notification::mark_notification_read))
        .routes(routes!(controller::notification::mark_all_notifications_read))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
