use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        notification::{MarkReadDto, NotificationListDto},
    },
    server::{
        controller::util::get_user::get_user_from_session, error::Error,
        model::app::AppState, service::notification::NotificationService,
    },
};

pub static NOTIFICATION_TAG: &str = "notification";

#[derive(Serialize, utoipa::ToSchema)]
pub struct MarkAllReadDto {
    /// Notifications that were unread before the call
    pub updated: u64,
}

/// Most recent notifications of the user with the unread count
#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = NOTIFICATION_TAG,
    responses(
        (status = 200, description = "Notifications, most recent first", body = NotificationListDto),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let notifications = NotificationService::new(&state.db).list(user.id).await?;

    Ok((StatusCode::OK, Json(notifications)))
}

/// Mark a notification as read and return the link it points to
#[utoipa::path(
    post,
    path = "/api/notifications/{id}/read",
    tag = NOTIFICATION_TAG,
    params(("id" = i32, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Notification marked as read", body = MarkReadDto),
        (status = 404, description = "Notification not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn mark_notification_read(
    State(state): State<AppState>,
    session: Session,
    Path(notification_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let result = NotificationService::new(&state.db)
        .mark_read(user.id, notification_id)
        .await?;

    Ok((StatusCode::OK, Json(result)))
}

/// Mark every notification of the user as read
#[utoipa::path(
    post,
    path = "/api/notifications/read-all",
    tag = NOTIFICATION_TAG,
    responses(
        (status = 200, description = "Notifications marked as read", body = MarkAllReadDto),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn mark_all_notifications_read(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let updated = NotificationService::new(&state.db)
        .mark_all_read(user.id)
        .await?;

    Ok((StatusCode::OK, Json(MarkAllReadDto { updated })))
}
