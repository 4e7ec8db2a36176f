//! Tests for the notification endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use huddle::{
    model::{
        notification::{MarkReadDto, NotificationListDto},
        trade::{CreateTradeDto, TradeAsset, TradeDto, TradeScopeDto},
    },
    server::controller::{
        notification::{
            list_notifications, mark_all_notifications_read, mark_notification_read,
        },
        trade::create_trade,
    },
};
use serde_json::Value;

use super::*;

/// Has bob make an offer on a listing of alice's, which notifies alice.
async fn offer_on_alice_listing(setup: &Setup) -> Result<TradeDto, TestError> {
    let listing = setup
        .test
        .trade()
        .insert_listing(setup.alice, setup.alice_player)
        .await?;
    setup.sign_in(setup.bob).await;

    let (player_id, from_team_id) = setup.bob_player;
    let response = create_trade(
        State(setup.test.to_app_state()),
        setup.test.session.clone(),
        Json(CreateTradeDto {
            scope: TradeScopeDto::Direct,
            target_user_id: Some(setup.alice),
            parent_trade_id: Some(listing.id),
            offered_assets: vec![TradeAsset::Player {
                player_id,
                from_team_id,
            }],
            requested_assets: Vec::new(),
            message: None,
        }),
    )
    .await
    .into_response();
    assert_eq!(response.status(), StatusCode::CREATED);

    Ok(json_body(response).await)
}

/// Expect the offer notification to be listed as unread and marking it read to return its link
#[tokio::test]
async fn lists_and_marks_read() -> Result<(), TestError> {
    let setup = Setup::new().await?;
    let offer = offer_on_alice_listing(&setup).await?;
    setup.sign_in(setup.alice).await;
    let state = setup.test.to_app_state();

    let response = list_notifications(State(state.clone()), setup.test.session.clone())
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::OK);
    let list: NotificationListDto = json_body(response).await;
    assert_eq!(list.unread_count, 1);
    assert_eq!(list.notifications.len(), 1);

    let notification_id = list.notifications[0].id;
    let response = mark_notification_read(
        State(state.clone()),
        setup.test.session.clone(),
        Path(notification_id),
    )
    .await
    .into_response();
    assert_eq!(response.status(), StatusCode::OK);
    let marked: MarkReadDto = json_body(response).await;
    assert_eq!(marked.link, Some(format!("/trades/{}", offer.id)));

    let response = list_notifications(State(state), setup.test.session.clone())
        .await
        .into_response();
    let list: NotificationListDto = json_body(response).await;
    assert_eq!(list.unread_count, 0);

    Ok(())
}

/// Expect 404 when marking another user's notification
#[tokio::test]
async fn cannot_mark_foreign_notification() -> Result<(), TestError> {
    let setup = Setup::new().await?;
    offer_on_alice_listing(&setup).await?;
    let state = setup.test.to_app_state();

    setup.sign_in(setup.alice).await;
    let response = list_notifications(State(state.clone()), setup.test.session.clone())
        .await
        .into_response();
    let list: NotificationListDto = json_body(response).await;

    setup.sign_in(setup.bob).await;
    let result = mark_notification_read(
        State(state),
        setup.test.session.clone(),
        Path(list.notifications[0].id),
    )
    .await;

    assert_eq!(result.into_response().status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect mark-all to report how many notifications changed
#[tokio::test]
async fn marks_all_read() -> Result<(), TestError> {
    let setup = Setup::new().await?;
    offer_on_alice_listing(&setup).await?;
    setup.sign_in(setup.alice).await;
    let state = setup.test.to_app_state();

    let response = mark_all_notifications_read(State(state.clone()), setup.test.session.clone())
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response).await;
    assert_eq!(body["updated"], Value::from(1));

    let response = mark_all_notifications_read(State(state), setup.test.session.clone())
        .await
        .into_response();
    let body: Value = json_body(response).await;
    assert_eq!(body["updated"], Value::from(0));

    Ok(())
}
