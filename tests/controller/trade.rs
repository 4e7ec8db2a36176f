//! Tests for the marketplace trade endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use huddle::{
    model::trade::{CreateTradeDto, TradeAsset, TradeDashboardDto, TradeDto, TradeScopeDto, TradeStatusDto},
    server::controller::trade::{
        accept_trade, cancel_trade, create_trade, get_dashboard, reject_trade,
    },
};

use super::*;

fn player((player_id, from_team_id): (i32, i32)) -> TradeAsset {
    TradeAsset::Player {
        player_id,
        from_team_id,
    }
}

fn offer_on(listing_id: i32, initiator_asset: (i32, i32), target: i32) -> CreateTradeDto {
    CreateTradeDto {
        scope: TradeScopeDto::Direct,
        target_user_id: Some(target),
        parent_trade_id: Some(listing_id),
        offered_assets: vec![player(initiator_asset)],
        requested_assets: Vec::new(),
        message: Some("Interested?".to_string()),
    }
}

/// Expect 401 when nobody is signed in
#[tokio::test]
async fn requires_sign_in() -> Result<(), TestError> {
    let setup = Setup::new().await?;

    let result = get_dashboard(State(setup.test.to_app_state()), setup.test.session.clone()).await;

    assert_eq!(result.into_response().status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Expect a listing to be created with 201 and show up on the owner's dashboard
#[tokio::test]
async fn creates_listing() -> Result<(), TestError> {
    let setup = Setup::new().await?;
    setup.sign_in(setup.alice).await;
    let state = setup.test.to_app_state();

    let response = create_trade(
        State(state.clone()),
        setup.test.session.clone(),
        Json(CreateTradeDto {
            scope: TradeScopeDto::Marketplace,
            target_user_id: None,
            parent_trade_id: None,
            offered_assets: vec![player(setup.alice_player)],
            requested_assets: Vec::new(),
            message: None,
        }),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::CREATED);
    let listing: TradeDto = json_body(response).await;
    assert_eq!(listing.status, TradeStatusDto::Open);

    let response = get_dashboard(State(state), setup.test.session.clone())
        .await
        .into_response();
    let dashboard: TradeDashboardDto = json_body(response).await;
    assert_eq!(dashboard.listings.len(), 1);
    assert_eq!(dashboard.listings[0].listing.id, listing.id);

    Ok(())
}

/// Expect 422 when offering a player the user does not own
#[tokio::test]
async fn rejects_unowned_assets() -> Result<(), TestError> {
    let setup = Setup::new().await?;
    setup.sign_in(setup.alice).await;

    let result = create_trade(
        State(setup.test.to_app_state()),
        setup.test.session.clone(),
        Json(CreateTradeDto {
            scope: TradeScopeDto::Direct,
            target_user_id: Some(setup.bob),
            parent_trade_id: None,
            offered_assets: vec![player(setup.bob_player)],
            requested_assets: Vec::new(),
            message: None,
        }),
    )
    .await;

    assert_eq!(result.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);

    Ok(())
}

/// Expect the listing owner to accept an offer and the listing to be resolved with it
#[tokio::test]
async fn accepting_offer_resolves_listing() -> Result<(), TestError> {
    let setup = Setup::new().await?;
    let listing = setup
        .test
        .trade()
        .insert_listing(setup.alice, setup.alice_player)
        .await?;
    setup.sign_in(setup.bob).await;
    let state = setup.test.to_app_state();

    let response = create_trade(
        State(state.clone()),
        setup.test.session.clone(),
        Json(offer_on(listing.id, setup.bob_player, setup.alice)),
    )
    .await
    .into_response();
    assert_eq!(response.status(), StatusCode::CREATED);
    let offer: TradeDto = json_body(response).await;

    setup.sign_in(setup.alice).await;
    let response = accept_trade(State(state.clone()), setup.test.session.clone(), Path(offer.id))
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::OK);
    let accepted: TradeDto = json_body(response).await;
    assert_eq!(accepted.status, TradeStatusDto::Accepted);

    let response = get_dashboard(State(state), setup.test.session.clone())
        .await
        .into_response();
    let dashboard: TradeDashboardDto = json_body(response).await;
    assert!(dashboard.listings.is_empty());
    assert!(dashboard.offers_received.is_empty());

    Ok(())
}

/// Expect only the target to reject and only the initiator to cancel
#[tokio::test]
async fn enforces_party_roles() -> Result<(), TestError> {
    let setup = Setup::new().await?;
    let trade = setup
        .test
        .trade()
        .insert_direct(setup.alice, setup.bob, setup.alice_player)
        .await?;
    let state = setup.test.to_app_state();

    setup.sign_in(setup.alice).await;
    let result = reject_trade(State(state.clone()), setup.test.session.clone(), Path(trade.id)).await;
    assert_eq!(result.into_response().status(), StatusCode::FORBIDDEN);

    setup.sign_in(setup.bob).await;
    let result = cancel_trade(State(state.clone()), setup.test.session.clone(), Path(trade.id)).await;
    assert_eq!(result.into_response().status(), StatusCode::FORBIDDEN);

    let response = reject_trade(State(state.clone()), setup.test.session.clone(), Path(trade.id))
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::OK);

    let result = reject_trade(State(state), setup.test.session.clone(), Path(trade.id)).await;
    assert_eq!(result.into_response().status(), StatusCode::CONFLICT);

    Ok(())
}

/// Expect 404 for a trade that does not exist
#[tokio::test]
async fn unknown_trade_is_not_found() -> Result<(), TestError> {
    let setup = Setup::new().await?;
    setup.sign_in(setup.bob).await;

    let result = accept_trade(
        State(setup.test.to_app_state()),
        setup.test.session.clone(),
        Path(999),
    )
    .await;

    assert_eq!(result.into_response().status(), StatusCode::NOT_FOUND);

    Ok(())
}
