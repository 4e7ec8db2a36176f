//! Tests for the Yahoo trade and roster sync endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use huddle::{
    model::sync::{RosterSyncDto, TradeSyncDto},
    server::controller::sync::{sync_league_trades, sync_team_roster},
};

use super::*;

/// Expect repeated syncs to mirror each Yahoo trade once
#[tokio::test]
async fn league_sync_is_idempotent() -> Result<(), TestError> {
    let mut setup = Setup::new().await?;
    let transactions = [MockTransaction::trade("466.l.1.tr.1", "466.l.1.t.1", "466.l.1.t.2")
        .moving("466.p.1", "466.l.1.t.1", "466.l.1.t.2")];
    let endpoint = setup
        .test
        .yahoo()
        .create_transactions_endpoint("466.l.1", &transactions, 2);
    setup.sign_in(setup.alice).await;
    let state = setup.test.to_app_state();

    let response = sync_league_trades(State(state.clone()), setup.test.session.clone(), Path(setup.league_id))
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::OK);
    let first: TradeSyncDto = json_body(response).await;

    let response = sync_league_trades(State(state), setup.test.session.clone(), Path(setup.league_id))
        .await
        .into_response();
    let second: TradeSyncDto = json_body(response).await;

    endpoint.assert();
    assert_eq!(first.inserted, 1);
    assert_eq!((second.inserted, second.skipped), (0, 1));

    Ok(())
}

/// Expect 403 when the user has no team in the league
#[tokio::test]
async fn league_sync_requires_membership() -> Result<(), TestError> {
    let setup = Setup::new().await?;
    let outsider = setup.test.user().insert_linked_user("carol").await?;
    setup.sign_in(outsider.id).await;

    let result = sync_league_trades(
        State(setup.test.to_app_state()),
        setup.test.session.clone(),
        Path(setup.league_id),
    )
    .await;

    assert_eq!(result.into_response().status(), StatusCode::FORBIDDEN);

    Ok(())
}

/// Expect the team roster to be replaced with Yahoo's
#[tokio::test]
async fn syncs_managed_roster() -> Result<(), TestError> {
    let mut setup = Setup::new().await?;
    let players = [
        MockPlayer::new("466.p.1", "Luka Doncic").with_position("PG"),
        MockPlayer::new("466.p.3", "Dereck Lively II").with_position("C"),
    ];
    let endpoint = setup
        .test
        .yahoo()
        .create_roster_endpoint("466.l.1.t.1", &players, 1);
    setup.sign_in(setup.alice).await;

    let (_, team_id) = setup.alice_player;
    let response = sync_team_roster(
        State(setup.test.to_app_state()),
        setup.test.session.clone(),
        Path(team_id),
    )
    .await
    .into_response();

    endpoint.assert();
    assert_eq!(response.status(), StatusCode::OK);
    let result: RosterSyncDto = json_body(response).await;
    assert_eq!(result.team_id, team_id);
    assert_eq!(result.players, 2);

    Ok(())
}

/// Expect 403 when syncing someone else's team
#[tokio::test]
async fn roster_sync_requires_manager() -> Result<(), TestError> {
    let setup = Setup::new().await?;
    setup.sign_in(setup.alice).await;

    let (_, bob_team_id) = setup.bob_player;
    let result = sync_team_roster(
        State(setup.test.to_app_state()),
        setup.test.session.clone(),
        Path(bob_team_id),
    )
    .await;

    assert_eq!(result.into_response().status(), StatusCode::FORBIDDEN);

    Ok(())
}
