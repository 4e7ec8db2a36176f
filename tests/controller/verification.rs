//! Tests for the proposal URL and trade verification endpoints.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use huddle::{
    model::verification::{
        ProposalUrlDto, ProposalUrlRequestDto, TradeAction, VerificationRequestDto,
        VerificationResultDto,
    },
    server::controller::verification::{get_proposal_url, verify_trade},
};

use super::*;

/// Expect a Yahoo proposal URL along with the request to verify it with
#[tokio::test]
async fn builds_proposal_url() -> Result<(), TestError> {
    let setup = Setup::new().await?;
    setup.sign_in(setup.alice).await;

    let response = get_proposal_url(
        State(setup.test.to_app_state()),
        setup.test.session.clone(),
        Json(ProposalUrlRequestDto {
            source_team_id: setup.alice_player.1,
            target_team_id: setup.bob_player.1,
            offered_player_ids: vec![setup.alice_player.0],
            requested_player_ids: vec![setup.bob_player.0],
        }),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::OK);
    let proposal: ProposalUrlDto = json_body(response).await;
    assert!(proposal.url.starts_with("https://"));
    assert_eq!(proposal.verification.league_id, setup.league_id);
    let TradeAction::Propose {
        source_team_key,
        target_team_key,
        player_keys,
        not_before,
    } = proposal.verification.action
    else {
        panic!("expected a Propose action");
    };
    assert_eq!(source_team_key, "466.l.1.t.1");
    assert_eq!(target_team_key, "466.l.1.t.2");
    assert_eq!(player_keys, vec!["466.p.1", "466.p.2"]);
    assert!(not_before.is_some());

    Ok(())
}

/// Expect 422 for a proposal without offered players
#[tokio::test]
async fn proposal_requires_offered_players() -> Result<(), TestError> {
    let setup = Setup::new().await?;
    setup.sign_in(setup.alice).await;

    let result = get_proposal_url(
        State(setup.test.to_app_state()),
        setup.test.session.clone(),
        Json(ProposalUrlRequestDto {
            source_team_id: setup.alice_player.1,
            target_team_id: setup.bob_player.1,
            offered_player_ids: Vec::new(),
            requested_player_ids: vec![setup.bob_player.0],
        }),
    )
    .await;

    assert_eq!(result.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);

    Ok(())
}

/// Expect a fresh pending Yahoo trade with the proposed players to verify the proposal
#[tokio::test]
async fn verifies_pending_proposal() -> Result<(), TestError> {
    let mut setup = Setup::new().await?;
    let issued_at = Utc::now().timestamp();
    let pending = [MockTransaction::pending("466.l.1.pt.3", "466.l.1.t.1", "466.l.1.t.2")
        .at(issued_at + 10)
        .moving("466.p.1", "466.l.1.t.1", "466.l.1.t.2")
        .moving("466.p.2", "466.l.1.t.2", "466.l.1.t.1")];
    let pending_endpoint = setup.test.yahoo().create_pending_trades_endpoint(
        "466.l.1",
        "466.l.1.t.1",
        &pending,
        1,
    );
    let completed_endpoint = setup
        .test
        .yahoo()
        .create_transactions_endpoint("466.l.1", &[], 1);
    setup.sign_in(setup.alice).await;

    let response = verify_trade(
        State(setup.test.to_app_state()),
        setup.test.session.clone(),
        Json(VerificationRequestDto {
            league_id: setup.league_id,
            action: TradeAction::Propose {
                source_team_key: "466.l.1.t.1".to_string(),
                target_team_key: "466.l.1.t.2".to_string(),
                player_keys: vec!["466.p.2".to_string(), "466.p.1".to_string()],
                not_before: Some(issued_at),
            },
        }),
    )
    .await
    .into_response();

    pending_endpoint.assert();
    completed_endpoint.assert();
    assert_eq!(response.status(), StatusCode::OK);
    let result: VerificationResultDto = json_body(response).await;
    assert!(result.matched);
    assert_eq!(result.yahoo_trade_id.as_deref(), Some("466.l.1.pt.3"));

    Ok(())
}

/// Expect an unmatched result while Yahoo does not show the trade yet
#[tokio::test]
async fn reports_unmatched_until_yahoo_catches_up() -> Result<(), TestError> {
    let mut setup = Setup::new().await?;
    let pending_endpoint = setup.test.yahoo().create_pending_trades_endpoint(
        "466.l.1",
        "466.l.1.t.1",
        &[],
        1,
    );
    let completed_endpoint = setup
        .test
        .yahoo()
        .create_transactions_endpoint("466.l.1", &[], 1);
    setup.sign_in(setup.alice).await;

    let response = verify_trade(
        State(setup.test.to_app_state()),
        setup.test.session.clone(),
        Json(VerificationRequestDto {
            league_id: setup.league_id,
            action: TradeAction::Accept {
                yahoo_trade_id: "466.l.1.pt.3".to_string(),
            },
        }),
    )
    .await
    .into_response();

    pending_endpoint.assert();
    completed_endpoint.assert();
    assert_eq!(response.status(), StatusCode::OK);
    let result: VerificationResultDto = json_body(response).await;
    assert!(!result.matched);
    assert_eq!(result.yahoo_trade_id, None);

    Ok(())
}
