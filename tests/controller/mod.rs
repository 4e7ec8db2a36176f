//! Integration tests for the HTTP controllers.
//!
//! Handlers are called directly with an in-memory session, except where routing or header
//! handling is under test, in which case requests go through the router.

mod cron;
mod notification;
mod sync;
mod trade;
mod verification;

use huddle::server::model::session::user::SessionUserId;
use huddle_test_utils::prelude::*;

use crate::util::{json_body, TestContextExt};

/// Two users in one league, each managing a team with one rostered player.
pub struct Setup {
    pub test: TestContext,
    pub alice: i32,
    pub bob: i32,
    pub league_id: i32,
    /// (player_id, team_id) on alice's team
    pub alice_player: (i32, i32),
    /// (player_id, team_id) on bob's team
    pub bob_player: (i32, i32),
}

impl Setup {
    pub async fn new() -> Result<Self, TestError> {
        let test = TestBuilder::new().with_core_tables().build().await?;
        let alice = test.user().insert_linked_user("alice").await?;
        let bob = test.user().insert_linked_user("bob").await?;
        let league = test.fantasy().insert_nba_league("466.l.1").await?;
        let alice_team = test
            .fantasy()
            .insert_team(league.id, Some(alice.id), "466.l.1.t.1")
            .await?;
        let bob_team = test
            .fantasy()
            .insert_team(league.id, Some(bob.id), "466.l.1.t.2")
            .await?;
        let alice_player = test
            .fantasy()
            .insert_rostered_player(alice_team.id, "466.p.1", "Luka Doncic")
            .await?;
        let bob_player = test
            .fantasy()
            .insert_rostered_player(bob_team.id, "466.p.2", "Kyrie Irving")
            .await?;

        Ok(Self {
            test,
            alice: alice.id,
            bob: bob.id,
            league_id: league.id,
            alice_player: (alice_player.id, alice_team.id),
            bob_player: (bob_player.id, bob_team.id),
        })
    }

    /// Signs the session in as `user_id`.
    pub async fn sign_in(&self, user_id: i32) {
        SessionUserId::insert(&self.test.session, user_id)
            .await
            .unwrap();
    }
}
