use sea_orm::DatabaseConnection;

use crate::{
    model::sync::RosterSyncDto,
    server::{
        data::{player::PlayerRepository, team::TeamRepository},
        error::{trade::TradeError, Error},
        provider::{oauth::ProviderOAuth, ProviderClient},
        service::{sync::parse::parse_roster, token::TokenService},
    },
};

pub struct RosterSyncService<'a> {
    db: &'a DatabaseConnection,
    provider: &'a ProviderClient,
    oauth: &'a ProviderOAuth,
}

impl<'a> RosterSyncService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        provider: &'a ProviderClient,
        oauth: &'a ProviderOAuth,
    ) -> Self {
        Self {
            db,
            provider,
            oauth,
        }
    }

    /// Replaces the team's roster with the one currently listed on Yahoo.
    ///
    /// Players are upserted by player key first so that roster rows always reference the
    /// latest name, position and status.
    pub async fn sync_team(&self, user_id: i32, team_id: i32) -> Result<RosterSyncDto, Error> {
        let team_repo = TeamRepository::new(self.db);

        let team = team_repo
            .get_by_id(team_id)
            .await?
            .ok_or_else(|| TradeError::RecordNotFound(format!("Team ID {}", team_id)))?;
        if team.manager_id != Some(user_id) {
            return Err(TradeError::NotTeamManager { team_id, user_id }.into());
        }

        let team_key = team.team_key.as_str();
        let payload = TokenService::new(self.db, self.oauth)
            .with_token_retry(user_id, |token| async move {
                self.provider.team_roster(&token, team_key).await
            })
            .await?;

        let observed = parse_roster(&payload);
        let players = PlayerRepository::new(self.db).upsert_many(observed).await?;
        let player_ids: Vec<i32> = players.iter().map(|p| p.id).collect();

        team_repo.replace_roster(team.id, &player_ids).await?;

        tracing::info!(team_id, players = player_ids.len(), "Synced team roster");

        Ok(RosterSyncDto {
            team_id: team.id,
            players: player_ids.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use huddle_test_utils::prelude::*;

    use crate::server::{
        data::team::TeamRepository,
        error::{trade::TradeError, Error},
        service::{sync::roster::RosterSyncService, test_util::clients},
    };

    /// Expect the roster to be replaced and existing players updated in place
    #[tokio::test]
    async fn replaces_roster() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_core_tables().build().await?;
        let user = test.user().insert_linked_user("alice").await?;
        let league = test.fantasy().insert_nba_league("466.l.1").await?;
        let team = test
            .fantasy()
            .insert_team(league.id, Some(user.id), "466.l.1.t.1")
            .await?;
        let traded_away = test
            .fantasy()
            .insert_rostered_player(team.id, "466.p.9", "Traded Away")
            .await?;
        let kept = test.fantasy().insert_player("466.p.1", "Old Name").await?;
        let endpoint = test.yahoo().create_roster_endpoint(
            "466.l.1.t.1",
            &[
                MockPlayer::new("466.p.1", "Luka Doncic").with_position("PG"),
                MockPlayer::new("466.p.2", "Kyrie Irving"),
            ],
            1,
        );

        let (provider, oauth) = clients(&test);
        let result = RosterSyncService::new(&test.db, &provider, &oauth)
            .sync_team(user.id, team.id)
            .await
            .unwrap();

        endpoint.assert();
        assert_eq!(result.players, 2);

        let roster = TeamRepository::new(&test.db)
            .get_roster_player_ids(team.id)
            .await?;
        assert_eq!(roster.len(), 2);
        assert!(roster.contains(&kept.id));
        assert!(!roster.contains(&traded_away.id));

        Ok(())
    }

    /// Expect a team managed by someone else to be refused
    #[tokio::test]
    async fn requires_team_manager() -> Result<(), TestError> {
        let test = TestBuilder::new().with_core_tables().build().await?;
        let owner = test.user().insert_linked_user("alice").await?;
        let other = test.user().insert_linked_user("bob").await?;
        let league = test.fantasy().insert_nba_league("466.l.1").await?;
        let team = test
            .fantasy()
            .insert_team(league.id, Some(owner.id), "466.l.1.t.1")
            .await?;

        let (provider, oauth) = clients(&test);
        let result = RosterSyncService::new(&test.db, &provider, &oauth)
            .sync_team(other.id, team.id)
            .await;

        assert!(matches!(
            result,
            Err(Error::TradeError(TradeError::NotTeamManager { .. }))
        ));

        Ok(())
    }
}
