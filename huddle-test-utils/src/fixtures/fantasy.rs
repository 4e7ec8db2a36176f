use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue};

use crate::{error::TestError, TestContext};

pub struct FantasyFixtures<'a> {
    setup: &'a TestContext,
}

impl TestContext {
    pub fn fantasy(&self) -> FantasyFixtures<'_> {
        FantasyFixtures { setup: self }
    }
}

impl<'a> FantasyFixtures<'a> {
    /// Inserts a game for the sport `code`, e.g. `nba`.
    pub async fn insert_game(
        &self,
        game_key: &str,
        code: &str,
    ) -> Result<entity::fantasy_game::Model, TestError> {
        let game = entity::fantasy_game::ActiveModel {
            game_key: ActiveValue::Set(game_key.to_string()),
            code: ActiveValue::Set(code.to_string()),
            season: ActiveValue::Set(2025),
            ..Default::default()
        };

        Ok(game.insert(&self.setup.db).await?)
    }

    pub async fn insert_league(
        &self,
        game_id: i32,
        league_key: &str,
    ) -> Result<entity::fantasy_league::Model, TestError> {
        let league = entity::fantasy_league::ActiveModel {
            game_id: ActiveValue::Set(game_id),
            league_key: ActiveValue::Set(league_key.to_string()),
            name: ActiveValue::Set(format!("League {}", league_key)),
            ..Default::default()
        };

        Ok(league.insert(&self.setup.db).await?)
    }

    /// Inserts an `nba` game and a league with key `league_key`.
    pub async fn insert_nba_league(
        &self,
        league_key: &str,
    ) -> Result<entity::fantasy_league::Model, TestError> {
        let game_key = league_key.split('.').next().unwrap_or("466");
        let game = self.insert_game(game_key, "nba").await?;

        self.insert_league(game.id, league_key).await
    }

    pub async fn insert_team(
        &self,
        league_id: i32,
        manager_id: Option<i32>,
        team_key: &str,
    ) -> Result<entity::fantasy_team::Model, TestError> {
        let team = entity::fantasy_team::ActiveModel {
            league_id: ActiveValue::Set(league_id),
            manager_id: ActiveValue::Set(manager_id),
            team_key: ActiveValue::Set(team_key.to_string()),
            name: ActiveValue::Set(format!("Team {}", team_key)),
            ..Default::default()
        };

        Ok(team.insert(&self.setup.db).await?)
    }

    pub async fn insert_player(
        &self,
        player_key: &str,
        full_name: &str,
    ) -> Result<entity::fantasy_player::Model, TestError> {
        let player = entity::fantasy_player::ActiveModel {
            player_key: ActiveValue::Set(player_key.to_string()),
            full_name: ActiveValue::Set(full_name.to_string()),
            position: ActiveValue::Set(None),
            status: ActiveValue::Set(None),
            projected_points: ActiveValue::Set(None),
            fantasy_points: ActiveValue::Set(None),
            percent_owned: ActiveValue::Set(None),
            stats: ActiveValue::Set(None),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        Ok(player.insert(&self.setup.db).await?)
    }

    /// Puts a player on a team's roster.
    pub async fn insert_roster_entry(
        &self,
        team_id: i32,
        player_id: i32,
    ) -> Result<entity::fantasy_team_player::Model, TestError> {
        let entry = entity::fantasy_team_player::ActiveModel {
            team_id: ActiveValue::Set(team_id),
            player_id: ActiveValue::Set(player_id),
            ..Default::default()
        };

        Ok(entry.insert(&self.setup.db).await?)
    }

    /// Inserts a player and puts them on the roster of `team_id`.
    pub async fn insert_rostered_player(
        &self,
        team_id: i32,
        player_key: &str,
        full_name: &str,
    ) -> Result<entity::fantasy_player::Model, TestError> {
        let player = self.insert_player(player_key, full_name).await?;
        self.insert_roster_entry(team_id, player.id).await?;

        Ok(player)
    }

    pub async fn insert_follow(
        &self,
        user_id: i32,
        player_id: i32,
    ) -> Result<entity::player_follow::Model, TestError> {
        let follow = entity::player_follow::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            player_id: ActiveValue::Set(player_id),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        Ok(follow.insert(&self.setup.db).await?)
    }
}
