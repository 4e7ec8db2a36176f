use std::collections::BTreeSet;

use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QuerySelect,
};

use crate::server::model::yahoo::ObservedPlayer;

pub struct PlayerRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PlayerRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_many(&self, player_ids: &[i32]) -> Result<Vec<entity::fantasy_player::Model>, DbErr> {
        entity::prelude::FantasyPlayer::find()
            .filter(entity::fantasy_player::Column::Id.is_in(player_ids.iter().copied()))
            .all(self.db)
            .await
    }

    /// Inserts or updates players by `player_key`.
    pub async fn upsert_many(
        &self,
        players: Vec<ObservedPlayer>,
    ) -> Result<Vec<entity::fantasy_player::Model>, DbErr> {
        if players.is_empty() {
            return Ok(Vec::new());
        }

        let players = players
            .into_iter()
            .map(|player| entity::fantasy_player::ActiveModel {
                player_key: ActiveValue::Set(player.player_key),
                full_name: ActiveValue::Set(player.full_name),
                position: ActiveValue::Set(player.position),
                status: ActiveValue::Set(player.status),
                projected_points: ActiveValue::Set(None),
                fantasy_points: ActiveValue::Set(None),
                percent_owned: ActiveValue::Set(None),
                stats: ActiveValue::Set(None),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            });

        entity::prelude::FantasyPlayer::insert_many(players)
            .on_conflict(
                OnConflict::column(entity::fantasy_player::Column::PlayerKey)
                    .update_columns([
                        entity::fantasy_player::Column::FullName,
                        entity::fantasy_player::Column::Position,
                        entity::fantasy_player::Column::Status,
                        entity::fantasy_player::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(self.db)
            .await
    }

    /// Players whose news is worth ingesting.
    ///
    /// With `user_id` set: players on that user's teams or followed by them. Without: every
    /// player on any roster or followed by anyone.
    pub async fn get_priority_players(
        &self,
        user_id: Option<i32>,
    ) -> Result<Vec<entity::fantasy_player::Model>, DbErr> {
        let mut roster_query = entity::prelude::FantasyTeamPlayer::find()
            .select_only()
            .column(entity::fantasy_team_player::Column::PlayerId);
        let mut follow_query = entity::prelude::PlayerFollow::find()
            .select_only()
            .column(entity::player_follow::Column::PlayerId);

        if let Some(user_id) = user_id {
            let team_ids: Vec<i32> = entity::prelude::FantasyTeam::find()
                .select_only()
                .column(entity::fantasy_team::Column::Id)
                .filter(entity::fantasy_team::Column::ManagerId.eq(user_id))
                .into_tuple::<i32>()
                .all(self.db)
                .await?;

            roster_query =
                roster_query.filter(entity::fantasy_team_player::Column::TeamId.is_in(team_ids));
            follow_query = follow_query.filter(entity::player_follow::Column::UserId.eq(user_id));
        }

        let mut player_ids: BTreeSet<i32> = roster_query
            .into_tuple::<i32>()
            .all(self.db)
            .await?
            .into_iter()
            .collect();
        player_ids.extend(follow_query.into_tuple::<i32>().all(self.db).await?);

        if player_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::FantasyPlayer::find()
            .filter(entity::fantasy_player::Column::Id.is_in(player_ids))
            .all(self.db)
            .await
    }
}
