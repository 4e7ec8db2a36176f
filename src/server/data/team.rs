use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QuerySelect,
    TransactionTrait,
};

pub struct TeamRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TeamRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_by_id(&self, team_id: i32) -> Result<Option<entity::fantasy_team::Model>, DbErr> {
        entity::prelude::FantasyTeam::find_by_id(team_id)
            .one(self.db)
            .await
    }

    pub async fn get_many(&self, team_ids: &[i32]) -> Result<Vec<entity::fantasy_team::Model>, DbErr> {
        entity::prelude::FantasyTeam::find()
            .filter(entity::fantasy_team::Column::Id.is_in(team_ids.iter().copied()))
            .all(self.db)
            .await
    }

    /// Team the user manages in a league, if any.
    pub async fn find_managed_in_league(
        &self,
        league_id: i32,
        user_id: i32,
    ) -> Result<Option<entity::fantasy_team::Model>, DbErr> {
        entity::prelude::FantasyTeam::find()
            .filter(entity::fantasy_team::Column::LeagueId.eq(league_id))
            .filter(entity::fantasy_team::Column::ManagerId.eq(user_id))
            .one(self.db)
            .await
    }

    /// Ids of every team the user manages.
    pub async fn get_ids_managed_by(&self, user_id: i32) -> Result<Vec<i32>, DbErr> {
        entity::prelude::FantasyTeam::find()
            .select_only()
            .column(entity::fantasy_team::Column::Id)
            .filter(entity::fantasy_team::Column::ManagerId.eq(user_id))
            .into_tuple::<i32>()
            .all(self.db)
            .await
    }

    /// Replaces the team's roster with exactly `player_ids`.
    pub async fn replace_roster(&self, team_id: i32, player_ids: &[i32]) -> Result<(), DbErr> {
        let txn = self.db.begin().await?;

        entity::prelude::FantasyTeamPlayer::delete_many()
            .filter(entity::fantasy_team_player::Column::TeamId.eq(team_id))
            .exec(&txn)
            .await?;

        if !player_ids.is_empty() {
            let entries = player_ids
                .iter()
                .map(|player_id| entity::fantasy_team_player::ActiveModel {
                    team_id: ActiveValue::Set(team_id),
                    player_id: ActiveValue::Set(*player_id),
                    ..Default::default()
                });

            entity::prelude::FantasyTeamPlayer::insert_many(entries)
                .exec(&txn)
                .await?;
        }

        txn.commit().await
    }

    /// Player ids currently on the team's roster.
    pub async fn get_roster_player_ids(&self, team_id: i32) -> Result<Vec<i32>, DbErr> {
        entity::prelude::FantasyTeamPlayer::find()
            .select_only()
            .column(entity::fantasy_team_player::Column::PlayerId)
            .filter(entity::fantasy_team_player::Column::TeamId.eq(team_id))
            .into_tuple::<i32>()
            .all(self.db)
            .await
    }
}
