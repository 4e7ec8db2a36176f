use sea_orm::{DatabaseConnection, DbErr, EntityTrait};

pub struct LeagueRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LeagueRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_by_id(&self, league_id: i32) -> Result<Option<entity::fantasy_league::Model>, DbErr> {
        entity::prelude::FantasyLeague::find_by_id(league_id)
            .one(self.db)
            .await
    }

    /// Gets a league along with its game, which carries the sport code.
    pub async fn get_with_game(
        &self,
        league_id: i32,
    ) -> Result<
        Option<(
            entity::fantasy_league::Model,
            Option<entity::fantasy_game::Model>,
        )>,
        DbErr,
    > {
        entity::prelude::FantasyLeague::find_by_id(league_id)
            .find_also_related(entity::prelude::FantasyGame)
            .one(self.db)
            .await
    }
}
