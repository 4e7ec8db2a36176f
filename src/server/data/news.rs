use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter,
};

/// A news item matched to a player, not yet stored.
#[derive(Clone, Debug)]
pub struct CreatePlayerNewsParams {
    pub player_id: i32,
    pub headline: String,
    pub summary: Option<String>,
    pub source: String,
    pub url: Option<String>,
    pub published_at: NaiveDateTime,
}

pub struct PlayerNewsRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PlayerNewsRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Whether news with this headline is already stored for the player.
    pub async fn exists(&self, player_id: i32, headline: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::PlayerNews::find()
            .filter(entity::player_news::Column::PlayerId.eq(player_id))
            .filter(entity::player_news::Column::Headline.eq(headline))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    pub async fn create(&self, params: CreatePlayerNewsParams) -> Result<entity::player_news::Model, DbErr> {
        let news = entity::player_news::ActiveModel {
            player_id: ActiveValue::Set(params.player_id),
            headline: ActiveValue::Set(params.headline),
            summary: ActiveValue::Set(params.summary),
            source: ActiveValue::Set(params.source),
            url: ActiveValue::Set(params.url),
            published_at: ActiveValue::Set(params.published_at),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        news.insert(self.db).await
    }

    pub async fn count_for_player(&self, player_id: i32) -> Result<u64, DbErr> {
        entity::prelude::PlayerNews::find()
            .filter(entity::player_news::Column::PlayerId.eq(player_id))
            .count(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use huddle_test_utils::prelude::*;

    use crate::server::data::news::{CreatePlayerNewsParams, PlayerNewsRepository};

    fn params(player_id: i32, headline: &str) -> CreatePlayerNewsParams {
        CreatePlayerNewsParams {
            player_id,
            headline: headline.to_string(),
            summary: None,
            source: "Wire".to_string(),
            url: None,
            published_at: Utc::now().naive_utc(),
        }
    }

    /// Expect exists to be keyed on player and headline together
    #[tokio::test]
    async fn exists_is_per_player_and_headline() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::FantasyPlayer)
            .with_table(entity::prelude::PlayerNews)
            .build()
            .await?;
        let luka = test.fantasy().insert_player("466.p.1", "Luka Doncic").await?;
        let other = test.fantasy().insert_player("466.p.2", "Other Player").await?;

        let repo = PlayerNewsRepository::new(&test.db);
        repo.create(params(luka.id, "Luka Doncic dominates")).await?;

        assert!(repo.exists(luka.id, "Luka Doncic dominates").await?);
        assert!(!repo.exists(luka.id, "Luka Doncic rests").await?);
        assert!(!repo.exists(other.id, "Luka Doncic dominates").await?);
        assert_eq!(repo.count_for_player(luka.id).await?, 1);

        Ok(())
    }
}
