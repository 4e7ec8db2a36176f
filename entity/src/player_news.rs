use sea_orm::entity::prelude::*;

/// News item matched to a player, unique per `(player_id, headline)`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "player_news")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub player_id: i32,
    pub headline: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub summary: Option<String>,
    pub source: String,
    pub url: Option<String>,
    pub published_at: DateTime,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::fantasy_player::Entity",
        from = "Column::PlayerId",
        to = "super::fantasy_player::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    FantasyPlayer,
}

impl Related<super::fantasy_player::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FantasyPlayer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
