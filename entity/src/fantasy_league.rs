use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "fantasy_league")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub game_id: i32,
    #[sea_orm(unique)]
    pub league_key: String,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::fantasy_game::Entity",
        from = "Column::GameId",
        to = "super::fantasy_game::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    FantasyGame,
    #[sea_orm(has_many = "super::fantasy_team::Entity")]
    FantasyTeam,
    #[sea_orm(has_many = "super::yahoo_trade::Entity")]
    YahooTrade,
}

impl Related<super::fantasy_game::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FantasyGame.def()
    }
}

impl Related<super::fantasy_team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FantasyTeam.def()
    }
}

impl Related<super::yahoo_trade::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::YahooTrade.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
