use sea_orm::entity::prelude::*;

/// Mirror of a trade transaction recorded by Yahoo.
///
/// `yahoo_trade_id` holds Yahoo's transaction key and is the idempotency key for syncing.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "yahoo_trade")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub yahoo_trade_id: String,
    pub league_id: i32,
    pub trader_team_key: String,
    pub tradee_team_key: String,
    pub status: String,
    pub transaction_type: String,
    pub proposed_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::fantasy_league::Entity",
        from = "Column::LeagueId",
        to = "super::fantasy_league::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    FantasyLeague,
    #[sea_orm(has_many = "super::yahoo_trade_item::Entity")]
    YahooTradeItem,
}

impl Related<super::fantasy_league::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FantasyLeague.def()
    }
}

impl Related<super::yahoo_trade_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::YahooTradeItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
