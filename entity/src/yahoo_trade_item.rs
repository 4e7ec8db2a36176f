use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "yahoo_trade_item")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub yahoo_trade_id: i32,
    pub player_key: String,
    pub sender_team_key: String,
    pub receiver_team_key: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::yahoo_trade::Entity",
        from = "Column::YahooTradeId",
        to = "super::yahoo_trade::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    YahooTrade,
}

impl Related<super::yahoo_trade::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::YahooTrade.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
