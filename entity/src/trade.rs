use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::{TradeScope, TradeStatus};

/// Marketplace trade.
///
/// A listing is a `Marketplace` trade without a target. Offers made against a listing are
/// `Direct` trades carrying the listing's ID in `parent_trade_id`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "trade")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub initiator_id: i32,
    pub target_user_id: Option<i32>,
    pub parent_trade_id: Option<i32>,
    pub scope: TradeScope,
    pub status: TradeStatus,
    pub offered_assets: Json,
    pub requested_assets: Json,
    pub message: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::huddle_user::Entity",
        from = "Column::InitiatorId",
        to = "super::huddle_user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Initiator,
    #[sea_orm(
        belongs_to = "super::huddle_user::Entity",
        from = "Column::TargetUserId",
        to = "super::huddle_user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Target,
    #[sea_orm(has_many = "super::trade_history::Entity")]
    TradeHistory,
}

impl Related<super::trade_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TradeHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
