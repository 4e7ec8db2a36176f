use sea_orm::entity::prelude::*;

/// Append-only record of credit movements.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "ledger")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub amount: i32,
    pub reason: String,
    pub trade_id: Option<i32>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::huddle_user::Entity",
        from = "Column::UserId",
        to = "super::huddle_user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    HuddleUser,
}

impl Related<super::huddle_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HuddleUser.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
