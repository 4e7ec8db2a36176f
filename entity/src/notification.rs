use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::NotificationKind;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "notification")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub link: Option<String>,
    pub read: bool,
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
