use sea_orm::entity::prelude::*;

/// OAuth provider link for a user.
///
/// `expires_at` is stored as epoch seconds, the way the provider reports it.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "huddle_account")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub provider: String,
    pub provider_account_id: String,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_at: Option<i64>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
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
