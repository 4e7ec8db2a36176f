use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "huddle_user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: Option<String>,
    pub email_verified: Option<DateTime>,
    pub pending_email: Option<String>,
    pub credits: i32,
    pub reputation: i32,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::huddle_account::Entity")]
    HuddleAccount,
    #[sea_orm(has_many = "super::fantasy_team::Entity")]
    FantasyTeam,
    #[sea_orm(has_many = "super::notification::Entity")]
    Notification,
    #[sea_orm(has_many = "super::ledger::Entity")]
    Ledger,
    #[sea_orm(has_many = "super::player_follow::Entity")]
    PlayerFollow,
}

impl Related<super::huddle_account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HuddleAccount.def()
    }
}

impl Related<super::fantasy_team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FantasyTeam.def()
    }
}

impl Related<super::notification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notification.def()
    }
}

impl Related<super::ledger::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ledger.def()
    }
}

impl Related<super::player_follow::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlayerFollow.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
