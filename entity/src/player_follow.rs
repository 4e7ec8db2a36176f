use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "player_follow")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub player_id: i32,
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
    #[sea_orm(
        belongs_to = "super::fantasy_player::Entity",
        from = "Column::PlayerId",
        to = "super::fantasy_player::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    FantasyPlayer,
}

impl Related<super::huddle_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HuddleUser.def()
    }
}

impl Related<super::fantasy_player::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FantasyPlayer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
