use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "fantasy_team")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub league_id: i32,
    /// Huddle user managing this team, `None` for teams of managers not on Huddle
    pub manager_id: Option<i32>,
    #[sea_orm(unique)]
    pub team_key: String,
    pub name: String,
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
    #[sea_orm(
        belongs_to = "super::huddle_user::Entity",
        from = "Column::ManagerId",
        to = "super::huddle_user::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    HuddleUser,
    #[sea_orm(has_many = "super::fantasy_team_player::Entity")]
    FantasyTeamPlayer,
}

impl Related<super::fantasy_league::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FantasyLeague.def()
    }
}

impl Related<super::huddle_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HuddleUser.def()
    }
}

impl Related<super::fantasy_team_player::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FantasyTeamPlayer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
