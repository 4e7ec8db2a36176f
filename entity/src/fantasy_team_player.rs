use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "fantasy_team_player")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub team_id: i32,
    pub player_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::fantasy_team::Entity",
        from = "Column::TeamId",
        to = "super::fantasy_team::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    FantasyTeam,
    #[sea_orm(
        belongs_to = "super::fantasy_player::Entity",
        from = "Column::PlayerId",
        to = "super::fantasy_player::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    FantasyPlayer,
}

impl Related<super::fantasy_team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FantasyTeam.def()
    }
}

impl Related<super::fantasy_player::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FantasyPlayer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
