use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "fantasy_player")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub player_key: String,
    pub full_name: String,
    pub position: Option<String>,
    pub status: Option<String>,
    #[sea_orm(column_type = "Double", nullable)]
    pub projected_points: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub fantasy_points: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub percent_owned: Option<f64>,
    pub stats: Option<Json>,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::fantasy_team_player::Entity")]
    FantasyTeamPlayer,
    #[sea_orm(has_many = "super::player_news::Entity")]
    PlayerNews,
    #[sea_orm(has_many = "super::player_follow::Entity")]
    PlayerFollow,
}

impl Related<super::fantasy_team_player::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FantasyTeamPlayer.def()
    }
}

impl Related<super::player_news::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlayerNews.def()
    }
}

impl Related<super::player_follow::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlayerFollow.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
