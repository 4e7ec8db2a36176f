use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000001_huddle_user::HuddleUser;

static IDX_TEAM_MANAGER_ID: &str = "idx-fantasy_team-manager_id";
static IDX_TEAM_PLAYER_TEAM_PLAYER: &str = "idx-fantasy_team_player-team_id-player_id";
static IDX_PLAYER_FOLLOW_USER_PLAYER: &str = "idx-player_follow-user_id-player_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FantasyGame::Table)
                    .if_not_exists()
                    .col(pk_auto(FantasyGame::Id))
                    .col(string_uniq(FantasyGame::GameKey))
                    .col(string(FantasyGame::Code))
                    .col(integer(FantasyGame::Season))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FantasyLeague::Table)
                    .if_not_exists()
                    .col(pk_auto(FantasyLeague::Id))
                    .col(integer(FantasyLeague::GameId))
                    .col(string_uniq(FantasyLeague::LeagueKey))
                    .col(string(FantasyLeague::Name))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-fantasy_league-game_id")
                            .from(FantasyLeague::Table, FantasyLeague::GameId)
                            .to(FantasyGame::Table, FantasyGame::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FantasyTeam::Table)
                    .if_not_exists()
                    .col(pk_auto(FantasyTeam::Id))
                    .col(integer(FantasyTeam::LeagueId))
                    .col(integer_null(FantasyTeam::ManagerId))
                    .col(string_uniq(FantasyTeam::TeamKey))
                    .col(string(FantasyTeam::Name))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-fantasy_team-league_id")
                            .from(FantasyTeam::Table, FantasyTeam::LeagueId)
                            .to(FantasyLeague::Table, FantasyLeague::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-fantasy_team-manager_id")
                            .from(FantasyTeam::Table, FantasyTeam::ManagerId)
                            .to(HuddleUser::Table, HuddleUser::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_TEAM_MANAGER_ID)
                    .table(FantasyTeam::Table)
                    .col(FantasyTeam::ManagerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FantasyPlayer::Table)
                    .if_not_exists()
                    .col(pk_auto(FantasyPlayer::Id))
                    .col(string_uniq(FantasyPlayer::PlayerKey))
                    .col(string(FantasyPlayer::FullName))
                    .col(string_null(FantasyPlayer::Position))
                    .col(string_null(FantasyPlayer::Status))
                    .col(double_null(FantasyPlayer::ProjectedPoints))
                    .col(double_null(FantasyPlayer::FantasyPoints))
                    .col(double_null(FantasyPlayer::PercentOwned))
                    .col(json_null(FantasyPlayer::Stats))
                    .col(timestamp(FantasyPlayer::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FantasyTeamPlayer::Table)
                    .if_not_exists()
                    .col(pk_auto(FantasyTeamPlayer::Id))
                    .col(integer(FantasyTeamPlayer::TeamId))
                    .col(integer(FantasyTeamPlayer::PlayerId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-fantasy_team_player-team_id")
                            .from(FantasyTeamPlayer::Table, FantasyTeamPlayer::TeamId)
                            .to(FantasyTeam::Table, FantasyTeam::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-fantasy_team_player-player_id")
                            .from(FantasyTeamPlayer::Table, FantasyTeamPlayer::PlayerId)
                            .to(FantasyPlayer::Table, FantasyPlayer::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_TEAM_PLAYER_TEAM_PLAYER)
                    .table(FantasyTeamPlayer::Table)
                    .col(FantasyTeamPlayer::TeamId)
                    .col(FantasyTeamPlayer::PlayerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PlayerFollow::Table)
                    .if_not_exists()
                    .col(pk_auto(PlayerFollow::Id))
                    .col(integer(PlayerFollow::UserId))
                    .col(integer(PlayerFollow::PlayerId))
                    .col(timestamp(PlayerFollow::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-player_follow-user_id")
                            .from(PlayerFollow::Table, PlayerFollow::UserId)
                            .to(HuddleUser::Table, HuddleUser::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-player_follow-player_id")
                            .from(PlayerFollow::Table, PlayerFollow::PlayerId)
                            .to(FantasyPlayer::Table, FantasyPlayer::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_PLAYER_FOLLOW_USER_PLAYER)
                    .table(PlayerFollow::Table)
                    .col(PlayerFollow::UserId)
                    .col(PlayerFollow::PlayerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PlayerFollow::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FantasyTeamPlayer::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FantasyPlayer::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FantasyTeam::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FantasyLeague::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FantasyGame::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum FantasyGame {
    Table,
    Id,
    GameKey,
    Code,
    Season,
}

#[derive(DeriveIden)]
pub enum FantasyLeague {
    Table,
    Id,
    GameId,
    LeagueKey,
    Name,
}

#[derive(DeriveIden)]
enum FantasyTeam {
    Table,
    Id,
    LeagueId,
    ManagerId,
    TeamKey,
    Name,
}

#[derive(DeriveIden)]
pub enum FantasyPlayer {
    Table,
    Id,
    PlayerKey,
    FullName,
    Position,
    Status,
    ProjectedPoints,
    FantasyPoints,
    PercentOwned,
    Stats,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum FantasyTeamPlayer {
    Table,
    Id,
    TeamId,
    PlayerId,
}

#[derive(DeriveIden)]
enum PlayerFollow {
    Table,
    Id,
    UserId,
    PlayerId,
    CreatedAt,
}
