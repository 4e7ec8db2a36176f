use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000002_fantasy_league::FantasyPlayer;

static IDX_PLAYER_NEWS_PLAYER_HEADLINE: &str = "idx-player_news-player_id-headline";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PlayerNews::Table)
                    .if_not_exists()
                    .col(pk_auto(PlayerNews::Id))
                    .col(integer(PlayerNews::PlayerId))
                    .col(string(PlayerNews::Headline))
                    .col(text_null(PlayerNews::Summary))
                    .col(string(PlayerNews::Source))
                    .col(string_null(PlayerNews::Url))
                    .col(timestamp(PlayerNews::PublishedAt))
                    .col(timestamp(PlayerNews::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-player_news-player_id")
                            .from(PlayerNews::Table, PlayerNews::PlayerId)
                            .to(FantasyPlayer::Table, FantasyPlayer::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Dedup key for news ingestion
        manager
            .create_index(
                Index::create()
                    .name(IDX_PLAYER_NEWS_PLAYER_HEADLINE)
                    .table(PlayerNews::Table)
                    .col(PlayerNews::PlayerId)
                    .col(PlayerNews::Headline)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_PLAYER_NEWS_PLAYER_HEADLINE)
                    .table(PlayerNews::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(PlayerNews::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum PlayerNews {
    Table,
    Id,
    PlayerId,
    Headline,
    Summary,
    Source,
    Url,
    PublishedAt,
    CreatedAt,
}
