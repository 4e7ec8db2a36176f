use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000002_fantasy_league::FantasyLeague;

static IDX_YAHOO_TRADE_LEAGUE_ID: &str = "idx-yahoo_trade-league_id";
static IDX_YAHOO_TRADE_ITEM_TRADE_ID: &str = "idx-yahoo_trade_item-yahoo_trade_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(YahooTrade::Table)
                    .if_not_exists()
                    .col(pk_auto(YahooTrade::Id))
                    .col(string_uniq(YahooTrade::YahooTradeId))
                    .col(integer(YahooTrade::LeagueId))
                    .col(string(YahooTrade::TraderTeamKey))
                    .col(string(YahooTrade::TradeeTeamKey))
                    .col(string(YahooTrade::Status))
                    .col(string(YahooTrade::TransactionType))
                    .col(timestamp_null(YahooTrade::ProposedAt))
                    .col(timestamp(YahooTrade::CreatedAt))
                    .col(timestamp(YahooTrade::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-yahoo_trade-league_id")
                            .from(YahooTrade::Table, YahooTrade::LeagueId)
                            .to(FantasyLeague::Table, FantasyLeague::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_YAHOO_TRADE_LEAGUE_ID)
                    .table(YahooTrade::Table)
                    .col(YahooTrade::LeagueId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(YahooTradeItem::Table)
                    .if_not_exists()
                    .col(pk_auto(YahooTradeItem::Id))
                    .col(integer(YahooTradeItem::YahooTradeId))
                    .col(string(YahooTradeItem::PlayerKey))
                    .col(string(YahooTradeItem::SenderTeamKey))
                    .col(string(YahooTradeItem::ReceiverTeamKey))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-yahoo_trade_item-yahoo_trade_id")
                            .from(YahooTradeItem::Table, YahooTradeItem::YahooTradeId)
                            .to(YahooTrade::Table, YahooTrade::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_YAHOO_TRADE_ITEM_TRADE_ID)
                    .table(YahooTradeItem::Table)
                    .col(YahooTradeItem::YahooTradeId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(YahooTradeItem::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(YahooTrade::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum YahooTrade {
    Table,
    Id,
    YahooTradeId,
    LeagueId,
    TraderTeamKey,
    TradeeTeamKey,
    Status,
    TransactionType,
    ProposedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum YahooTradeItem {
    Table,
    Id,
    YahooTradeId,
    PlayerKey,
    SenderTeamKey,
    ReceiverTeamKey,
}
