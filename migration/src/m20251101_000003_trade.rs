use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000001_huddle_user::HuddleUser;

static IDX_TRADE_INITIATOR_ID: &str = "idx-trade-initiator_id";
static IDX_TRADE_TARGET_USER_ID: &str = "idx-trade-target_user_id";
static IDX_TRADE_PARENT_TRADE_ID: &str = "idx-trade-parent_trade_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Trade::Table)
                    .if_not_exists()
                    .col(pk_auto(Trade::Id))
                    .col(integer(Trade::InitiatorId))
                    .col(integer_null(Trade::TargetUserId))
                    .col(integer_null(Trade::ParentTradeId))
                    .col(string_len(Trade::Scope, 16))
                    .col(string_len(Trade::Status, 16))
                    .col(json(Trade::OfferedAssets))
                    .col(json(Trade::RequestedAssets))
                    .col(text_null(Trade::Message))
                    .col(timestamp(Trade::CreatedAt))
                    .col(timestamp(Trade::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-trade-initiator_id")
                            .from(Trade::Table, Trade::InitiatorId)
                            .to(HuddleUser::Table, HuddleUser::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-trade-target_user_id")
                            .from(Trade::Table, Trade::TargetUserId)
                            .to(HuddleUser::Table, HuddleUser::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-trade-parent_trade_id")
                            .from(Trade::Table, Trade::ParentTradeId)
                            .to(Trade::Table, Trade::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            (IDX_TRADE_INITIATOR_ID, Trade::InitiatorId),
            (IDX_TRADE_TARGET_USER_ID, Trade::TargetUserId),
            (IDX_TRADE_PARENT_TRADE_ID, Trade::ParentTradeId),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Trade::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .create_table(
                Table::create()
                    .table(TradeHistory::Table)
                    .if_not_exists()
                    .col(pk_auto(TradeHistory::Id))
                    .col(integer(TradeHistory::TradeId))
                    .col(json(TradeHistory::Snapshot))
                    .col(timestamp(TradeHistory::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-trade_history-trade_id")
                            .from(TradeHistory::Table, TradeHistory::TradeId)
                            .to(Trade::Table, Trade::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Ledger::Table)
                    .if_not_exists()
                    .col(pk_auto(Ledger::Id))
                    .col(integer(Ledger::UserId))
                    .col(integer(Ledger::Amount))
                    .col(string(Ledger::Reason))
                    .col(integer_null(Ledger::TradeId))
                    .col(timestamp(Ledger::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-ledger-user_id")
                            .from(Ledger::Table, Ledger::UserId)
                            .to(HuddleUser::Table, HuddleUser::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ledger::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TradeHistory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Trade::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Trade {
    Table,
    Id,
    InitiatorId,
    TargetUserId,
    ParentTradeId,
    Scope,
    Status,
    OfferedAssets,
    RequestedAssets,
    Message,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TradeHistory {
    Table,
    Id,
    TradeId,
    Snapshot,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Ledger {
    Table,
    Id,
    UserId,
    Amount,
    Reason,
    TradeId,
    CreatedAt,
}
