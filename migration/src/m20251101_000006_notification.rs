use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000001_huddle_user::HuddleUser;

static IDX_NOTIFICATION_USER_ID: &str = "idx-notification-user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Notification::Table)
                    .if_not_exists()
                    .col(pk_auto(Notification::Id))
                    .col(integer(Notification::UserId))
                    .col(string_len(Notification::Kind, 16))
                    .col(string(Notification::Title))
                    .col(text(Notification::Body))
                    .col(string_null(Notification::Link))
                    .col(boolean(Notification::Read).default(false))
                    .col(timestamp(Notification::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-notification-user_id")
                            .from(Notification::Table, Notification::UserId)
                            .to(HuddleUser::Table, HuddleUser::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_NOTIFICATION_USER_ID)
                    .table(Notification::Table)
                    .col(Notification::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Notification::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Notification {
    Table,
    Id,
    UserId,
    Kind,
    Title,
    Body,
    Link,
    Read,
    CreatedAt,
}
