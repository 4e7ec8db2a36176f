use sea_orm_migration::{prelude::*, schema::*};

static IDX_ACCOUNT_USER_ID: &str = "idx-huddle_account-user_id";
static IDX_ACCOUNT_PROVIDER_ACCOUNT: &str = "idx-huddle_account-provider-provider_account_id";
static FK_ACCOUNT_USER_ID: &str = "fk-huddle_account-user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HuddleUser::Table)
                    .if_not_exists()
                    .col(pk_auto(HuddleUser::Id))
                    .col(string(HuddleUser::Name))
                    .col(string_uniq(HuddleUser::Email))
                    .col(string_null(HuddleUser::PasswordHash))
                    .col(timestamp_null(HuddleUser::EmailVerified))
                    .col(string_null(HuddleUser::PendingEmail))
                    .col(integer(HuddleUser::Credits).default(0))
                    .col(integer(HuddleUser::Reputation).default(0))
                    .col(timestamp(HuddleUser::CreatedAt))
                    .col(timestamp(HuddleUser::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(HuddleAccount::Table)
                    .if_not_exists()
                    .col(pk_auto(HuddleAccount::Id))
                    .col(integer(HuddleAccount::UserId))
                    .col(string(HuddleAccount::Provider))
                    .col(string(HuddleAccount::ProviderAccountId))
                    .col(text_null(HuddleAccount::AccessToken))
                    .col(text_null(HuddleAccount::RefreshToken))
                    .col(big_integer_null(HuddleAccount::ExpiresAt))
                    .col(timestamp(HuddleAccount::CreatedAt))
                    .col(timestamp(HuddleAccount::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ACCOUNT_USER_ID)
                    .table(HuddleAccount::Table)
                    .col(HuddleAccount::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ACCOUNT_PROVIDER_ACCOUNT)
                    .table(HuddleAccount::Table)
                    .col(HuddleAccount::Provider)
                    .col(HuddleAccount::ProviderAccountId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_ACCOUNT_USER_ID)
                    .from_tbl(HuddleAccount::Table)
                    .from_col(HuddleAccount::UserId)
                    .to_tbl(HuddleUser::Table)
                    .to_col(HuddleUser::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_ACCOUNT_USER_ID)
                    .table(HuddleAccount::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(HuddleAccount::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(HuddleUser::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum HuddleUser {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    EmailVerified,
    PendingEmail,
    Credits,
    Reputation,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum HuddleAccount {
    Table,
    Id,
    UserId,
    Provider,
    ProviderAccountId,
    AccessToken,
    RefreshToken,
    ExpiresAt,
    CreatedAt,
    UpdatedAt,
}
