use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

/// Provider name of linked Yahoo accounts
pub const YAHOO_PROVIDER: &str = "yahoo";

pub struct AccountRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AccountRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds the user's account for `provider`.
    ///
    /// A user is expected to link at most one account per provider; if several exist the
    /// oldest one is returned.
    pub async fn find_by_user(
        &self,
        user_id: i32,
        provider: &str,
    ) -> Result<Option<entity::huddle_account::Model>, DbErr> {
        entity::prelude::HuddleAccount::find()
            .filter(entity::huddle_account::Column::UserId.eq(user_id))
            .filter(entity::huddle_account::Column::Provider.eq(provider))
            .order_by_asc(entity::huddle_account::Column::Id)
            .one(self.db)
            .await
    }

    /// Stores a refreshed token set on the account.
    pub async fn update_tokens(
        &self,
        account: entity::huddle_account::Model,
        access_token: String,
        refresh_token: String,
        expires_at: i64,
    ) -> Result<entity::huddle_account::Model, DbErr> {
        let mut account = account.into_active_model();
        account.access_token = ActiveValue::Set(Some(access_token));
        account.refresh_token = ActiveValue::Set(Some(refresh_token));
        account.expires_at = ActiveValue::Set(Some(expires_at));
        account.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        account.update(self.db).await
    }
}
