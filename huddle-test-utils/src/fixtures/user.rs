use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue};

use crate::{
    constant::{TEST_ACCESS_TOKEN, TEST_REFRESH_TOKEN},
    error::TestError,
    TestContext,
};

pub struct UserFixtures<'a> {
    setup: &'a TestContext,
}

impl TestContext {
    pub fn user(&self) -> UserFixtures<'_> {
        UserFixtures { setup: self }
    }
}

impl<'a> UserFixtures<'a> {
    /// Inserts a user named `name` with the email `{name}@example.com`.
    pub async fn insert_user(&self, name: &str) -> Result<entity::huddle_user::Model, TestError> {
        let now = Utc::now().naive_utc();

        let user = entity::huddle_user::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            email: ActiveValue::Set(format!("{}@example.com", name)),
            password_hash: ActiveValue::Set(None),
            email_verified: ActiveValue::Set(None),
            pending_email: ActiveValue::Set(None),
            credits: ActiveValue::Set(0),
            reputation: ActiveValue::Set(0),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        Ok(user.insert(&self.setup.db).await?)
    }

    /// Links a Yahoo account holding the test tokens, expiring at `expires_at` (epoch seconds).
    pub async fn insert_yahoo_account(
        &self,
        user_id: i32,
        expires_at: i64,
    ) -> Result<entity::huddle_account::Model, TestError> {
        self.insert_account(
            user_id,
            Some(TEST_ACCESS_TOKEN),
            Some(TEST_REFRESH_TOKEN),
            Some(expires_at),
        )
        .await
    }

    /// Links a Yahoo account with arbitrary token columns.
    pub async fn insert_account(
        &self,
        user_id: i32,
        access_token: Option<&str>,
        refresh_token: Option<&str>,
        expires_at: Option<i64>,
    ) -> Result<entity::huddle_account::Model, TestError> {
        let now = Utc::now().naive_utc();

        let account = entity::huddle_account::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            provider: ActiveValue::Set("yahoo".to_string()),
            provider_account_id: ActiveValue::Set(format!("yahoo-guid-{}", user_id)),
            access_token: ActiveValue::Set(access_token.map(str::to_string)),
            refresh_token: ActiveValue::Set(refresh_token.map(str::to_string)),
            expires_at: ActiveValue::Set(expires_at),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        Ok(account.insert(&self.setup.db).await?)
    }

    /// Inserts a user with a Yahoo account whose token is valid for another hour.
    pub async fn insert_linked_user(
        &self,
        name: &str,
    ) -> Result<entity::huddle_user::Model, TestError> {
        let user = self.insert_user(name).await?;
        self.insert_yahoo_account(user.id, Utc::now().timestamp() + 3600)
            .await?;

        Ok(user)
    }
}
