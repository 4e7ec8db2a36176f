//! Yahoo access token management.
//!
//! Tokens live on the user's linked account. A stored token is reused until it is within
//! [`TOKEN_EXPIRY_MARGIN_SECS`](crate::server::util::time::TOKEN_EXPIRY_MARGIN_SECS) of
//! expiring; past that a single refresh exchange is made and its result persisted. Refreshes
//! for the same user are serialized within the process, a waiter re-reads the account after
//! acquiring the lock and reuses a token refreshed in the meantime.

use std::future::Future;

use sea_orm::DatabaseConnection;

use crate::server::{
    data::account::{AccountRepository, YAHOO_PROVIDER},
    error::{auth::AuthError, provider::ProviderError, Error},
    model::db::AccountModel,
    provider::oauth::ProviderOAuth,
    util::time::{is_token_expired, now_epoch},
};

pub struct TokenService<'a> {
    db: &'a DatabaseConnection,
    oauth: &'a ProviderOAuth,
}

/// Token columns of a usable linked account
struct StoredToken {
    access_token: String,
    refresh_token: String,
    expires_at: i64,
}

impl<'a> TokenService<'a> {
    pub fn new(db: &'a DatabaseConnection, oauth: &'a ProviderOAuth) -> Self {
        Self { db, oauth }
    }

    /// Returns an access token for the user that is valid for at least the expiry margin.
    ///
    /// # Returns
    /// - `Ok(String)` - Stored token if still valid, otherwise a freshly refreshed one
    /// - `Err(Error::AuthError(ProviderNotLinked))` - No Yahoo account or missing token fields
    /// - `Err(Error::ProviderError(TokenRefresh))` - Token endpoint rejected the refresh
    /// - `Err(Error::DbErr)` - Account lookup or update failed
    pub async fn get_valid_token(&self, user_id: i32) -> Result<String, Error> {
        let (_, stored) = self.stored_token(user_id).await?;
        if !is_token_expired(stored.expires_at, now_epoch()) {
            return Ok(stored.access_token);
        }

        let lock = self.oauth.refresh_lock(user_id);
        let _guard = lock.lock().await;

        let (account, stored) = self.stored_token(user_id).await?;
        if !is_token_expired(stored.expires_at, now_epoch()) {
            tracing::debug!(user_id, "Reusing token refreshed by a concurrent request");

            return Ok(stored.access_token);
        }

        self.refresh(user_id, account, stored).await
    }

    /// Refreshes the user's token regardless of its recorded expiry.
    ///
    /// Used after Yahoo rejected a token that looked valid locally.
    pub async fn force_refresh(&self, user_id: i32) -> Result<String, Error> {
        let lock = self.oauth.refresh_lock(user_id);
        let _guard = lock.lock().await;

        let (account, stored) = self.stored_token(user_id).await?;

        self.refresh(user_id, account, stored).await
    }

    /// Runs a provider call with a valid token, refreshing and retrying once on a 401.
    pub async fn with_token_retry<T, F, Fut>(&self, user_id: i32, operation: F) -> Result<T, Error>
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        let token = self.get_valid_token(user_id).await?;

        match operation(token).await {
            Err(ProviderError::TokenExpired) => {
                tracing::info!(user_id, "Yahoo rejected access token, refreshing once");

                let token = self.force_refresh(user_id).await?;

                Ok(operation(token).await?)
            }
            result => Ok(result?),
        }
    }

    async fn stored_token(&self, user_id: i32) -> Result<(AccountModel, StoredToken), Error> {
        let account = AccountRepository::new(self.db)
            .find_by_user(user_id, YAHOO_PROVIDER)
            .await?
            .ok_or(AuthError::ProviderNotLinked(user_id))?;

        let stored = match (&account.access_token, &account.refresh_token, account.expires_at) {
            (Some(access_token), Some(refresh_token), Some(expires_at)) => StoredToken {
                access_token: access_token.clone(),
                refresh_token: refresh_token.clone(),
                expires_at,
            },
            _ => return Err(AuthError::ProviderNotLinked(user_id).into()),
        };

        Ok((account, stored))
    }

    async fn refresh(
        &self,
        user_id: i32,
        account: AccountModel,
        stored: StoredToken,
    ) -> Result<String, Error> {
        let token = match self.oauth.refresh(&stored.refresh_token).await {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(user_id, "Failed to refresh Yahoo access token: {}", e);

                return Err(e.into());
            }
        };

        let expires_at = now_epoch() + token.expires_in;
        let refresh_token = token.refresh_token.unwrap_or(stored.refresh_token);

        AccountRepository::new(self.db)
            .update_tokens(account, token.access_token.clone(), refresh_token, expires_at)
            .await?;

        tracing::debug!(user_id, expires_at, "Refreshed Yahoo access token");

        Ok(token.access_token)
    }
}

#[cfg(test)]
mod tests {
    use huddle_test_utils::prelude::*;

    use crate::server::{
        data::account::{AccountRepository, YAHOO_PROVIDER},
        error::{auth::AuthError, provider::ProviderError, Error},
        provider::oauth::ProviderOAuth,
        service::token::TokenService,
        util::time::now_epoch,
    };

    async fn setup() -> Result<TestContext, TestError> {
        TestBuilder::new()
            .with_table(entity::prelude::HuddleUser)
            .with_table(entity::prelude::HuddleAccount)
            .build()
            .await
    }

    fn oauth(test: &TestContext) -> ProviderOAuth {
        ProviderOAuth::new(
            reqwest::Client::new(),
            TEST_YAHOO_CLIENT_ID,
            TEST_YAHOO_CLIENT_SECRET,
            test.token_url(),
            format!("{}/api/auth/callback/yahoo", TEST_APP_URL),
        )
        .unwrap()
    }

    /// Expect exactly one refresh for a token expiring inside the margin
    #[tokio::test]
    async fn refreshes_token_inside_margin() -> Result<(), TestError> {
        let mut test = setup().await?;
        let user = test.user().insert_user("alice").await?;
        test.user()
            .insert_yahoo_account(user.id, now_epoch() + 200)
            .await?;
        let token_endpoint = test.yahoo().create_token_endpoint(1);

        let oauth = oauth(&test);
        let token = TokenService::new(&test.db, &oauth)
            .get_valid_token(user.id)
            .await
            .unwrap();

        token_endpoint.assert();
        assert_eq!(token, TEST_REFRESHED_ACCESS_TOKEN);

        let account = AccountRepository::new(&test.db)
            .find_by_user(user.id, YAHOO_PROVIDER)
            .await?
            .unwrap();
        assert_eq!(account.access_token.as_deref(), Some(TEST_REFRESHED_ACCESS_TOKEN));
        assert_eq!(account.refresh_token.as_deref(), Some("rotated_refresh_token"));
        assert!(account.expires_at.unwrap() >= now_epoch() + 3500);

        Ok(())
    }

    /// Expect no refresh for a token expiring outside the margin
    #[tokio::test]
    async fn reuses_token_outside_margin() -> Result<(), TestError> {
        let mut test = setup().await?;
        let user = test.user().insert_user("alice").await?;
        test.user()
            .insert_yahoo_account(user.id, now_epoch() + 400)
            .await?;
        let token_endpoint = test.yahoo().create_token_endpoint(0);

        let oauth = oauth(&test);
        let token = TokenService::new(&test.db, &oauth)
            .get_valid_token(user.id)
            .await
            .unwrap();

        token_endpoint.assert();
        assert_eq!(token, TEST_ACCESS_TOKEN);

        Ok(())
    }

    /// Expect the upstream reason and no stale token when the refresh fails
    #[tokio::test]
    async fn refresh_failure_is_reported() -> Result<(), TestError> {
        let mut test = setup().await?;
        let user = test.user().insert_user("alice").await?;
        test.user()
            .insert_yahoo_account(user.id, now_epoch() - 10)
            .await?;
        let _token_endpoint = test.yahoo().create_token_error_endpoint(400, 1);

        let oauth = oauth(&test);
        let result = TokenService::new(&test.db, &oauth)
            .get_valid_token(user.id)
            .await;

        assert!(matches!(
            result,
            Err(Error::ProviderError(ProviderError::TokenRefresh(_)))
        ));

        Ok(())
    }

    /// Expect NotLinked without an account or with missing token fields
    #[tokio::test]
    async fn missing_account_is_not_linked() -> Result<(), TestError> {
        let test = setup().await?;
        let unlinked = test.user().insert_user("alice").await?;
        let partial = test.user().insert_user("bob").await?;
        test.user()
            .insert_account(partial.id, Some("token"), None, Some(now_epoch() + 3600))
            .await?;

        let oauth = oauth(&test);
        let service = TokenService::new(&test.db, &oauth);

        assert!(matches!(
            service.get_valid_token(unlinked.id).await,
            Err(Error::AuthError(AuthError::ProviderNotLinked(_)))
        ));
        assert!(matches!(
            service.get_valid_token(partial.id).await,
            Err(Error::AuthError(AuthError::ProviderNotLinked(_)))
        ));

        Ok(())
    }

    /// Expect a 401 to trigger one forced refresh and a retry with the new token
    #[tokio::test]
    async fn retries_once_after_token_expired() -> Result<(), TestError> {
        let mut test = setup().await?;
        let user = test.user().insert_user("alice").await?;
        test.user()
            .insert_yahoo_account(user.id, now_epoch() + 3600)
            .await?;
        let token_endpoint = test.yahoo().create_token_endpoint(1);

        let oauth = oauth(&test);
        let calls = std::sync::Mutex::new(Vec::new());
        let result = TokenService::new(&test.db, &oauth)
            .with_token_retry(user.id, |token| {
                calls.lock().unwrap().push(token.clone());
                async move {
                    if token == TEST_ACCESS_TOKEN {
                        Err(ProviderError::TokenExpired)
                    } else {
                        Ok(token)
                    }
                }
            })
            .await;

        token_endpoint.assert();
        assert_eq!(result.unwrap(), TEST_REFRESHED_ACCESS_TOKEN);
        assert_eq!(
            *calls.lock().unwrap(),
            vec![TEST_ACCESS_TOKEN.to_string(), TEST_REFRESHED_ACCESS_TOKEN.to_string()]
        );

        Ok(())
    }

    /// Expect a second 401 to be returned instead of looping
    #[tokio::test]
    async fn gives_up_after_second_rejection() -> Result<(), TestError> {
        let mut test = setup().await?;
        let user = test.user().insert_user("alice").await?;
        test.user()
            .insert_yahoo_account(user.id, now_epoch() + 3600)
            .await?;
        let token_endpoint = test.yahoo().create_token_endpoint(1);

        let oauth = oauth(&test);
        let result: Result<(), Error> = TokenService::new(&test.db, &oauth)
            .with_token_retry(user.id, |_| async { Err(ProviderError::TokenExpired) })
            .await;

        token_endpoint.assert();
        assert!(matches!(
            result,
            Err(Error::ProviderError(ProviderError::TokenExpired))
        ));

        Ok(())
    }
}
