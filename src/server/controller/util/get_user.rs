use tower_sessions::Session;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, Error},
    model::{app::AppState, db::UserModel, session::user::SessionUserId},
};

/// Retrieves the signed-in user from the session and then from the database
///
/// # Returns
/// - `Ok(UserModel)`: User found
/// - `Err(Error::AuthError(UserNotInSession))`: No user ID in the session
/// - `Err(Error::AuthError(UserNotInDatabase))`: Session user no longer exists, the session is cleared
/// - `Err(Error)`: Database or session failures
pub async fn get_user_from_session(state: &AppState, session: &Session) -> Result<UserModel, Error> {
    let Some(user_id) = SessionUserId::get(session).await? else {
        return Err(AuthError::UserNotInSession.into());
    };

    let Some(user) = UserRepository::new(&state.db).get_by_id(user_id).await? else {
        session.clear().await;

        tracing::debug!(
            "Session cleared for user ID {} with active session but was not found in database",
            user_id
        );

        return Err(AuthError::UserNotInDatabase(user_id).into());
    };

    Ok(user)
}
