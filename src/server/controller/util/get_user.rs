use dioxus_logger::tracing;
use entity::sea_orm_active_enums::Permission;
use tower_sessions::Session;

use crate::{
    model::user::UserDto,
    server::{
        error::{auth::AuthError, Error},
        model::{app::AppState, session::user::SessionUserId},
        service::user::{has_permission, UserService},
    },
};

/// Retrieves the logged in user with their resolved permissions
///
/// # Arguments
/// - `state`: Application state with database connection & admin character
/// - `session`: The user's session
///
/// # Returns
/// - `Ok(UserDto)`: User found, with main character, corporation & permissions
/// - `Err(Error::AuthError(AuthError::UserNotInSession))`: User ID not present in session
/// - `Err(Error::AuthError(AuthError::UserNotInDatabase))`: User ID exists in session but not found in database (session is cleared)
/// - `Err(Error)`: Internal errors (database query failures, session errors, etc.)
pub async fn get_user_from_session(state: &AppState, session: &Session) -> Result<UserDto, Error> {
    let Some(user_id) = SessionUserId::get(session).await? else {
        return Err(Error::AuthError(AuthError::UserNotInSession));
    };

    let Some(user) = UserService::new(&state.db)
        .get_user_with_permissions(user_id, state.admin_character_id)
        .await?
    else {
        session.clear().await;

        tracing::debug!(
            "Session cleared for user ID {} with active session but was not found in database",
            user_id
        );

        return Err(Error::AuthError(AuthError::UserNotInDatabase(user_id)));
    };

    Ok(user)
}

/// Retrieves the logged in user, failing with 403 unless they hold `permission`
pub async fn require_permission(
    state: &AppState,
    session: &Session,
    permission: Permission,
) -> Result<UserDto, Error> {
    let user = get_user_from_session(state, session).await?;

    if !has_permission(&user.permissions, permission) {
        return Err(AuthError::MissingPermission {
            user_id: user.id,
            permission,
        }
        .into());
    }

    Ok(user)
}
