use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        user::UserDto,
    },
    server::{
        controller::util::{csrf::validate_csrf, get_user::get_user_from_session},
        error::Error,
        model::{
            app::AppState,
            session::{auth::SessionAuthCsrf, user::SessionUserId},
        },
        service::auth::AuthService,
    },
};

pub static AUTH_TAG: &str = "auth";

#[derive(Deserialize, IntoParams)]
pub struct CallbackParams {
    pub state: String,
    pub code: String,
}

/// Login route to initiate login with EVE Online
///
/// Creates a URL to login with EVE Online and redirects the user to that URL to begin the login process.
#[utoipa::path(
    get,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    responses(
        (status = 307, description = "Redirect to the EVE Online login page"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let login = AuthService::new(&state.db, &state.esi_client, &state.seat_client).login_url()?;

    SessionAuthCsrf::insert(&session, &login.state).await?;

    Ok(Redirect::temporary(&login.login_url))
}

/// Callback route user is redirected to after successful login at EVE Online's website
///
/// Validates the CSRF state, resolves the user owning the character and stores it in session
/// before sending the user on to the application page.
#[utoipa::path(
    get,
    path = "/api/auth/callback",
    tag = AUTH_TAG,
    params(CallbackParams),
    responses(
        (status = 307, description = "Logged in, redirect to the application page"),
        (status = 400, description = "CSRF state mismatch", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    params: Query<CallbackParams>,
) -> Result<impl IntoResponse, Error> {
    validate_csrf(&session, &params.0.state).await?;

    let user_id = AuthService::new(&state.db, &state.esi_client, &state.seat_client)
        .handle_callback(&params.0.code)
        .await?;

    session.cycle_id().await?;
    SessionUserId::insert(&session, user_id).await?;

    Ok(Redirect::temporary(&format!(
        "{}/application",
        state.frontend_url
    )))
}

/// Logs the user out by clearing their session
#[utoipa::path(
    get,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Logged out", body = MessageDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(session: Session) -> Result<impl IntoResponse, Error> {
    // Clearing a session that was never stored fails, so only clear logged in sessions
    if SessionUserId::get(&session).await?.is_some() {
        session.clear().await;
    }

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: "Logout successful".to_string(),
        }),
    ))
}

/// Returns the logged in user with their permissions
#[utoipa::path(
    get,
    path = "/api/auth/user",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Logged in user", body = UserDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    Ok((StatusCode::OK, Json(user)))
}
