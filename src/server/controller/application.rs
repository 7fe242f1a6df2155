//! Applicant routes under `/api/application`. Every route requires a logged in user.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        application::{ApplicationDto, PutApplicationLocationDto, PutApplicationQuestionsDto},
    },
    server::{
        controller::util::{get_user::get_user_from_session, notify::spawn_delivery},
        error::Error,
        model::app::AppState,
        service::application::{ApplicationService, ApplicationUpdate},
    },
};

pub static APPLICATION_TAG: &str = "application";

/// Responds with the updated application, kicking off delivery when a notification was queued
fn updated(state: &AppState, update: ApplicationUpdate) -> impl IntoResponse {
    if update.notified {
        spawn_delivery(state);
    }

    (StatusCode::OK, Json(update.application))
}

/// Current application of the logged in user
#[utoipa::path(
    get,
    path = "/api/application",
    tag = APPLICATION_TAG,
    responses(
        (status = 200, description = "Current application", body = ApplicationDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "No application, or only an expired one", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_application(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let application = ApplicationService::new(&state.db)
        .get_current(user.id)
        .await?;

    Ok((StatusCode::OK, Json(application)))
}

/// Starts an application or changes the location of the pending one
#[utoipa::path(
    put,
    path = "/api/application/location",
    tag = APPLICATION_TAG,
    request_body = PutApplicationLocationDto,
    responses(
        (status = 200, description = "Application created or updated", body = ApplicationDto),
        (status = 400, description = "Already a member, or rejected within the last 30 days", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 409, description = "An accepted application already exists", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn put_location(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<PutApplicationLocationDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let update = ApplicationService::new(&state.db)
        .set_location(&user, body.location)
        .await?;

    Ok(updated(&state, update))
}

/// Completes the SeAT step when the main character is registered on SeAT
#[utoipa::path(
    get,
    path = "/api/application/seat-status",
    tag = APPLICATION_TAG,
    responses(
        (status = 200, description = "Application with the SeAT step checked", body = ApplicationDto),
        (status = 400, description = "Already a member of Autumn", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "No pending application", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_seat_status(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let application = ApplicationService::new(&state.db)
        .check_seat_status(&user, &state.seat_client)
        .await?;

    Ok((StatusCode::OK, Json(application)))
}

/// Marks the Discord step complete
#[utoipa::path(
    put,
    path = "/api/application/discord-complete",
    tag = APPLICATION_TAG,
    responses(
        (status = 200, description = "Application with the Discord step complete", body = ApplicationDto),
        (status = 400, description = "Already a member of Autumn", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "No pending application", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn put_discord_complete(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let application = ApplicationService::new(&state.db)
        .complete_discord(&user)
        .await?;

    Ok((StatusCode::OK, Json(application)))
}

/// Saves the questionnaire of the pending application
#[utoipa::path(
    put,
    path = "/api/application/questions",
    tag = APPLICATION_TAG,
    request_body = PutApplicationQuestionsDto,
    responses(
        (status = 200, description = "Questionnaire saved", body = ApplicationDto),
        (status = 400, description = "Already a member, or an answer is too long", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "No pending application", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn put_questions(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<PutApplicationQuestionsDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let update = ApplicationService::new(&state.db)
        .set_questions(&user, body)
        .await?;

    Ok(updated(&state, update))
}
