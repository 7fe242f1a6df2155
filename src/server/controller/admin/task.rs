use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use entity::sea_orm_active_enums::Permission;
use tower_sessions::Session;

use crate::{
    model::api::{ErrorDto, MessageDto},
    server::{
        controller::{
            admin::ADMIN_TAG,
            util::{get_user::require_permission, notify::spawn_delivery},
        },
        error::Error,
        model::app::AppState,
        task,
    },
};

/// Runs the SeAT role mirror now
#[utoipa::path(
    post,
    path = "/api/admin/tasks/sync-seat-roles",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Summary of the mirror run", body = MessageDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn post_sync_seat_roles(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, Permission::ManageSettings).await?;

    let summary = task::sync_seat_roles(&state.db, &state.seat_client).await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: summary.to_string(),
        }),
    ))
}

/// Runs the application expiry & promotion sweep now
#[utoipa::path(
    post,
    path = "/api/admin/tasks/check-accepted-applications",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Summary of the sweep", body = MessageDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn post_check_accepted_applications(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, Permission::ManageSettings).await?;

    let summary = task::update_applications(&state.db, &state.esi_client).await?;

    if summary.expired > 0 || summary.joined > 0 {
        spawn_delivery(&state);
    }

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: summary.to_string(),
        }),
    ))
}
