use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use entity::sea_orm_active_enums::{ApplicationLocation, ApplicationStatus, Permission};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::ErrorDto,
        application::{ApplicationDto, GetApplicationsDto, PutApplicationStatusDto},
    },
    server::{
        controller::{
            admin::ADMIN_TAG,
            util::{
                get_user::{get_user_from_session, require_permission},
                notify::spawn_delivery,
                pagination::PaginationParams,
            },
        },
        data::application::application::ApplicationFilter,
        error::Error,
        model::app::AppState,
        service::application::ApplicationService,
    },
};

#[derive(Deserialize, IntoParams)]
pub struct ApplicationListParams {
    /// Results per page, 1 to 100
    pub limit: u64,
    /// 1-based page number
    pub page: u64,
    pub status: Option<ApplicationStatus>,
    pub location: Option<ApplicationLocation>,
    pub seat_completed: Option<bool>,
    pub discord_completed: Option<bool>,
    /// Applicant user ID
    pub user: Option<i32>,
    /// Case-insensitive substring of any character owned by the applicant
    pub character: Option<String>,
}

/// Paginated applications, most recently updated first
#[utoipa::path(
    get,
    path = "/api/admin/applications",
    tag = ADMIN_TAG,
    params(ApplicationListParams),
    responses(
        (status = 200, description = "Page of applications", body = GetApplicationsDto),
        (status = 400, description = "Invalid pagination", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_applications(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<ApplicationListParams>,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, Permission::ViewApplication).await?;

    let (limit, page) = PaginationParams {
        limit: params.limit,
        page: params.page,
    }
    .validate()?;

    let filter = ApplicationFilter {
        status: params.status,
        location: params.location,
        seat_completed: params.seat_completed,
        discord_completed: params.discord_completed,
        user_ids: params.user.map(|user_id| vec![user_id]),
    };

    let applications = ApplicationService::new(&state.db)
        .list(filter, params.character.as_deref(), limit, page)
        .await?;

    Ok((StatusCode::OK, Json(applications)))
}

/// A single application
#[utoipa::path(
    get,
    path = "/api/admin/applications/{id}",
    tag = ADMIN_TAG,
    params(("id" = i32, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Application", body = ApplicationDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Application not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_application(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, Permission::ViewApplication).await?;

    let application = ApplicationService::new(&state.db).get(id).await?;

    Ok((StatusCode::OK, Json(application)))
}

/// Accepts, rejects or cancels an application
///
/// Accepting needs Accept Application, rejecting and cancelling need Reject Application. A
/// rejection must carry a reason.
#[utoipa::path(
    put,
    path = "/api/admin/applications/{id}/status",
    tag = ADMIN_TAG,
    params(("id" = i32, Path, description = "Application ID")),
    request_body = PutApplicationStatusDto,
    responses(
        (status = 200, description = "Updated application", body = ApplicationDto),
        (status = 400, description = "Invalid status or missing rejection reason", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Application not found", body = ErrorDto),
        (status = 409, description = "Application already decided", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn put_application_status(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(body): Json<PutApplicationStatusDto>,
) -> Result<impl IntoResponse, Error> {
    let reviewer = get_user_from_session(&state, &session).await?;

    let update = ApplicationService::new(&state.db)
        .set_status(id, &reviewer, body)
        .await?;

    if update.notified {
        spawn_delivery(&state);
    }

    Ok((StatusCode::OK, Json(update.application)))
}
