use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use entity::sea_orm_active_enums::Permission;
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::ErrorDto,
        user::{GetUserRolesDto, GetUsersDto},
    },
    server::{
        controller::{
            admin::ADMIN_TAG,
            util::{get_user::require_permission, pagination::PaginationParams},
        },
        error::Error,
        model::app::AppState,
        service::user::UserService,
    },
};

#[derive(Deserialize, IntoParams)]
pub struct UserListParams {
    /// Results per page, 1 to 100
    pub limit: u64,
    /// 1-based page number
    pub page: u64,
    /// Case-insensitive substring of any character owned by the user
    pub character: Option<String>,
}

/// Users with their characters
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = ADMIN_TAG,
    params(UserListParams),
    responses(
        (status = 200, description = "Page of users", body = GetUsersDto),
        (status = 400, description = "Invalid pagination", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_users(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<UserListParams>,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, Permission::ViewApplication).await?;

    let (limit, page) = PaginationParams {
        limit: params.limit,
        page: params.page,
    }
    .validate()?;

    let users = UserService::new(&state.db)
        .list_users(params.character.as_deref(), None, limit, page)
        .await?;

    Ok((StatusCode::OK, Json(users)))
}

/// SeAT roles a user belongs to
#[utoipa::path(
    get,
    path = "/api/admin/users/{id}/roles",
    tag = ADMIN_TAG,
    params(("id" = i32, Path, description = "User ID"), PaginationParams),
    responses(
        (status = 200, description = "Page of the user's roles", body = GetUserRolesDto),
        (status = 400, description = "Invalid pagination", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user_roles(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, Permission::ViewApplication).await?;

    let (limit, page) = params.validate()?;

    let roles = UserService::new(&state.db)
        .get_user_roles(id, limit, page)
        .await?;

    Ok((StatusCode::OK, Json(roles)))
}
