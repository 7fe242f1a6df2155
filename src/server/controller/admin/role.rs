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
        seat_role::{GetSeatRoleUsersDto, GetSeatRolesDto, RolePermissionsDto},
    },
    server::{
        controller::{
            admin::ADMIN_TAG,
            util::{
                get_user::require_permission,
                pagination::{PaginationParams, MAX_PAGE_LIMIT},
            },
        },
        error::Error,
        model::app::AppState,
        service::role::RoleService,
    },
};

#[derive(Deserialize, IntoParams)]
pub struct RoleListParams {
    /// Results per page, 1 to 100
    pub limit: u64,
    /// 1-based page number
    pub page: u64,
    /// Case-insensitive substring of the role name
    pub name: Option<String>,
    /// SeAT role ID
    pub id: Option<i64>,
}

#[derive(Deserialize, IntoParams)]
pub struct RoleUsersParams {
    /// Results per page, 1 to 100
    pub limit: u64,
    /// 1-based page number
    pub page: u64,
    /// Case-insensitive substring of any character owned by the member
    pub character: Option<String>,
}

/// Optional paging of a role's permissions; defaults to everything on one page
#[derive(Deserialize, IntoParams)]
pub struct RolePermissionsParams {
    pub limit: Option<u64>,
    pub page: Option<u64>,
}

/// Mirrored SeAT roles with their member counts
#[utoipa::path(
    get,
    path = "/api/admin/roles",
    tag = ADMIN_TAG,
    params(RoleListParams),
    responses(
        (status = 200, description = "Page of roles", body = GetSeatRolesDto),
        (status = 400, description = "Invalid pagination", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_roles(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<RoleListParams>,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, Permission::ViewApplication).await?;

    let (limit, page) = PaginationParams {
        limit: params.limit,
        page: params.page,
    }
    .validate()?;

    let roles = RoleService::new(&state.db)
        .list_roles(params.name.as_deref(), params.id, limit, page)
        .await?;

    Ok((StatusCode::OK, Json(roles)))
}

/// Members of a role with their characters
#[utoipa::path(
    get,
    path = "/api/admin/roles/{id}/users",
    tag = ADMIN_TAG,
    params(("id" = i32, Path, description = "Role ID"), RoleUsersParams),
    responses(
        (status = 200, description = "Page of role members", body = GetSeatRoleUsersDto),
        (status = 400, description = "Invalid pagination", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Role not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_role_users(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Query(params): Query<RoleUsersParams>,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, Permission::ViewApplication).await?;

    let (limit, page) = PaginationParams {
        limit: params.limit,
        page: params.page,
    }
    .validate()?;

    let users = RoleService::new(&state.db)
        .get_role_users(id, params.character.as_deref(), limit, page)
        .await?;

    Ok((StatusCode::OK, Json(users)))
}

/// Permissions granted by a role
#[utoipa::path(
    get,
    path = "/api/admin/roles/{id}/permissions",
    tag = ADMIN_TAG,
    params(("id" = i32, Path, description = "Role ID"), RolePermissionsParams),
    responses(
        (status = 200, description = "Role permissions", body = RolePermissionsDto),
        (status = 400, description = "Invalid pagination", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Role not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_role_permissions(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Query(params): Query<RolePermissionsParams>,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, Permission::ViewApplication).await?;

    let (limit, page) = PaginationParams {
        limit: params.limit.unwrap_or(MAX_PAGE_LIMIT),
        page: params.page.unwrap_or(1),
    }
    .validate()?;

    let permissions = RoleService::new(&state.db)
        .get_role_permissions(id, limit, page)
        .await?;

    Ok((StatusCode::OK, Json(permissions)))
}

/// Replaces the permissions granted by a role
#[utoipa::path(
    post,
    path = "/api/admin/roles/{id}/permissions",
    tag = ADMIN_TAG,
    params(("id" = i32, Path, description = "Role ID")),
    request_body = Vec<Permission>,
    responses(
        (status = 200, description = "Permissions now granted by the role", body = RolePermissionsDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Role not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn post_role_permissions(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(permissions): Json<Vec<Permission>>,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, Permission::Admin).await?;

    let permissions = RoleService::new(&state.db)
        .set_role_permissions(id, permissions)
        .await?;

    Ok((StatusCode::OK, Json(permissions)))
}
