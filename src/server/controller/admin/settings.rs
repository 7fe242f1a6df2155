use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use entity::sea_orm_active_enums::Permission;
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        settings::DiscordWebhooksDto,
    },
    server::{
        controller::{admin::ADMIN_TAG, util::get_user::require_permission},
        error::Error,
        model::app::AppState,
        service::setting::SettingService,
    },
};

/// Configured Discord webhooks
#[utoipa::path(
    get,
    path = "/api/admin/settings/webhooks",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Configured webhooks", body = DiscordWebhooksDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_webhooks(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, Permission::ManageSettings).await?;

    let webhooks = SettingService::new(&state.db).get_webhooks().await?;

    Ok((StatusCode::OK, Json(webhooks)))
}

/// Stores the provided webhooks; an empty value removes one
#[utoipa::path(
    post,
    path = "/api/admin/settings/webhooks",
    tag = ADMIN_TAG,
    request_body = DiscordWebhooksDto,
    responses(
        (status = 200, description = "Webhooks saved", body = DiscordWebhooksDto),
        (status = 400, description = "No webhooks provided or invalid webhook URL", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn post_webhooks(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<DiscordWebhooksDto>,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, Permission::ManageSettings).await?;

    let webhooks = SettingService::new(&state.db).set_webhooks(body).await?;

    Ok((StatusCode::OK, Json(webhooks)))
}

/// Sends a test message to each provided webhook
#[utoipa::path(
    post,
    path = "/api/admin/settings/webhooks/test",
    tag = ADMIN_TAG,
    request_body = DiscordWebhooksDto,
    responses(
        (status = 200, description = "Test messages delivered", body = MessageDto),
        (status = 400, description = "Invalid webhook URL or delivery failed", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn post_webhooks_test(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<DiscordWebhooksDto>,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, Permission::ManageSettings).await?;

    SettingService::new(&state.db)
        .test_webhooks(&state.discord_client, &body)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: "Test messages sent".to_string(),
        }),
    ))
}
