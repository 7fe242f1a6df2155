//! HTTP routing and OpenAPI documentation configuration.
//!
//! All API endpoints are registered here with their OpenAPI specifications, and Swagger UI is
//! served at `/api/docs`.

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, error::Error, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// # Registered Endpoints
/// - `/api/auth/*` - EVE Online SSO login, callback, logout & current user
/// - `/api/application/*` - Applicant flow for the logged in user
/// - `POST /api/join/stats` - Public corporation stats
/// - `/api/admin/*` - Application review, roles, users, webhook settings & manual task runs
///
/// The OpenAPI specification is available at `/api/docs/openapi.json`.
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Recruit", description = "Autumn recruitment API"), tags(
        (name = controller::auth::AUTH_TAG, description = "Authentication API routes"),
        (name = controller::application::APPLICATION_TAG, description = "Applicant API routes"),
        (name = controller::join::JOIN_TAG, description = "Public recruitment page API routes"),
        (name = controller::admin::ADMIN_TAG, description = "Administration API routes"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::auth::login))
        .routes(routes!(controller::auth::callback))
        .routes(routes!(controller::auth::logout))
        .routes(routes!(controller::auth::get_user))
        .routes(routes!(controller::application::get_application))
        .routes(routes!(controller::application::put_location))
        .routes(routes!(controller::application::get_seat_status))
        .routes(routes!(controller::application::put_discord_complete))
        .routes(routes!(controller::application::put_questions))
        .routes(routes!(controller::join::post_stats))
        .routes(routes!(controller::admin::application::get_applications))
        .routes(routes!(controller::admin::application::get_application))
        .routes(routes!(
            controller::admin::application::put_application_status
        ))
        .routes(routes!(controller::admin::role::get_roles))
        .routes(routes!(controller::admin::role::get_role_users))
        .routes(routes!(
            controller::admin::role::get_role_permissions,
            controller::admin::role::post_role_permissions
        ))
        .routes(routes!(controller::admin::user::get_users))
        .routes(routes!(controller::admin::user::get_user_roles))
        .routes(routes!(
            controller::admin::settings::get_webhooks,
            controller::admin::settings::post_webhooks
        ))
        .routes(routes!(controller::admin::settings::post_webhooks_test))
        .routes(routes!(controller::admin::task::post_sync_seat_roles))
        .routes(routes!(
            controller::admin::task::post_check_accepted_applications
        ))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}

/// Allows the frontend origin to call the API with its session cookie.
pub fn cors_layer(frontend_url: &str) -> Result<CorsLayer, Error> {
    let origin = HeaderValue::from_str(frontend_url)
        .map_err(|e| Error::ParseError(format!("Invalid frontend URL {}: {}", frontend_url, e)))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(600)))
}

