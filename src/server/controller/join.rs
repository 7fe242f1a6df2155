//! Public routes under `/api/join`, used by the recruitment landing page.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{
        api::ErrorDto,
        stats::{StatsDto, StatsRequestDto},
    },
    server::{error::Error, model::app::AppState, service::stats::StatsService},
};

pub static JOIN_TAG: &str = "join";

/// Latest zKillboard stats and recent history of the requested corporations
#[utoipa::path(
    post,
    path = "/api/join/stats",
    tag = JOIN_TAG,
    request_body = StatsRequestDto,
    responses(
        (status = 200, description = "Stats of the requested corporations", body = StatsDto),
        (status = 400, description = "Invalid request body", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn post_stats(
    State(state): State<AppState>,
    Json(body): Json<StatsRequestDto>,
) -> Result<impl IntoResponse, Error> {
    let stats = StatsService::new(&state.db).get_stats(body).await?;

    Ok((StatusCode::OK, Json(stats)))
}
