//! Error types for the recruitment server.
//!
//! Each domain has its own `thiserror` enum with an `IntoResponse` implementation deciding the
//! status code and message shown to API consumers. [`Error`] aggregates them together with the
//! library errors so handlers and services can propagate everything with `?`.

pub mod application;
pub mod auth;
pub mod config;
pub mod retry;
pub mod seat;
pub mod settings;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dioxus_logger::tracing;
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        application::ApplicationError, auth::AuthError, config::ConfigError, seat::SeatError,
        settings::SettingsError,
    },
};

/// Main error type for the recruitment server.
///
/// Domain errors carry their own HTTP mapping. Library errors are treated as internal server
/// errors, logged, and answered with a generic message.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Authentication or authorization error (session, CSRF, permissions).
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Application lifecycle error (invalid transition, cooldown, missing application).
    #[error(transparent)]
    ApplicationError(#[from] ApplicationError),
    /// SeAT directory error (invalid key, unknown role).
    #[error(transparent)]
    SeatError(#[from] SeatError),
    /// Webhook settings error (validation, test delivery).
    #[error(transparent)]
    SettingsError(#[from] SettingsError),
    /// Malformed request input not caught by deserialization, such as out of range pagination.
    #[error("{0}")]
    BadRequest(String),
    /// Parse error (failed to parse a value from string or other format).
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// Internal error indicating a bug or a data integrity violation.
    #[error("Internal error: {0:?}")]
    InternalError(String),
    /// ESI client error (API requests, OAuth, JWT validation).
    #[error(transparent)]
    EsiError(#[from] eve_esi::Error),
    /// HTTP client error for SeAT, zKillboard and Discord requests.
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Session error (session retrieval, storage, serialization).
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    /// Redis session store error (connection, command execution).
    #[error(transparent)]
    SessionRedisError(#[from] tower_sessions_redis_store::fred::prelude::Error),
    /// Cron scheduler error (job registration, scheduler startup).
    #[error(transparent)]
    SchedulerError(#[from] tokio_cron_scheduler::JobSchedulerError),
}

/// Maps domain errors to their own responses and everything else to a 500.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::ApplicationError(err) => err.into_response(),
            Self::SeatError(err) => err.into_response(),
            Self::SettingsError(err) => err.into_response(),
            Self::BadRequest(message) => {
                tracing::debug!("Bad request: {}", message);

                error_response(StatusCode::BAD_REQUEST, message)
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Builds a JSON [`ErrorDto`] response with the given status.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorDto {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// The full error is logged while the client only receives a generic message.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

#[cfg(test)]
impl From<Error> for recruit_test_utils::TestError {
    fn from(err: Error) -> Self {
        recruit_test_utils::TestError::Other(err.to_string())
    }
}
