use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dioxus_logger::tracing;
use thiserror::Error;

use crate::server::error::{error_response, InternalServerError};

#[derive(Error, Debug)]
pub enum SeatError {
    #[error("SeAT rejected the configured API token")]
    InvalidApplicationKey,
    #[error("SeAT role ID {0:?} is not mirrored locally")]
    RoleNotFound(i64),
}

impl IntoResponse for SeatError {
    fn into_response(self) -> Response {
        match self {
            Self::RoleNotFound(_) => {
                tracing::debug!("{}", self);

                error_response(StatusCode::NOT_FOUND, "Role not found")
            }
            Self::InvalidApplicationKey => InternalServerError(self).into_response(),
        }
    }
}
