use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dioxus_logger::tracing;
use entity::sea_orm_active_enums::Permission;
use thiserror::Error;

use crate::server::error::{error_response, InternalServerError};

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("User ID is not present in session")]
    UserNotInSession,
    #[error("User ID {0:?} not found in database despite having an active session")]
    UserNotInDatabase(i32),
    #[error("User ID {0:?} not found")]
    UserNotFound(i32),
    #[error("User ID {user_id:?} is missing the {permission:?} permission")]
    MissingPermission {
        user_id: i32,
        permission: Permission,
    },
    #[error("Failed to login user due to CSRF state mismatch")]
    CsrfValidationFailed,
    #[error("Failed to login user due to CSRF state present in session store but without a value")]
    CsrfMissingValue,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::UserNotInSession => {
                tracing::debug!("{}", self);

                error_response(StatusCode::UNAUTHORIZED, "User not logged in")
            }
            Self::UserNotInDatabase(user_id) | Self::UserNotFound(user_id) => {
                tracing::debug!(user_id = %user_id, "{}", self);

                error_response(StatusCode::NOT_FOUND, "User not found")
            }
            Self::MissingPermission { .. } => {
                tracing::debug!("{}", self);

                error_response(StatusCode::FORBIDDEN, "Missing sufficient permissions.")
            }
            Self::CsrfValidationFailed => {
                tracing::debug!("{}", self);

                error_response(
                    StatusCode::BAD_REQUEST,
                    "There was an issue logging you in, please try again.",
                )
            }
            Self::CsrfMissingValue => InternalServerError(self).into_response(),
        }
    }
}
