use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dioxus_logger::tracing;
use entity::sea_orm_active_enums::ApplicationStatus;
use thiserror::Error;

use crate::server::error::error_response;

/// Errors raised by the application state machine.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Application ID {0:?} not found")]
    NotFound(i32),
    #[error("User has no application, or only an expired one")]
    NoApplication,
    #[error("User has no pending application")]
    NoPendingApplication,
    #[error("Already a member of Autumn")]
    AlreadyMember,
    #[error("User was rejected within the last 30 days")]
    RejectionCooldown,
    #[error("User already has an active application with status {0}")]
    ActiveApplicationExists(ApplicationStatus),
    #[error("Cannot modify application with status {0}")]
    TerminalStatus(ApplicationStatus),
    #[error("Application is already {0}")]
    AlreadyInStatus(ApplicationStatus),
    #[error("Application ID {0:?} changed status while being updated")]
    StatusChanged(i32),
    #[error("Invalid status parameter: {0}")]
    InvalidStatus(ApplicationStatus),
    #[error("Rejection reason required for rejected applications")]
    MissingRejectionReason,
    #[error("\"{0}\" answer must be less than 250 characters")]
    AnswerTooLong(&'static str),
}

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::NotFound(_) => error_response(StatusCode::NOT_FOUND, "Application not found"),
            Self::NoApplication => {
                error_response(StatusCode::NOT_FOUND, "No valid application found.")
            }
            Self::NoPendingApplication => {
                error_response(StatusCode::NOT_FOUND, "No pending application found")
            }
            Self::RejectionCooldown => error_response(
                StatusCode::BAD_REQUEST,
                "You have been rejected within the last 30 days, you are welcome to apply again after the 30 day cooldown.",
            ),
            Self::ActiveApplicationExists(_)
            | Self::TerminalStatus(_)
            | Self::AlreadyInStatus(_) => error_response(StatusCode::CONFLICT, self.to_string()),
            Self::StatusChanged(_) => error_response(
                StatusCode::CONFLICT,
                "Application was modified by another request, please try again",
            ),
            Self::InvalidStatus(_) => {
                error_response(StatusCode::BAD_REQUEST, "Invalid status parameter")
            }
            Self::AlreadyMember | Self::MissingRejectionReason | Self::AnswerTooLong(_) => {
                error_response(StatusCode::BAD_REQUEST, self.to_string())
            }
        }
    }
}
