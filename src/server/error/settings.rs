use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dioxus_logger::tracing;
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("No webhooks provided")]
    NoWebhooksProvided,
    #[error("Invalid {0} webhook")]
    InvalidWebhook(&'static str),
    #[error("Failed to send test message to {description} webhook: {reason}")]
    TestDeliveryFailed {
        description: &'static str,
        reason: String,
    },
}

impl IntoResponse for SettingsError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        error_response(StatusCode::BAD_REQUEST, self.to_string())
    }
}
