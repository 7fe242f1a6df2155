use sea_orm::DbErr;

use super::Error;

/// Strategy for handling errors in a retry context
pub enum ErrorRetryStrategy {
    /// Retry with exponential backoff (server errors)
    Retry,
    /// Failed permanently (bad request)
    Fail,
}

/// Classifies an HTTP client error: 5xx and transport failures are transient, anything the
/// upstream rejected or we failed to decode is permanent.
fn reqwest_retry_strategy(err: &reqwest::Error) -> ErrorRetryStrategy {
    match err.status() {
        Some(status) if status.is_server_error() => ErrorRetryStrategy::Retry,
        Some(_) => ErrorRetryStrategy::Fail,
        None if err.is_decode() || err.is_builder() => ErrorRetryStrategy::Fail,
        None => ErrorRetryStrategy::Retry,
    }
}

impl Error {
    /// Determine error retry strategy based upon application Error type
    pub fn to_retry_strategy(&self) -> ErrorRetryStrategy {
        match self {
            // ESI request errors - internal errors, bad requests, rate limiting
            Self::EsiError(eve_esi::Error::ReqwestError(reqwest_error)) => {
                reqwest_retry_strategy(reqwest_error)
            }

            // SeAT, zKillboard & Discord requests
            Self::ReqwestError(reqwest_error) => reqwest_retry_strategy(reqwest_error),

            Self::DbErr(db_err) => match db_err {
                DbErr::ConnectionAcquire(_) => ErrorRetryStrategy::Retry,
                DbErr::Conn(_) => ErrorRetryStrategy::Retry,
                // Query, conversion and record errors won't resolve with a retry
                _ => ErrorRetryStrategy::Fail,
            },

            // Session errors - transient, could be Redis connection issues
            Self::SessionError(_) => ErrorRetryStrategy::Retry,
            Self::SessionRedisError(_) => ErrorRetryStrategy::Retry,

            // ESI errors - OAuth, JWT validation, parsing
            Self::EsiError(_) => ErrorRetryStrategy::Fail,

            Self::ConfigError(_) => ErrorRetryStrategy::Fail,
            Self::AuthError(_) => ErrorRetryStrategy::Fail,
            Self::ApplicationError(_) => ErrorRetryStrategy::Fail,
            Self::SeatError(_) => ErrorRetryStrategy::Fail,
            Self::SettingsError(_) => ErrorRetryStrategy::Fail,
            Self::BadRequest(_) => ErrorRetryStrategy::Fail,
            Self::ParseError(_) => ErrorRetryStrategy::Fail,
            Self::InternalError(_) => ErrorRetryStrategy::Fail,
            Self::SchedulerError(_) => ErrorRetryStrategy::Fail,
        }
    }
}
