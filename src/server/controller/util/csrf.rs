use tower_sessions::Session;

use crate::server::{
    error::{auth::AuthError, Error},
    model::session::auth::SessionAuthCsrf,
};

/// Validate that the session CSRF state exists and matches `state`, consuming the stored state.
pub async fn validate_csrf(session: &Session, csrf_state: &str) -> Result<(), Error> {
    let stored_state = SessionAuthCsrf::remove(session).await?;

    if let Some(state) = stored_state {
        if state == csrf_state {
            return Ok(());
        }
    }

    Err(Error::AuthError(AuthError::CsrfValidationFailed))
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use recruit_test_utils::prelude::*;

    use crate::server::{
        controller::util::csrf::validate_csrf, model::session::auth::SessionAuthCsrf,
    };

    /// Expect a matching state to validate and be consumed
    #[tokio::test]
    async fn validates_csrf_successfully() -> Result<(), TestError> {
        let test = test_setup_with_tables!()?;
        SessionAuthCsrf::insert(&test.session, "state").await?;

        let result = validate_csrf(&test.session, "state").await;
        let replay = validate_csrf(&test.session, "state").await;

        assert!(result.is_ok());
        assert!(replay.is_err());

        Ok(())
    }

    /// Expect 400 Bad Request when the state does not match the session
    #[tokio::test]
    async fn fails_for_csrf_mismatch() -> Result<(), TestError> {
        let test = test_setup_with_tables!()?;
        SessionAuthCsrf::insert(&test.session, "different_state").await?;

        let result = validate_csrf(&test.session, "state").await;

        let resp = result
            .err()
            .ok_or_else(|| TestError::Other("mismatched state validated".to_string()))?
            .into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        Ok(())
    }

    /// Expect 500 Internal Server Error when no state was stored
    #[tokio::test]
    async fn fails_when_csrf_not_in_session() -> Result<(), TestError> {
        let test = test_setup_with_tables!()?;

        let result = validate_csrf(&test.session, "state").await;

        let resp = result
            .err()
            .ok_or_else(|| TestError::Other("missing state validated".to_string()))?
            .into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        Ok(())
    }
}
