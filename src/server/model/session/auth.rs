//! OAuth state carried in the session between login and callback.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::server::error::{auth::AuthError, Error};

/// Session key for storing the CSRF state of an in-flight SSO login.
pub const SESSION_AUTH_CSRF_KEY: &str = "recruit:auth:csrf";

#[derive(Default, Deserialize, Serialize, Debug)]
pub struct SessionAuthCsrf(pub String);

impl SessionAuthCsrf {
    /// Stores the CSRF state generated for the login URL, replacing any previous one.
    pub async fn insert(session: &Session, state: &str) -> Result<(), Error> {
        session
            .insert(SESSION_AUTH_CSRF_KEY, SessionAuthCsrf(state.to_string()))
            .await?;

        Ok(())
    }

    /// Reads the CSRF state without consuming it.
    ///
    /// # Returns
    /// - `Ok(String)` - Stored state
    /// - `Err(Error::AuthError(AuthError::CsrfMissingValue))` - No state in session
    pub async fn get(session: &Session) -> Result<String, Error> {
        match session.get::<SessionAuthCsrf>(SESSION_AUTH_CSRF_KEY).await? {
            Some(SessionAuthCsrf(csrf)) => Ok(csrf),
            None => Err(AuthError::CsrfMissingValue.into()),
        }
    }

    /// Removes and returns the CSRF state so it can only be used once.
    ///
    /// # Returns
    /// - `Ok(Some(String))` - State found and removed
    /// - `Err(Error::AuthError(AuthError::CsrfMissingValue))` - No state in session
    pub async fn remove(session: &Session) -> Result<Option<String>, Error> {
        match session.remove::<SessionAuthCsrf>(SESSION_AUTH_CSRF_KEY).await? {
            Some(SessionAuthCsrf(csrf)) => Ok(Some(csrf)),
            None => Err(AuthError::CsrfMissingValue.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use recruit_test_utils::prelude::*;

    use crate::server::{
        error::{auth::AuthError, Error},
        model::session::auth::SessionAuthCsrf,
    };

    /// Expect the latest inserted state to overwrite the previous one
    #[tokio::test]
    async fn overwrites_existing_csrf() -> Result<(), TestError> {
        let test = TestBuilder::new().build().await?;

        SessionAuthCsrf::insert(&test.session, "first_token").await?;
        SessionAuthCsrf::insert(&test.session, "second_token").await?;

        assert_eq!(SessionAuthCsrf::get(&test.session).await?, "second_token");

        Ok(())
    }

    /// Expect CsrfMissingValue when reading from an empty session
    #[tokio::test]
    async fn get_fails_when_csrf_missing() -> Result<(), TestError> {
        let test = TestBuilder::new().build().await?;

        let result = SessionAuthCsrf::get(&test.session).await;

        assert!(matches!(
            result,
            Err(Error::AuthError(AuthError::CsrfMissingValue))
        ));

        Ok(())
    }

    /// Expect remove to return the state once and fail the second time
    #[tokio::test]
    async fn remove_consumes_state() -> Result<(), TestError> {
        let test = TestBuilder::new().build().await?;
        SessionAuthCsrf::insert(&test.session, "state_to_remove").await?;

        let first = SessionAuthCsrf::remove(&test.session).await?;
        let second = SessionAuthCsrf::remove(&test.session).await;

        assert_eq!(first.as_deref(), Some("state_to_remove"));
        assert!(matches!(
            second,
            Err(Error::AuthError(AuthError::CsrfMissingValue))
        ));

        Ok(())
    }
}
