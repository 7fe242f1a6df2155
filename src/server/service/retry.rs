//! Retry logic with exponential backoff for calls to flaky upstreams.
//!
//! [`RetryContext`] runs an async operation up to a fixed number of attempts, sleeping with
//! exponential backoff between attempts and consulting [`Error::to_retry_strategy`] to decide
//! whether a failure is worth another attempt.

use std::time::Duration;

use dioxus_logger::tracing;

use crate::server::error::{retry::ErrorRetryStrategy, Error};

/// Context for executing operations with automatic retry logic.
///
/// Operations receive the 1-based attempt number and must own what they capture, so each
/// attempt starts from the same inputs.
///
/// # Retry Behavior
///
/// - **Max attempts**: 3
/// - **Backoff strategy**: Exponential starting at 1 second (1s, 2s, ...)
/// - **Retry conditions**: Only errors with `ErrorRetryStrategy::Retry` are retried
/// - **Permanent failures**: Errors with `ErrorRetryStrategy::Fail` return immediately
///
/// # Example
///
/// ```ignore
/// let ctx = RetryContext::new();
///
/// let stats = ctx
///     .execute_with_retry("zKillboard stats for corporation 98785281", |_| {
///         let zkill_client = zkill_client.clone();
///
///         Box::pin(async move { zkill_client.get_corporation_stats(98785281).await })
///     })
///     .await?;
/// ```
pub struct RetryContext {
    /// Maximum number of attempts before giving up
    max_attempts: u32,
    /// Initial backoff duration in seconds (doubles with each retry)
    initial_backoff_secs: u64,
}

impl RetryContext {
    const DEFAULT_MAX_ATTEMPTS: u32 = 3;
    const DEFAULT_INITIAL_BACKOFF_SECS: u64 = 1;

    /// Creates a new retry context with 3 max attempts and 1 second initial backoff.
    pub fn new() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            initial_backoff_secs: Self::DEFAULT_INITIAL_BACKOFF_SECS,
        }
    }

    /// Overrides the initial backoff; 0 retries immediately.
    pub fn with_initial_backoff_secs(mut self, secs: u64) -> Self {
        self.initial_backoff_secs = secs;
        self
    }

    /// Executes an operation with automatic retry logic and exponential backoff.
    ///
    /// # Arguments
    /// - `description` - Human-readable description for logging
    /// - `operation` - Async function receiving the attempt number and returning `Result<R, Error>`
    ///
    /// # Returns
    /// - `Ok(R)` - Operation succeeded
    /// - `Err(Error)` - Operation failed permanently or exhausted all attempts
    pub async fn execute_with_retry<R, F>(&self, description: &str, operation: F) -> Result<R, Error>
    where
        F: Fn(u32) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<R, Error>> + Send>>,
    {
        let mut attempt_count = 0;

        loop {
            tracing::debug!(
                "Processing {} (attempt {}/{})",
                description,
                attempt_count + 1,
                self.max_attempts
            );

            match operation(attempt_count + 1).await {
                Ok(result) => {
                    tracing::debug!("Successfully processed {}", description);
                    return Ok(result);
                }
                Err(e) => match e.to_retry_strategy() {
                    ErrorRetryStrategy::Fail => {
                        tracing::error!("Permanent error for {}: {:?}", description, e);
                        return Err(e);
                    }
                    ErrorRetryStrategy::Retry => {
                        attempt_count += 1;
                        if attempt_count >= self.max_attempts {
                            tracing::error!(
                                "Max attempts ({}) exceeded for {}: {:?}",
                                self.max_attempts,
                                description,
                                e
                            );
                            return Err(e);
                        }

                        let backoff_secs = self.initial_backoff_secs * 2_u64.pow(attempt_count - 1);
                        let backoff = Duration::from_secs(backoff_secs);

                        tracing::warn!(
                            "Retrying {} (attempt {}/{}) after {:?}: {:?}",
                            description,
                            attempt_count,
                            self.max_attempts,
                            backoff,
                            e
                        );

                        tokio::time::sleep(backoff).await;
                    }
                },
            }
        }
    }
}

impl Default for RetryContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicU32, Ordering},
        Arc,
    };

    use sea_orm::{DbErr, RuntimeErr};

    use crate::server::{
        error::{application::ApplicationError, Error},
        service::retry::RetryContext,
    };

    /// Expect transient failures to be retried until the operation succeeds
    #[tokio::test]
    async fn retries_transient_failures() {
        let ctx = RetryContext::new().with_initial_backoff_secs(0);

        let result = ctx
            .execute_with_retry("flaky operation", |attempt| {
                Box::pin(async move {
                    if attempt < 3 {
                        return Err(Error::DbErr(DbErr::Conn(RuntimeErr::Internal(
                            "reset".to_string(),
                        ))));
                    }
                    Ok(attempt)
                })
            })
            .await;

        assert!(matches!(result, Ok(3)));
    }

    /// Expect permanent failures to return after a single attempt
    #[tokio::test]
    async fn stops_on_permanent_failure() {
        let ctx = RetryContext::new().with_initial_backoff_secs(0);

        let result: Result<(), Error> = ctx
            .execute_with_retry("failing operation", |attempt| {
                Box::pin(async move { Err(ApplicationError::NotFound(attempt as i32).into()) })
            })
            .await;

        assert!(matches!(
            result,
            Err(Error::ApplicationError(ApplicationError::NotFound(1)))
        ));
    }

    /// Expect the last error once every attempt failed
    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let ctx = RetryContext::new().with_initial_backoff_secs(0);
        let calls = Arc::new(AtomicU32::new(0));

        let result: Result<(), Error> = ctx
            .execute_with_retry("always failing operation", |_| {
                let calls = calls.clone();

                Box::pin(async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err(Error::DbErr(DbErr::ConnectionAcquire(
                        sea_orm::ConnAcquireErr::Timeout,
                    )))
                })
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
