//! Cron-based scheduler for the recurring recruitment jobs.
//!
//! Each job is registered on its own `tokio-cron-scheduler` timer and receives a clone of the
//! shared [`AppState`]. Runs may overlap; the jobs themselves only perform guarded writes.

use std::{fmt::Display, sync::Arc};

use dioxus_logger::tracing;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{error::Error, model::app::AppState, task};

pub mod config;

/// Job scheduler for the stats, sweeper, SeAT mirror and notification jobs.
pub struct Scheduler {
    state: AppState,
    sched: JobScheduler,
}

impl Scheduler {
    /// Creates a new instance of [`Scheduler`].
    ///
    /// # Returns
    /// - `Ok(Scheduler)` - Successfully created scheduler instance
    /// - `Err(Error)` - Failed to initialize the underlying job scheduler
    pub async fn new(state: AppState) -> Result<Self, Error> {
        let sched = JobScheduler::new().await?;
        Ok(Self { state, sched })
    }

    /// Registers all scheduled jobs and starts the scheduler.
    ///
    /// The following jobs are registered:
    /// - Corporation stats collection
    /// - Application expiry & promotion sweep
    /// - SeAT role mirror
    /// - Notification delivery
    pub async fn start(mut self) -> Result<(), Error> {
        self.schedule_job(
            config::CORPORATION_STATS_CRON,
            "corporation stats",
            |state| async move {
                task::corporation_stats(&state.db, &state.zkill_client)
                    .await
                    .map(|count| format!("Collected stats for {} corporations", count))
            },
        )
        .await?;

        self.schedule_job(
            config::UPDATE_APPLICATIONS_CRON,
            "update applications",
            |state| async move { task::update_applications(&state.db, &state.esi_client).await },
        )
        .await?;

        self.schedule_job(
            config::SYNC_SEAT_ROLES_CRON,
            "sync SeAT roles",
            |state| async move { task::sync_seat_roles(&state.db, &state.seat_client).await },
        )
        .await?;

        self.schedule_job(
            config::DELIVER_NOTIFICATIONS_CRON,
            "deliver notifications",
            |state| async move {
                task::deliver_notifications(
                    &state.db,
                    &state.discord_client,
                    &state.frontend_url,
                )
                .await
            },
        )
        .await?;

        self.sched.start().await?;

        Ok(())
    }

    /// Schedules a recurring job with the specified cron expression.
    ///
    /// The job receives a clone of the application state and logs its summary on success or
    /// the error on failure; a failed run never stops later runs.
    ///
    /// # Arguments
    /// - `cron` - Cron expression defining when the job should run (e.g., "0 0 * * * *" for hourly)
    /// - `name` - Human-readable name for the job (used in log messages)
    /// - `function` - Async job returning a printable summary
    pub async fn schedule_job<F, Fut, S>(
        &mut self,
        cron: &str,
        name: &str,
        function: F,
    ) -> Result<(), Error>
    where
        F: Fn(AppState) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<S, Error>> + Send + 'static,
        S: Display,
    {
        let state = self.state.clone();
        let name = name.to_string();
        let function = Arc::new(function);

        self.sched
            .add(Job::new_async(cron, move |_, _| {
                let state = state.clone();
                let name = name.clone();
                let function = Arc::clone(&function);

                Box::pin(async move {
                    match function(state).await {
                        Ok(summary) => tracing::info!("Ran {} job: {}", name, summary),
                        Err(e) => tracing::error!("Error running {} job: {:?}", name, e),
                    }
                })
            })?)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tokio_cron_scheduler::Job;

    use super::config;

    /// Expect every configured expression to be accepted as a job schedule
    #[tokio::test]
    async fn cron_expressions_parse() {
        for expression in [
            config::CORPORATION_STATS_CRON,
            config::UPDATE_APPLICATIONS_CRON,
            config::SYNC_SEAT_ROLES_CRON,
            config::DELIVER_NOTIFICATIONS_CRON,
        ] {
            let job = Job::new_async(expression, |_, _| Box::pin(async {}));

            assert!(job.is_ok(), "invalid cron expression {}", expression);
        }
    }
}
