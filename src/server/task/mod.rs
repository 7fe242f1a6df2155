//! Background jobs, run by the scheduler and on demand from the admin task routes.
//!
//! Every job is safe to run concurrently with itself: writes are guarded so an overlapping run
//! finds nothing left to do.

pub mod application;

use sea_orm::DatabaseConnection;

use crate::server::{
    client::{discord::DiscordClient, seat::SeatClient, zkill::ZkillClient},
    error::Error,
    service::{
        notification::{DeliverySummary, NotificationService},
        seat::{SeatSyncService, SeatSyncSummary},
        stats::StatsService,
    },
};

pub use self::application::update_applications;

/// Mirrors SeAT roles and memberships.
pub async fn sync_seat_roles(
    db: &DatabaseConnection,
    seat_client: &SeatClient,
) -> Result<SeatSyncSummary, Error> {
    SeatSyncService::new(db, seat_client).sync().await
}

/// Records today's zKillboard stats for the Autumn corporations.
///
/// # Returns
/// Number of corporations collected
pub async fn corporation_stats(
    db: &DatabaseConnection,
    zkill_client: &ZkillClient,
) -> Result<usize, Error> {
    StatsService::new(db).collect(zkill_client).await
}

/// Posts pending outbox notifications to their Discord webhooks.
pub async fn deliver_notifications(
    db: &DatabaseConnection,
    discord_client: &DiscordClient,
    frontend_url: &str,
) -> Result<DeliverySummary, Error> {
    NotificationService::new(db, discord_client, frontend_url)
        .deliver_pending()
        .await
}
