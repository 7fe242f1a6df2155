//! Cron expressions for the recurring jobs (seconds precision).

/// Twice a day at minute 36
pub const CORPORATION_STATS_CRON: &str = "0 36 */12 * * *";

/// Every six hours at minute 17
pub const UPDATE_APPLICATIONS_CRON: &str = "0 17 */6 * * *";

/// Hourly at minute 25
pub const SYNC_SEAT_ROLES_CRON: &str = "0 25 * * * *";

/// Every minute
pub const DELIVER_NOTIFICATIONS_CRON: &str = "0 * * * * *";
