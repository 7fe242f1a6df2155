use chrono::{Duration, NaiveDateTime, Utc};

/// Applications untouched for this long are expired by the sweeper.
pub const APPLICATION_EXPIRY: Duration = Duration::days(30);

/// A rejected applicant may not apply again until this long after the rejection.
pub const REJECTION_COOLDOWN: Duration = Duration::days(30);

/// Current time in the naive UTC form stored in the database.
pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Whether `timestamp` is strictly older than `window` relative to `now`.
pub fn is_older_than(timestamp: NaiveDateTime, window: Duration, now: NaiveDateTime) -> bool {
    timestamp < now - window
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::{is_older_than, now, APPLICATION_EXPIRY};

    #[test]
    fn thirty_one_days_is_expired() {
        let now = now();

        assert!(is_older_than(
            now - Duration::days(31),
            APPLICATION_EXPIRY,
            now
        ));
    }

    #[test]
    fn twenty_nine_days_is_not_expired() {
        let now = now();

        assert!(!is_older_than(
            now - Duration::days(29),
            APPLICATION_EXPIRY,
            now
        ));
    }
}
