//! Data access layer repositories.
//!
//! Every repository borrows a [`sea_orm::ConnectionTrait`] so the same code runs on a pooled
//! connection or inside a transaction opened by a service.

pub mod application;
pub mod eve;
pub mod notification;
pub mod seat;
pub mod setting;
pub mod stats;
pub mod user;

/// Row offset of the 1-based `page`, clamped to the largest offset the database accepts
pub fn page_offset(limit: u64, page: u64) -> u64 {
    page.saturating_sub(1)
        .saturating_mul(limit)
        .min(i64::MAX as u64)
}

#[cfg(test)]
mod tests {
    use super::page_offset;

    #[test]
    fn offsets_pages() {
        assert_eq!(page_offset(10, 1), 0);
        assert_eq!(page_offset(10, 3), 20);
        assert_eq!(page_offset(100, u64::MAX), i64::MAX as u64);
    }
}
