use serde::Deserialize;
use utoipa::IntoParams;

use crate::server::error::Error;

pub const MAX_PAGE_LIMIT: u64 = 100;

/// Highest page whose row offset still fits the database's signed 64-bit offset
pub const MAX_PAGE: u64 = i64::MAX as u64 / MAX_PAGE_LIMIT;

/// `limit` & `page` query parameters shared by the admin listings
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
pub struct PaginationParams {
    /// Results per page, 1 to 100
    pub limit: u64,
    /// 1-based page number
    pub page: u64,
}

impl PaginationParams {
    /// Returns `(limit, page)` or a 400 when either is out of range
    pub fn validate(self) -> Result<(u64, u64), Error> {
        if !(1..=MAX_PAGE_LIMIT).contains(&self.limit) {
            return Err(Error::BadRequest(format!(
                "limit must be between 1 and {}",
                MAX_PAGE_LIMIT
            )));
        }

        if !(1..=MAX_PAGE).contains(&self.page) {
            return Err(Error::BadRequest(format!(
                "page must be between 1 and {}",
                MAX_PAGE
            )));
        }

        Ok((self.limit, self.page))
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use super::{PaginationParams, MAX_PAGE};

    #[test]
    fn accepts_bounds() {
        assert!(PaginationParams { limit: 1, page: 1 }.validate().is_ok());
        assert!(PaginationParams { limit: 100, page: 7 }.validate().is_ok());
        assert!(PaginationParams {
            limit: 100,
            page: MAX_PAGE
        }
        .validate()
        .is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        for params in [
            PaginationParams { limit: 0, page: 1 },
            PaginationParams { limit: 101, page: 1 },
            PaginationParams { limit: 10, page: 0 },
            PaginationParams {
                limit: 100,
                page: u64::MAX,
            },
        ] {
            let err = params.validate().unwrap_err();

            assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        }
    }
}
