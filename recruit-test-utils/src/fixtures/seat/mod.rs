//! Local mirror of SeAT roles, memberships and permissions, plus the SeAT API endpoints.

pub mod data;
pub mod mockito;

use crate::TestContext;

impl TestContext {
    pub fn seat<'a>(&'a mut self) -> SeatFixtures<'a> {
        SeatFixtures { setup: self }
    }
}

pub struct SeatFixtures<'a> {
    pub setup: &'a mut TestContext,
}
