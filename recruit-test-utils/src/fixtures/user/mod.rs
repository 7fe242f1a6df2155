//! Users and character ownership rows.

pub mod data;

use crate::TestContext;

impl TestContext {
    pub fn user<'a>(&'a mut self) -> UserFixtures<'a> {
        UserFixtures { setup: self }
    }
}

pub struct UserFixtures<'a> {
    pub setup: &'a mut TestContext,
}
