//! Applications, questionnaire child rows and notification outbox rows.

pub mod data;

use crate::TestContext;

impl TestContext {
    pub fn application<'a>(&'a mut self) -> ApplicationFixtures<'a> {
        ApplicationFixtures { setup: self }
    }
}

pub struct ApplicationFixtures<'a> {
    pub setup: &'a mut TestContext,
}
