//! Shared test harness for the recruitment service.
//!
//! Tests are written in two phases: a [`TestBuilder`] declares tables, fixtures and mock
//! endpoints, then the resulting [`TestContext`] exposes the database, ESI client, session
//! and fixture helpers used while the test runs.

pub mod builder;
pub mod constant;
pub mod context;
pub mod error;
pub mod fixtures;
mod macros;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{
        fixtures::{auth::factory as auth_factory, eve::factory},
        test_setup_with_tables, test_setup_with_user_tables, TestBuilder, TestContext, TestError,
    };
}
