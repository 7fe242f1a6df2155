//! Recruitment service for EVE Online corporations backed by SeAT.

pub mod model;
#[cfg(feature = "server")]
pub mod server;
