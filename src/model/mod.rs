//! Request and response bodies exchanged over the HTTP API.

pub mod api;
pub mod application;
pub mod seat_role;
pub mod settings;
pub mod stats;
pub mod user;
