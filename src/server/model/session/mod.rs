//! Type-safe wrappers around values stored in the user's session.

pub mod auth;
pub mod user;
