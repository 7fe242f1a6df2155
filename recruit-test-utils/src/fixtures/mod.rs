//! Fixture helpers used while a test runs.
//!
//! - `auth` - JWT keys, tokens and SSO endpoints
//! - `eve` - corporations, characters and ESI endpoints
//! - `user` - users and character ownership
//! - `application` - applications, questionnaire rows and outbox rows
//! - `seat` - mirrored SeAT roles, memberships and permissions

pub mod application;
pub mod auth;
pub mod eve;
pub mod seat;
pub mod user;
