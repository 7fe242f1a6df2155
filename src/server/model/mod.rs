//! Server-side models: shared application state, SSO identity and session wrappers.

pub mod app;
pub mod auth;
pub mod session;
