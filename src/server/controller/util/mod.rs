//! Utility functions for controller request handling.
//!
//! Reusable helpers for CSRF validation in the SSO flow, session user and permission checks on
//! protected endpoints, pagination bounds and background notification delivery.

pub mod csrf;
pub mod get_user;
pub mod notify;
pub mod pagination;
