//! HTTP controller endpoints for the recruitment API.
//!
//! Axum handlers for EVE SSO login, the applicant flow, the public stats query and the admin
//! surfaces. Handlers resolve the session user, call into services and map results to JSON; each
//! carries a utoipa annotation for the OpenAPI document.

pub mod admin;
pub mod application;
pub mod auth;
pub mod join;
pub mod util;
