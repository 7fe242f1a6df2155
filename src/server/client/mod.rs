//! HTTP clients for the services reached with `reqwest` rather than `eve_esi`.
//!
//! Each client is cheap to clone and shares the connection pool of the `reqwest::Client`
//! built by [`crate::server::startup::build_http_client`].

pub mod discord;
pub mod seat;
pub mod zkill;
