//! Server application core modules.
//!
//! Everything behind the recruitment API: HTTP routing and controllers, the application state
//! machine and its services, repositories over the sea-orm entities, clients for SeAT,
//! zKillboard and Discord, and the scheduled jobs keeping applications, roles, stats and
//! notifications moving.

pub mod client;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod task;
pub mod util;
