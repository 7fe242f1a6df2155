//! Service layer for business logic and orchestration.
//!
//! Services coordinate repositories and upstream clients (ESI, SeAT, zKillboard, Discord) and
//! own the transactional rules of the recruitment flow: the application state machine, the
//! SeAT directory mirror, the affiliation oracle and the notification outbox.

pub mod affiliation;
pub mod application;
pub mod auth;
pub mod eve;
pub mod notification;
pub mod retry;
pub mod role;
pub mod seat;
pub mod setting;
pub mod stats;
pub mod user;
