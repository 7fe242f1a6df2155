//! Administrative routes under `/api/admin`.
//!
//! Every route resolves the logged in user and checks the permission it needs before touching
//! any data: 401 without a session, 403 without the permission.

pub mod application;
pub mod role;
pub mod settings;
pub mod task;
pub mod user;

pub static ADMIN_TAG: &str = "admin";
