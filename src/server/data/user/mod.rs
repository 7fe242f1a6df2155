//! User and character ownership repositories.

pub mod user;
pub mod user_character;
