//! EVE Online reference data repositories.
//!
//! Characters and corporations are stored only to the extent the recruitment flow needs them:
//! names for display and the character's current corporation for the membership guard.

pub mod character;
pub mod corporation;
