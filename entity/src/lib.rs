//! Database entities for the recruitment service.

pub mod prelude;

pub mod application;
pub mod application_interest;
pub mod application_language;
pub mod corporation_stats;
pub mod eve_character;
pub mod eve_corporation;
pub mod notification;
pub mod recruit_user;
pub mod recruit_user_character;
pub mod sea_orm_active_enums;
pub mod seat_role;
pub mod seat_role_permission;
pub mod seat_role_user;
pub mod setting;
