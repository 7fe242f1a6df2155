pub use super::application::Entity as Application;
pub use super::application_interest::Entity as ApplicationInterest;
pub use super::application_language::Entity as ApplicationLanguage;
pub use super::corporation_stats::Entity as CorporationStats;
pub use super::eve_character::Entity as EveCharacter;
pub use super::eve_corporation::Entity as EveCorporation;
pub use super::notification::Entity as Notification;
pub use super::recruit_user::Entity as RecruitUser;
pub use super::recruit_user_character::Entity as RecruitUserCharacter;
pub use super::seat_role::Entity as SeatRole;
pub use super::seat_role_permission::Entity as SeatRolePermission;
pub use super::seat_role_user::Entity as SeatRoleUser;
pub use super::setting::Entity as Setting;
