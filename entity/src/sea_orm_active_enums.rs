//! String-backed enums shared by the recruitment tables.
//!
//! Each variant's `string_value` is the exact text stored in the database and the exact text
//! exchanged over the API, so the serde rename always mirrors it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle status of an application.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ApplicationStatus {
    #[sea_orm(string_value = "Pending")]
    Pending,
    #[sea_orm(string_value = "Rejected")]
    Rejected,
    #[sea_orm(string_value = "Cancelled")]
    Cancelled,
    #[sea_orm(string_value = "Accepted")]
    Accepted,
    #[sea_orm(string_value = "Joined")]
    Joined,
    #[sea_orm(string_value = "Expired")]
    Expired,
}

impl ApplicationStatus {
    /// Statuses an application can still move out of.
    pub const ACTIVE: [ApplicationStatus; 2] = [ApplicationStatus::Pending, ApplicationStatus::Accepted];

    /// Returns true once no further transition is possible.
    pub fn is_terminal(&self) -> bool {
        !Self::ACTIVE.contains(self)
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_value())
    }
}

/// Which division the applicant is applying to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ApplicationLocation {
    #[sea_orm(string_value = "Highsec")]
    Highsec,
    #[sea_orm(string_value = "Nullsec")]
    Nullsec,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum ApplicationReferrer {
    #[sea_orm(string_value = "Local Chat")]
    #[serde(rename = "Local Chat")]
    LocalChat,
    #[sea_orm(string_value = "Corp Finder")]
    #[serde(rename = "Corp Finder")]
    CorpFinder,
    #[sea_orm(string_value = "English Recruitment")]
    #[serde(rename = "English Recruitment")]
    EnglishRecruitment,
    #[sea_orm(string_value = "EVE Forums")]
    #[serde(rename = "EVE Forums")]
    EveForums,
    #[sea_orm(string_value = "r/evejobs")]
    #[serde(rename = "r/evejobs")]
    RedditEveJobs,
    #[sea_orm(string_value = "r/eve")]
    #[serde(rename = "r/eve")]
    RedditEve,
    #[sea_orm(string_value = "Friend")]
    Friend,
    #[sea_orm(string_value = "Other")]
    Other,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum ApplicationRegion {
    #[sea_orm(string_value = "Africa")]
    Africa,
    #[sea_orm(string_value = "Asia")]
    Asia,
    #[sea_orm(string_value = "Australia")]
    Australia,
    #[sea_orm(string_value = "Europe")]
    Europe,
    #[sea_orm(string_value = "North America")]
    #[serde(rename = "North America")]
    NorthAmerica,
    #[sea_orm(string_value = "South America")]
    #[serde(rename = "South America")]
    SouthAmerica,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum Language {
    #[sea_orm(string_value = "English")]
    English,
    #[sea_orm(string_value = "French")]
    French,
    #[sea_orm(string_value = "German")]
    German,
    #[sea_orm(string_value = "Spanish")]
    Spanish,
    #[sea_orm(string_value = "Russian")]
    Russian,
    #[sea_orm(string_value = "Chinese")]
    Chinese,
    #[sea_orm(string_value = "Japanese")]
    Japanese,
    #[sea_orm(string_value = "Korean")]
    Korean,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum Interest {
    #[sea_orm(string_value = "PvP")]
    PvP,
    #[sea_orm(string_value = "PvE")]
    PvE,
    #[sea_orm(string_value = "Mining")]
    Mining,
    #[sea_orm(string_value = "Industry")]
    Industry,
    #[sea_orm(string_value = "Exploration")]
    Exploration,
    #[sea_orm(string_value = "Corporation Leadership")]
    #[serde(rename = "Corporation Leadership")]
    CorporationLeadership,
    #[sea_orm(string_value = "Fleet Command")]
    #[serde(rename = "Fleet Command")]
    FleetCommand,
}

/// Permission granted to a SeAT role within the recruitment service.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum Permission {
    #[sea_orm(string_value = "View Application")]
    #[serde(rename = "View Application")]
    ViewApplication,
    #[sea_orm(string_value = "Accept Application")]
    #[serde(rename = "Accept Application")]
    AcceptApplication,
    #[sea_orm(string_value = "Reject Application")]
    #[serde(rename = "Reject Application")]
    RejectApplication,
    #[sea_orm(string_value = "Set Role Permissions")]
    #[serde(rename = "Set Role Permissions")]
    SetRolePermissions,
    #[sea_orm(string_value = "Manage Settings")]
    #[serde(rename = "Manage Settings")]
    ManageSettings,
    #[sea_orm(string_value = "Admin")]
    Admin,
}

/// Lifecycle event recorded in the notification outbox.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum NotificationKind {
    #[sea_orm(string_value = "NewApplication")]
    NewApplication,
    #[sea_orm(string_value = "ReadyForReview")]
    ReadyForReview,
    #[sea_orm(string_value = "Accepted")]
    Accepted,
    #[sea_orm(string_value = "Rejected")]
    Rejected,
    #[sea_orm(string_value = "Expired")]
    Expired,
    #[sea_orm(string_value = "Joined")]
    Joined,
}
