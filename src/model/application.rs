use chrono::NaiveDateTime;
use entity::sea_orm_active_enums::{
    ApplicationLocation, ApplicationReferrer, ApplicationRegion, ApplicationStatus, Interest,
    Language,
};
use serde::{Deserialize, Serialize};

use crate::model::user::UserDto;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct ApplicationQuestionsDto {
    pub referrer: Option<ApplicationReferrer>,
    pub region: Option<ApplicationRegion>,
    pub languages: Vec<Language>,
    pub interests: Vec<Interest>,
    pub end_goals: String,
    pub why_autumn: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct ApplicationDto {
    pub id: i32,
    pub user: UserDto,
    /// The user who last decided on the application
    pub reviewer: Option<UserDto>,
    pub status: ApplicationStatus,
    pub rejection_reason: String,
    pub location: ApplicationLocation,
    pub seat_completed: bool,
    pub discord_completed: bool,
    pub questions: ApplicationQuestionsDto,
    pub last_updated: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct GetApplicationsDto {
    pub applications: Vec<ApplicationDto>,
    pub total: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct PutApplicationLocationDto {
    pub location: ApplicationLocation,
}

/// Questionnaire answers. Duplicate languages or interests are collapsed.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct PutApplicationQuestionsDto {
    #[serde(default)]
    pub referrer: Option<ApplicationReferrer>,
    #[serde(default)]
    pub region: Option<ApplicationRegion>,
    pub end_goals: String,
    pub why_autumn: String,
    pub interests: Vec<Interest>,
    pub languages: Vec<Language>,
}

/// Administrative decision on an application.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct PutApplicationStatusDto {
    pub status: ApplicationStatus,
    #[serde(default)]
    pub rejection_reason: Option<String>,
}
