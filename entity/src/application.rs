//! A single recruitment application.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{
    ApplicationLocation, ApplicationReferrer, ApplicationRegion, ApplicationStatus,
};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "application")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub status: ApplicationStatus,
    pub location: ApplicationLocation,
    /// Empty unless the application was rejected
    pub rejection_reason: String,
    #[sea_orm(nullable)]
    pub reviewer_user_id: Option<i32>,
    pub seat_completed: bool,
    pub discord_completed: bool,
    pub questions_completed: bool,
    #[sea_orm(nullable)]
    pub referrer: Option<ApplicationReferrer>,
    #[sea_orm(nullable)]
    pub region: Option<ApplicationRegion>,
    pub end_goals: String,
    pub why_autumn: String,
    pub created_at: DateTime,
    /// Bumped on every mutation, drives both the expiry and the rejection cooldown clocks
    pub last_updated: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::recruit_user::Entity",
        from = "Column::UserId",
        to = "super::recruit_user::Column::Id"
    )]
    RecruitUser,
    #[sea_orm(
        belongs_to = "super::recruit_user::Entity",
        from = "Column::ReviewerUserId",
        to = "super::recruit_user::Column::Id"
    )]
    Reviewer,
}

impl Related<super::recruit_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RecruitUser.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
