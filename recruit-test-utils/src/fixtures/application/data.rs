use chrono::{NaiveDateTime, Utc};
use entity::{
    application, application_interest, application_language, notification,
    prelude::*,
    sea_orm_active_enums::{
        ApplicationLocation, ApplicationStatus, Interest, Language, NotificationKind,
    },
};
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, fixtures::application::ApplicationFixtures};

impl<'a> ApplicationFixtures<'a> {
    /// Inserts a Nullsec application with every step incomplete, last updated now.
    pub async fn insert_application(
        &self,
        user_id: i32,
        status: ApplicationStatus,
    ) -> Result<application::Model, TestError> {
        self.insert_application_updated_at(user_id, status, Utc::now().naive_utc())
            .await
    }

    /// Inserts a Nullsec application whose `last_updated` is `last_updated`.
    pub async fn insert_application_updated_at(
        &self,
        user_id: i32,
        status: ApplicationStatus,
        last_updated: NaiveDateTime,
    ) -> Result<application::Model, TestError> {
        let rejection_reason = if status == ApplicationStatus::Rejected {
            "Rejected in test".to_string()
        } else {
            String::new()
        };

        Ok(Application::insert(application::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            status: ActiveValue::Set(status),
            location: ActiveValue::Set(ApplicationLocation::Nullsec),
            rejection_reason: ActiveValue::Set(rejection_reason),
            reviewer_user_id: ActiveValue::Set(None),
            seat_completed: ActiveValue::Set(false),
            discord_completed: ActiveValue::Set(false),
            questions_completed: ActiveValue::Set(false),
            referrer: ActiveValue::Set(None),
            region: ActiveValue::Set(None),
            end_goals: ActiveValue::Set(String::new()),
            why_autumn: ActiveValue::Set(String::new()),
            created_at: ActiveValue::Set(last_updated),
            last_updated: ActiveValue::Set(last_updated),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.db)
        .await?)
    }

    pub async fn insert_language(
        &self,
        application_id: i32,
        language: Language,
    ) -> Result<application_language::Model, TestError> {
        Ok(
            ApplicationLanguage::insert(application_language::ActiveModel {
                application_id: ActiveValue::Set(application_id),
                language: ActiveValue::Set(language),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    pub async fn insert_interest(
        &self,
        application_id: i32,
        interest: Interest,
    ) -> Result<application_interest::Model, TestError> {
        Ok(
            ApplicationInterest::insert(application_interest::ActiveModel {
                application_id: ActiveValue::Set(application_id),
                interest: ActiveValue::Set(interest),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Inserts an unprocessed outbox row.
    pub async fn insert_notification(
        &self,
        application_id: i32,
        kind: NotificationKind,
        reviewer_user_id: Option<i32>,
    ) -> Result<notification::Model, TestError> {
        Ok(Notification::insert(notification::ActiveModel {
            kind: ActiveValue::Set(kind),
            application_id: ActiveValue::Set(application_id),
            reviewer_user_id: ActiveValue::Set(reviewer_user_id),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            processed_at: ActiveValue::Set(None),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.db)
        .await?)
    }
}
