use chrono::Utc;
use entity::sea_orm_active_enums::{
    ApplicationLocation, ApplicationReferrer, ApplicationRegion, ApplicationStatus,
};
use migration::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::data::page_offset;

/// Filters accepted by the admin application listing. `None` fields are not applied.
#[derive(Debug, Default, Clone)]
pub struct ApplicationFilter {
    pub status: Option<ApplicationStatus>,
    pub location: Option<ApplicationLocation>,
    pub seat_completed: Option<bool>,
    pub discord_completed: Option<bool>,
    /// Applicants to restrict to; an empty list matches nothing
    pub user_ids: Option<Vec<i32>>,
}

/// Questionnaire text and single-choice answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionAnswers {
    pub referrer: Option<ApplicationReferrer>,
    pub region: Option<ApplicationRegion>,
    pub end_goals: String,
    pub why_autumn: String,
}

pub struct ApplicationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ApplicationRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a Pending application with every step incomplete
    pub async fn create(
        &self,
        user_id: i32,
        location: ApplicationLocation,
    ) -> Result<entity::application::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let application = entity::application::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            status: ActiveValue::Set(ApplicationStatus::Pending),
            location: ActiveValue::Set(location),
            rejection_reason: ActiveValue::Set(String::new()),
            reviewer_user_id: ActiveValue::Set(None),
            seat_completed: ActiveValue::Set(false),
            discord_completed: ActiveValue::Set(false),
            questions_completed: ActiveValue::Set(false),
            referrer: ActiveValue::Set(None),
            region: ActiveValue::Set(None),
            end_goals: ActiveValue::Set(String::new()),
            why_autumn: ActiveValue::Set(String::new()),
            created_at: ActiveValue::Set(now),
            last_updated: ActiveValue::Set(now),
            ..Default::default()
        };

        application.insert(self.db).await
    }

    pub async fn get(&self, id: i32) -> Result<Option<entity::application::Model>, DbErr> {
        entity::prelude::Application::find_by_id(id)
            .one(self.db)
            .await
    }

    /// The user's most recently updated application of any status
    pub async fn get_latest_for_user(
        &self,
        user_id: i32,
    ) -> Result<Option<entity::application::Model>, DbErr> {
        entity::prelude::Application::find()
            .filter(entity::application::Column::UserId.eq(user_id))
            .order_by_desc(entity::application::Column::LastUpdated)
            .order_by_desc(entity::application::Column::Id)
            .one(self.db)
            .await
    }

    /// The user's most recently updated application with the given status
    pub async fn get_latest_for_user_with_status(
        &self,
        user_id: i32,
        status: ApplicationStatus,
    ) -> Result<Option<entity::application::Model>, DbErr> {
        entity::prelude::Application::find()
            .filter(entity::application::Column::UserId.eq(user_id))
            .filter(entity::application::Column::Status.eq(status))
            .order_by_desc(entity::application::Column::LastUpdated)
            .order_by_desc(entity::application::Column::Id)
            .one(self.db)
            .await
    }

    /// The user's Pending or Accepted application, if any
    pub async fn get_active_for_user(
        &self,
        user_id: i32,
    ) -> Result<Option<entity::application::Model>, DbErr> {
        entity::prelude::Application::find()
            .filter(entity::application::Column::UserId.eq(user_id))
            .filter(entity::application::Column::Status.is_in(ApplicationStatus::ACTIVE))
            .order_by_desc(entity::application::Column::LastUpdated)
            .one(self.db)
            .await
    }

    /// Every Pending or Accepted application
    pub async fn get_all_active(&self) -> Result<Vec<entity::application::Model>, DbErr> {
        entity::prelude::Application::find()
            .filter(entity::application::Column::Status.is_in(ApplicationStatus::ACTIVE))
            .order_by_asc(entity::application::Column::Id)
            .all(self.db)
            .await
    }

    /// Pages through applications ordered by `last_updated`, newest first
    ///
    /// # Returns
    /// The requested page and the number of applications matching `filter`
    pub async fn list(
        &self,
        filter: &ApplicationFilter,
        limit: u64,
        page: u64,
    ) -> Result<(Vec<entity::application::Model>, u64), DbErr> {
        let mut condition = Condition::all();

        if let Some(status) = filter.status {
            condition = condition.add(entity::application::Column::Status.eq(status));
        }
        if let Some(location) = filter.location {
            condition = condition.add(entity::application::Column::Location.eq(location));
        }
        if let Some(seat_completed) = filter.seat_completed {
            condition = condition.add(entity::application::Column::SeatCompleted.eq(seat_completed));
        }
        if let Some(discord_completed) = filter.discord_completed {
            condition =
                condition.add(entity::application::Column::DiscordCompleted.eq(discord_completed));
        }
        if let Some(user_ids) = &filter.user_ids {
            condition = condition
                .add(entity::application::Column::UserId.is_in(user_ids.iter().copied()));
        }

        let query = entity::prelude::Application::find().filter(condition);

        let total = query.clone().count(self.db).await?;

        let applications = query
            .order_by_desc(entity::application::Column::LastUpdated)
            .order_by_desc(entity::application::Column::Id)
            .offset(page_offset(limit, page))
            .limit(limit)
            .all(self.db)
            .await?;

        Ok((applications, total))
    }

    /// Moves an application from `previous` to `next` only if it is still in `previous`
    ///
    /// `reviewer_user_id` is written when provided. The rejection reason is always overwritten
    /// so it stays empty for every status other than Rejected.
    ///
    /// # Returns
    /// Number of rows updated, 0 when the status changed underneath the caller
    pub async fn update_status(
        &self,
        id: i32,
        previous: ApplicationStatus,
        next: ApplicationStatus,
        reviewer_user_id: Option<i32>,
        rejection_reason: String,
    ) -> Result<u64, DbErr> {
        let mut update = entity::prelude::Application::update_many()
            .col_expr(entity::application::Column::Status, Expr::value(next))
            .col_expr(
                entity::application::Column::RejectionReason,
                Expr::value(rejection_reason),
            )
            .col_expr(
                entity::application::Column::LastUpdated,
                Expr::value(Utc::now().naive_utc()),
            );

        if let Some(reviewer_user_id) = reviewer_user_id {
            update = update.col_expr(
                entity::application::Column::ReviewerUserId,
                Expr::value(reviewer_user_id),
            );
        }

        let result = update
            .filter(entity::application::Column::Id.eq(id))
            .filter(entity::application::Column::Status.eq(previous))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Changes the location of a Pending application
    pub async fn update_location(
        &self,
        id: i32,
        location: ApplicationLocation,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::Application::update_many()
            .col_expr(entity::application::Column::Location, Expr::value(location))
            .col_expr(
                entity::application::Column::LastUpdated,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(entity::application::Column::Id.eq(id))
            .filter(entity::application::Column::Status.eq(ApplicationStatus::Pending))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Marks the SeAT step complete on a Pending application where it is not already set
    pub async fn complete_seat_step(&self, id: i32) -> Result<u64, DbErr> {
        self.complete_step(id, entity::application::Column::SeatCompleted)
            .await
    }

    /// Marks the Discord step complete on a Pending application where it is not already set
    pub async fn complete_discord_step(&self, id: i32) -> Result<u64, DbErr> {
        self.complete_step(id, entity::application::Column::DiscordCompleted)
            .await
    }

    /// Marks the questionnaire complete on a Pending application where it is not already set
    pub async fn complete_questions_step(&self, id: i32) -> Result<u64, DbErr> {
        self.complete_step(id, entity::application::Column::QuestionsCompleted)
            .await
    }

    async fn complete_step(
        &self,
        id: i32,
        column: entity::application::Column,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::Application::update_many()
            .col_expr(column, Expr::value(true))
            .col_expr(
                entity::application::Column::LastUpdated,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(entity::application::Column::Id.eq(id))
            .filter(entity::application::Column::Status.eq(ApplicationStatus::Pending))
            .filter(column.eq(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Writes the questionnaire answers of a Pending application
    pub async fn update_answers(&self, id: i32, answers: QuestionAnswers) -> Result<u64, DbErr> {
        let result = entity::prelude::Application::update_many()
            .col_expr(
                entity::application::Column::Referrer,
                Expr::value(answers.referrer),
            )
            .col_expr(
                entity::application::Column::Region,
                Expr::value(answers.region),
            )
            .col_expr(
                entity::application::Column::EndGoals,
                Expr::value(answers.end_goals),
            )
            .col_expr(
                entity::application::Column::WhyAutumn,
                Expr::value(answers.why_autumn),
            )
            .col_expr(
                entity::application::Column::LastUpdated,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(entity::application::Column::Id.eq(id))
            .filter(entity::application::Column::Status.eq(ApplicationStatus::Pending))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Bumps `last_updated` without changing anything else
    pub async fn touch(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::Application::update_many()
            .col_expr(
                entity::application::Column::LastUpdated,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(entity::application::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(())
    }
}
