use chrono::Utc;
use entity::sea_orm_active_enums::NotificationKind;
use migration::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

/// The webhook notification outbox.
pub struct NotificationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> NotificationRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Records a notification for later delivery
    ///
    /// Pass the transaction performing the state change so both commit together.
    pub async fn enqueue(
        &self,
        kind: NotificationKind,
        application_id: i32,
        reviewer_user_id: Option<i32>,
    ) -> Result<entity::notification::Model, DbErr> {
        let notification = entity::notification::ActiveModel {
            kind: ActiveValue::Set(kind),
            application_id: ActiveValue::Set(application_id),
            reviewer_user_id: ActiveValue::Set(reviewer_user_id),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            processed_at: ActiveValue::Set(None),
            ..Default::default()
        };

        notification.insert(self.db).await
    }

    /// Notifications nobody has claimed yet, oldest first
    pub async fn get_unprocessed(&self) -> Result<Vec<entity::notification::Model>, DbErr> {
        entity::prelude::Notification::find()
            .filter(entity::notification::Column::ProcessedAt.is_null())
            .order_by_asc(entity::notification::Column::Id)
            .all(self.db)
            .await
    }

    /// Marks a notification as processed if no other delivery pass has
    ///
    /// # Returns
    /// `true` if this call claimed the notification
    pub async fn claim(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Notification::update_many()
            .col_expr(
                entity::notification::Column::ProcessedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(entity::notification::Column::Id.eq(id))
            .filter(entity::notification::Column::ProcessedAt.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }
}
