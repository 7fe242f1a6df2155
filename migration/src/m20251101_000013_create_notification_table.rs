use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000005_create_application_table::Application;

static IDX_NOTIFICATION_PROCESSED_AT: &str = "idx_notification_processed_at";
static FK_NOTIFICATION_APPLICATION_ID: &str = "fk_notification_application_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Notification::Table)
                    .if_not_exists()
                    .col(pk_auto(Notification::Id))
                    .col(string_len(Notification::Kind, 32))
                    .col(integer(Notification::ApplicationId))
                    .col(integer_null(Notification::ReviewerUserId))
                    .col(timestamp(Notification::CreatedAt))
                    .col(timestamp_null(Notification::ProcessedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_NOTIFICATION_PROCESSED_AT)
                    .table(Notification::Table)
                    .col(Notification::ProcessedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_NOTIFICATION_APPLICATION_ID)
                    .from_tbl(Notification::Table)
                    .from_col(Notification::ApplicationId)
                    .to_tbl(Application::Table)
                    .to_col(Application::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_NOTIFICATION_APPLICATION_ID)
                    .table(Notification::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_NOTIFICATION_PROCESSED_AT)
                    .table(Notification::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Notification::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Notification {
    Table,
    Id,
    Kind,
    ApplicationId,
    ReviewerUserId,
    CreatedAt,
    ProcessedAt,
}
