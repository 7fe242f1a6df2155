use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000003_create_recruit_user_table::RecruitUser;

static IDX_APPLICATION_USER_ID: &str = "idx_application_user_id";
static IDX_APPLICATION_STATUS: &str = "idx_application_status";
static FK_APPLICATION_USER_ID: &str = "fk_application_user_id";
static FK_APPLICATION_REVIEWER_USER_ID: &str = "fk_application_reviewer_user_id";

/// At most one Pending or Accepted application per user
static CREATE_UQ_APPLICATION_USER_ACTIVE: &str = "CREATE UNIQUE INDEX uq_application_user_active \
     ON application (user_id) WHERE status IN ('Pending', 'Accepted')";
static DROP_UQ_APPLICATION_USER_ACTIVE: &str = "DROP INDEX IF EXISTS uq_application_user_active";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Application::Table)
                    .if_not_exists()
                    .col(pk_auto(Application::Id))
                    .col(integer(Application::UserId))
                    .col(string_len(Application::Status, 16))
                    .col(string_len(Application::Location, 16))
                    .col(string(Application::RejectionReason).default(""))
                    .col(integer_null(Application::ReviewerUserId))
                    .col(boolean(Application::SeatCompleted).default(false))
                    .col(boolean(Application::DiscordCompleted).default(false))
                    .col(boolean(Application::QuestionsCompleted).default(false))
                    .col(string_len_null(Application::Referrer, 32))
                    .col(string_len_null(Application::Region, 32))
                    .col(string_len(Application::EndGoals, 250).default(""))
                    .col(string_len(Application::WhyAutumn, 250).default(""))
                    .col(timestamp(Application::CreatedAt))
                    .col(timestamp(Application::LastUpdated))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_APPLICATION_USER_ID)
                    .table(Application::Table)
                    .col(Application::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_APPLICATION_STATUS)
                    .table(Application::Table)
                    .col(Application::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(CREATE_UQ_APPLICATION_USER_ACTIVE)
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_APPLICATION_USER_ID)
                    .from_tbl(Application::Table)
                    .from_col(Application::UserId)
                    .to_tbl(RecruitUser::Table)
                    .to_col(RecruitUser::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_APPLICATION_REVIEWER_USER_ID)
                    .from_tbl(Application::Table)
                    .from_col(Application::ReviewerUserId)
                    .to_tbl(RecruitUser::Table)
                    .to_col(RecruitUser::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for fk in [FK_APPLICATION_REVIEWER_USER_ID, FK_APPLICATION_USER_ID] {
            manager
                .drop_foreign_key(
                    ForeignKey::drop()
                        .name(fk)
                        .table(Application::Table)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .get_connection()
            .execute_unprepared(DROP_UQ_APPLICATION_USER_ACTIVE)
            .await?;

        for idx in [IDX_APPLICATION_STATUS, IDX_APPLICATION_USER_ID] {
            manager
                .drop_index(Index::drop().name(idx).table(Application::Table).to_owned())
                .await?;
        }

        manager
            .drop_table(Table::drop().table(Application::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Application {
    Table,
    Id,
    UserId,
    Status,
    Location,
    RejectionReason,
    ReviewerUserId,
    SeatCompleted,
    DiscordCompleted,
    QuestionsCompleted,
    Referrer,
    Region,
    EndGoals,
    WhyAutumn,
    CreatedAt,
    LastUpdated,
}
