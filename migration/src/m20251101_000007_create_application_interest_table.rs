use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000005_create_application_table::Application;

static IDX_APPLICATION_INTEREST_APPLICATION_ID: &str = "idx_application_interest_application_id";
static FK_APPLICATION_INTEREST_APPLICATION_ID: &str = "fk_application_interest_application_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ApplicationInterest::Table)
                    .if_not_exists()
                    .col(pk_auto(ApplicationInterest::Id))
                    .col(integer(ApplicationInterest::ApplicationId))
                    .col(string_len(ApplicationInterest::Interest, 32))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_APPLICATION_INTEREST_APPLICATION_ID)
                    .table(ApplicationInterest::Table)
                    .col(ApplicationInterest::ApplicationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_APPLICATION_INTEREST_APPLICATION_ID)
                    .from_tbl(ApplicationInterest::Table)
                    .from_col(ApplicationInterest::ApplicationId)
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
                    .name(FK_APPLICATION_INTEREST_APPLICATION_ID)
                    .table(ApplicationInterest::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_APPLICATION_INTEREST_APPLICATION_ID)
                    .table(ApplicationInterest::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ApplicationInterest::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum ApplicationInterest {
    Table,
    Id,
    ApplicationId,
    Interest,
}
