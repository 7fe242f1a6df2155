use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000005_create_application_table::Application;

static IDX_APPLICATION_LANGUAGE_APPLICATION_ID: &str = "idx_application_language_application_id";
static FK_APPLICATION_LANGUAGE_APPLICATION_ID: &str = "fk_application_language_application_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ApplicationLanguage::Table)
                    .if_not_exists()
                    .col(pk_auto(ApplicationLanguage::Id))
                    .col(integer(ApplicationLanguage::ApplicationId))
                    .col(string_len(ApplicationLanguage::Language, 32))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_APPLICATION_LANGUAGE_APPLICATION_ID)
                    .table(ApplicationLanguage::Table)
                    .col(ApplicationLanguage::ApplicationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_APPLICATION_LANGUAGE_APPLICATION_ID)
                    .from_tbl(ApplicationLanguage::Table)
                    .from_col(ApplicationLanguage::ApplicationId)
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
                    .name(FK_APPLICATION_LANGUAGE_APPLICATION_ID)
                    .table(ApplicationLanguage::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_APPLICATION_LANGUAGE_APPLICATION_ID)
                    .table(ApplicationLanguage::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ApplicationLanguage::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum ApplicationLanguage {
    Table,
    Id,
    ApplicationId,
    Language,
}
