use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000002_create_eve_character_table::EveCharacter;

static FK_RECRUIT_USER_MAIN_CHARACTER_ID: &str = "fk_recruit_user_main_character_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RecruitUser::Table)
                    .if_not_exists()
                    .col(pk_auto(RecruitUser::Id))
                    .col(big_integer_null(RecruitUser::SeatUserId).unique_key())
                    .col(integer(RecruitUser::MainCharacterId))
                    .col(timestamp(RecruitUser::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_RECRUIT_USER_MAIN_CHARACTER_ID)
                    .from_tbl(RecruitUser::Table)
                    .from_col(RecruitUser::MainCharacterId)
                    .to_tbl(EveCharacter::Table)
                    .to_col(EveCharacter::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_RECRUIT_USER_MAIN_CHARACTER_ID)
                    .table(RecruitUser::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(RecruitUser::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum RecruitUser {
    Table,
    Id,
    SeatUserId,
    MainCharacterId,
    CreatedAt,
}
