use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20251101_000002_create_eve_character_table::EveCharacter,
    m20251101_000003_create_recruit_user_table::RecruitUser,
};

static IDX_RECRUIT_USER_CHARACTER_USER_ID: &str = "idx_recruit_user_character_user_id";
static FK_RECRUIT_USER_CHARACTER_USER_ID: &str = "fk_recruit_user_character_user_id";
static FK_RECRUIT_USER_CHARACTER_CHARACTER_ID: &str = "fk_recruit_user_character_character_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RecruitUserCharacter::Table)
                    .if_not_exists()
                    .col(pk_auto(RecruitUserCharacter::Id))
                    .col(integer(RecruitUserCharacter::UserId))
                    .col(integer_uniq(RecruitUserCharacter::CharacterId))
                    .col(string(RecruitUserCharacter::OwnerHash))
                    .col(timestamp(RecruitUserCharacter::CreatedAt))
                    .col(timestamp(RecruitUserCharacter::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_RECRUIT_USER_CHARACTER_USER_ID)
                    .table(RecruitUserCharacter::Table)
                    .col(RecruitUserCharacter::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_RECRUIT_USER_CHARACTER_USER_ID)
                    .from_tbl(RecruitUserCharacter::Table)
                    .from_col(RecruitUserCharacter::UserId)
                    .to_tbl(RecruitUser::Table)
                    .to_col(RecruitUser::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_RECRUIT_USER_CHARACTER_CHARACTER_ID)
                    .from_tbl(RecruitUserCharacter::Table)
                    .from_col(RecruitUserCharacter::CharacterId)
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
                    .name(FK_RECRUIT_USER_CHARACTER_CHARACTER_ID)
                    .table(RecruitUserCharacter::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_RECRUIT_USER_CHARACTER_USER_ID)
                    .table(RecruitUserCharacter::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_RECRUIT_USER_CHARACTER_USER_ID)
                    .table(RecruitUserCharacter::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(RecruitUserCharacter::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum RecruitUserCharacter {
    Table,
    Id,
    UserId,
    CharacterId,
    OwnerHash,
    CreatedAt,
    UpdatedAt,
}
