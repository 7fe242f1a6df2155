use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20251101_000003_create_recruit_user_table::RecruitUser,
    m20251101_000008_create_seat_role_table::SeatRole,
};

static IDX_SEAT_ROLE_USER_ROLE_USER: &str = "idx_seat_role_user_role_user";
static FK_SEAT_ROLE_USER_SEAT_ROLE_ID: &str = "fk_seat_role_user_seat_role_id";
static FK_SEAT_ROLE_USER_USER_ID: &str = "fk_seat_role_user_user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SeatRoleUser::Table)
                    .if_not_exists()
                    .col(pk_auto(SeatRoleUser::Id))
                    .col(integer(SeatRoleUser::SeatRoleId))
                    .col(integer(SeatRoleUser::UserId))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_SEAT_ROLE_USER_ROLE_USER)
                    .table(SeatRoleUser::Table)
                    .col(SeatRoleUser::SeatRoleId)
                    .col(SeatRoleUser::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_SEAT_ROLE_USER_SEAT_ROLE_ID)
                    .from_tbl(SeatRoleUser::Table)
                    .from_col(SeatRoleUser::SeatRoleId)
                    .to_tbl(SeatRole::Table)
                    .to_col(SeatRole::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_SEAT_ROLE_USER_USER_ID)
                    .from_tbl(SeatRoleUser::Table)
                    .from_col(SeatRoleUser::UserId)
                    .to_tbl(RecruitUser::Table)
                    .to_col(RecruitUser::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for fk in [FK_SEAT_ROLE_USER_USER_ID, FK_SEAT_ROLE_USER_SEAT_ROLE_ID] {
            manager
                .drop_foreign_key(ForeignKey::drop().name(fk).table(SeatRoleUser::Table).to_owned())
                .await?;
        }

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_SEAT_ROLE_USER_ROLE_USER)
                    .table(SeatRoleUser::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(SeatRoleUser::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum SeatRoleUser {
    Table,
    Id,
    SeatRoleId,
    UserId,
}
