use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000008_create_seat_role_table::SeatRole;

static IDX_SEAT_ROLE_PERMISSION_ROLE_PERMISSION: &str = "idx_seat_role_permission_role_permission";
static FK_SEAT_ROLE_PERMISSION_SEAT_ROLE_ID: &str = "fk_seat_role_permission_seat_role_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SeatRolePermission::Table)
                    .if_not_exists()
                    .col(pk_auto(SeatRolePermission::Id))
                    .col(integer(SeatRolePermission::SeatRoleId))
                    .col(string_len(SeatRolePermission::Permission, 32))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_SEAT_ROLE_PERMISSION_ROLE_PERMISSION)
                    .table(SeatRolePermission::Table)
                    .col(SeatRolePermission::SeatRoleId)
                    .col(SeatRolePermission::Permission)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_SEAT_ROLE_PERMISSION_SEAT_ROLE_ID)
                    .from_tbl(SeatRolePermission::Table)
                    .from_col(SeatRolePermission::SeatRoleId)
                    .to_tbl(SeatRole::Table)
                    .to_col(SeatRole::Id)
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
                    .name(FK_SEAT_ROLE_PERMISSION_SEAT_ROLE_ID)
                    .table(SeatRolePermission::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_SEAT_ROLE_PERMISSION_ROLE_PERMISSION)
                    .table(SeatRolePermission::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(SeatRolePermission::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum SeatRolePermission {
    Table,
    Id,
    SeatRoleId,
    Permission,
}
