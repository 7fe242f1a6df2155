use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SeatRole::Table)
                    .if_not_exists()
                    .col(pk_auto(SeatRole::Id))
                    .col(big_integer_uniq(SeatRole::SeatRoleId))
                    .col(string(SeatRole::Name))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SeatRole::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum SeatRole {
    Table,
    Id,
    SeatRoleId,
    Name,
}
