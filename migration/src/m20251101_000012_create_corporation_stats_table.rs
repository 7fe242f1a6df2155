use sea_orm_migration::{prelude::*, schema::*};

static IDX_CORPORATION_STATS_CORPORATION_ID_DATE: &str = "idx_corporation_stats_corporation_id_date";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CorporationStats::Table)
                    .if_not_exists()
                    .col(pk_auto(CorporationStats::Id))
                    .col(big_integer(CorporationStats::CorporationId))
                    .col(big_integer(CorporationStats::Members))
                    .col(big_integer(CorporationStats::ShipsDestroyed))
                    .col(date(CorporationStats::Date))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CORPORATION_STATS_CORPORATION_ID_DATE)
                    .table(CorporationStats::Table)
                    .col(CorporationStats::CorporationId)
                    .col(CorporationStats::Date)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_CORPORATION_STATS_CORPORATION_ID_DATE)
                    .table(CorporationStats::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CorporationStats::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum CorporationStats {
    Table,
    Id,
    CorporationId,
    Members,
    ShipsDestroyed,
    Date,
}
