use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

pub struct CorporationStatsRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CorporationStatsRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        corporation_id: i64,
        members: i64,
        ships_destroyed: i64,
        date: NaiveDate,
    ) -> Result<entity::corporation_stats::Model, DbErr> {
        let stats = entity::corporation_stats::ActiveModel {
            corporation_id: ActiveValue::Set(corporation_id),
            members: ActiveValue::Set(members),
            ships_destroyed: ActiveValue::Set(ships_destroyed),
            date: ActiveValue::Set(date),
            ..Default::default()
        };

        stats.insert(self.db).await
    }

    pub async fn exists_for_date(&self, corporation_id: i64, date: NaiveDate) -> Result<bool, DbErr> {
        let count = entity::prelude::CorporationStats::find()
            .filter(entity::corporation_stats::Column::CorporationId.eq(corporation_id))
            .filter(entity::corporation_stats::Column::Date.eq(date))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    pub async fn get_latest(
        &self,
        corporation_id: i64,
    ) -> Result<Option<entity::corporation_stats::Model>, DbErr> {
        entity::prelude::CorporationStats::find()
            .filter(entity::corporation_stats::Column::CorporationId.eq(corporation_id))
            .order_by_desc(entity::corporation_stats::Column::Date)
            .order_by_desc(entity::corporation_stats::Column::Id)
            .one(self.db)
            .await
    }

    /// Most recent `limit` entries, newest first
    pub async fn get_history(
        &self,
        corporation_id: i64,
        limit: u64,
    ) -> Result<Vec<entity::corporation_stats::Model>, DbErr> {
        entity::prelude::CorporationStats::find()
            .filter(entity::corporation_stats::Column::CorporationId.eq(corporation_id))
            .order_by_desc(entity::corporation_stats::Column::Date)
            .order_by_desc(entity::corporation_stats::Column::Id)
            .limit(limit)
            .all(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};
    use recruit_test_utils::prelude::*;

    use crate::server::data::stats::CorporationStatsRepository;

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date") + Duration::days(offset)
    }

    /// Expect the latest entry to be the one with the newest date
    #[tokio::test]
    async fn latest_is_newest_date() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::CorporationStats)
            .build()
            .await?;
        let repo = CorporationStatsRepository::new(&test.db);
        repo.create(98785281, 100, 5000, day(1)).await?;
        repo.create(98785281, 90, 4000, day(0)).await?;

        let latest = repo.get_latest(98785281).await?.expect("stats exist");

        assert_eq!(latest.members, 100);
        assert!(repo.exists_for_date(98785281, day(1)).await?);
        assert!(!repo.exists_for_date(98785281, day(2)).await?);

        Ok(())
    }

    /// Expect history to be capped at the limit, newest first
    #[tokio::test]
    async fn history_is_capped() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::CorporationStats)
            .build()
            .await?;
        let repo = CorporationStatsRepository::new(&test.db);
        for offset in 0..5 {
            repo.create(98784256, offset, offset, day(offset)).await?;
        }

        let history = repo.get_history(98784256, 3).await?;

        assert_eq!(
            history.iter().map(|e| e.date).collect::<Vec<_>>(),
            vec![day(4), day(3), day(2)]
        );

        Ok(())
    }
}
