use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
};

pub struct CorporationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CorporationRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        corporation_id: i64,
        name: String,
    ) -> Result<entity::eve_corporation::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let corporation = entity::eve_corporation::ActiveModel {
            corporation_id: ActiveValue::Set(corporation_id),
            name: ActiveValue::Set(name),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        corporation.insert(self.db).await
    }

    pub async fn get_by_corporation_id(
        &self,
        corporation_id: i64,
    ) -> Result<Option<entity::eve_corporation::Model>, DbErr> {
        entity::prelude::EveCorporation::find()
            .filter(entity::eve_corporation::Column::CorporationId.eq(corporation_id))
            .one(self.db)
            .await
    }

    pub async fn get_many_by_ids(
        &self,
        ids: &[i32],
    ) -> Result<Vec<entity::eve_corporation::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::EveCorporation::find()
            .filter(entity::eve_corporation::Column::Id.is_in(ids.iter().copied()))
            .all(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use recruit_test_utils::prelude::*;

    use crate::server::data::eve::corporation::CorporationRepository;

    /// Expect a created corporation to be found by its EVE ID
    #[tokio::test]
    async fn creates_and_finds_corporation() -> Result<(), TestError> {
        let test = test_setup_with_user_tables!()?;
        let repo = CorporationRepository::new(&test.db);

        let created = repo.create(98785281, "The Order of Autumn".to_string()).await?;
        let found = repo.get_by_corporation_id(98785281).await?;

        assert_eq!(found, Some(created));

        Ok(())
    }

    /// Expect Error when inserting a duplicate corporation ID
    #[tokio::test]
    async fn fails_for_duplicate_corporation_id() -> Result<(), TestError> {
        let mut test = test_setup_with_user_tables!()?;
        test.eve().insert_mock_corporation(98785281).await?;

        let repo = CorporationRepository::new(&test.db);
        let result = repo.create(98785281, "Duplicate".to_string()).await;

        assert!(result.is_err());

        Ok(())
    }

    /// Expect an empty result without querying when no IDs are requested
    #[tokio::test]
    async fn returns_empty_for_no_ids() -> Result<(), TestError> {
        let test = test_setup_with_tables!()?;
        let repo = CorporationRepository::new(&test.db);

        let result = repo.get_many_by_ids(&[]).await?;

        assert!(result.is_empty());

        Ok(())
    }
}
