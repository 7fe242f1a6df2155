use chrono::Utc;
use migration::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, ExprTrait,
    QueryFilter,
};

pub struct CharacterRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CharacterRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a character in the corporation with record ID `corporation_id`
    pub async fn create(
        &self,
        character_id: i64,
        name: String,
        corporation_id: i32,
    ) -> Result<entity::eve_character::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let character = entity::eve_character::ActiveModel {
            character_id: ActiveValue::Set(character_id),
            name: ActiveValue::Set(name),
            corporation_id: ActiveValue::Set(corporation_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        character.insert(self.db).await
    }

    pub async fn get_by_character_id(
        &self,
        character_id: i64,
    ) -> Result<Option<entity::eve_character::Model>, DbErr> {
        entity::prelude::EveCharacter::find()
            .filter(entity::eve_character::Column::CharacterId.eq(character_id))
            .one(self.db)
            .await
    }

    /// Gets a character by record ID along with its corporation
    pub async fn get_with_corporation(
        &self,
        id: i32,
    ) -> Result<
        Option<(
            entity::eve_character::Model,
            Option<entity::eve_corporation::Model>,
        )>,
        DbErr,
    > {
        entity::prelude::EveCharacter::find_by_id(id)
            .find_also_related(entity::eve_corporation::Entity)
            .one(self.db)
            .await
    }

    /// Gets characters by EVE character ID along with their corporations
    pub async fn get_many_with_corporation_by_character_ids(
        &self,
        character_ids: &[i64],
    ) -> Result<
        Vec<(
            entity::eve_character::Model,
            Option<entity::eve_corporation::Model>,
        )>,
        DbErr,
    > {
        if character_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::EveCharacter::find()
            .filter(
                entity::eve_character::Column::CharacterId.is_in(character_ids.iter().copied()),
            )
            .find_also_related(entity::eve_corporation::Entity)
            .all(self.db)
            .await
    }

    pub async fn get_many_by_ids(
        &self,
        ids: &[i32],
    ) -> Result<Vec<entity::eve_character::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::EveCharacter::find()
            .filter(entity::eve_character::Column::Id.is_in(ids.iter().copied()))
            .all(self.db)
            .await
    }

    /// Record IDs of characters whose name contains `name`, ignoring case
    pub async fn find_ids_by_name(&self, name: &str) -> Result<Vec<i32>, DbErr> {
        let pattern = format!("%{}%", name.to_lowercase());

        let characters = entity::prelude::EveCharacter::find()
            .filter(
                Expr::expr(Func::lower(Expr::col((
                    entity::eve_character::Entity,
                    entity::eve_character::Column::Name,
                ))))
                .like(pattern),
            )
            .all(self.db)
            .await?;

        Ok(characters.into_iter().map(|c| c.id).collect())
    }

    /// Moves a character to the corporation with record ID `corporation_id`
    pub async fn update_corporation(
        &self,
        id: i32,
        corporation_id: i32,
    ) -> Result<Option<entity::eve_character::Model>, DbErr> {
        let character = match entity::prelude::EveCharacter::find_by_id(id)
            .one(self.db)
            .await?
        {
            Some(character) => character,
            None => return Ok(None),
        };

        let mut character_am: entity::eve_character::ActiveModel = character.into();
        character_am.corporation_id = ActiveValue::Set(corporation_id);
        character_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        Ok(Some(character_am.update(self.db).await?))
    }
}

#[cfg(test)]
mod tests {
    mod get_with_corporation {
        use recruit_test_utils::prelude::*;

        use crate::server::data::eve::character::CharacterRepository;

        /// Expect the character to be returned alongside its corporation
        #[tokio::test]
        async fn returns_character_and_corporation() -> Result<(), TestError> {
            let mut test = test_setup_with_user_tables!()?;
            let character = test.eve().insert_mock_character(95_000_001, 98000001).await?;

            let repo = CharacterRepository::new(&test.db);
            let result = repo.get_with_corporation(character.id).await?;

            let (found, corporation) = result.expect("character exists");
            assert_eq!(found.character_id, 95_000_001);
            assert_eq!(corporation.map(|c| c.corporation_id), Some(98000001));

            Ok(())
        }

        /// Expect Ok(None) for an unknown record ID
        #[tokio::test]
        async fn returns_none_for_unknown_character() -> Result<(), TestError> {
            let test = test_setup_with_user_tables!()?;

            let repo = CharacterRepository::new(&test.db);
            let result = repo.get_with_corporation(1).await?;

            assert!(result.is_none());

            Ok(())
        }
    }

    mod find_ids_by_name {
        use recruit_test_utils::prelude::*;

        use crate::server::data::eve::character::CharacterRepository;

        /// Expect a case-insensitive substring match on the character name
        #[tokio::test]
        async fn matches_substring_ignoring_case() -> Result<(), TestError> {
            let mut test = test_setup_with_user_tables!()?;
            let first = test.eve().insert_mock_character(95_000_001, 98000001).await?;
            test.eve().insert_mock_character(95_000_002, 98000001).await?;

            let repo = CharacterRepository::new(&test.db);
            let ids = repo.find_ids_by_name("CHARACTER 95000001").await?;

            assert_eq!(ids, vec![first.id]);

            Ok(())
        }
    }

    mod update_corporation {
        use recruit_test_utils::prelude::*;

        use crate::server::data::eve::character::CharacterRepository;

        /// Expect the character to point at the new corporation record
        #[tokio::test]
        async fn moves_character_to_new_corporation() -> Result<(), TestError> {
            let mut test = test_setup_with_user_tables!()?;
            let character = test.eve().insert_mock_character(95_000_001, 98000001).await?;
            let corporation = test.eve().insert_mock_corporation(98785281).await?;

            let repo = CharacterRepository::new(&test.db);
            let updated = repo
                .update_corporation(character.id, corporation.id)
                .await?
                .expect("character exists");

            assert_eq!(updated.corporation_id, corporation.id);

            Ok(())
        }
    }
}
