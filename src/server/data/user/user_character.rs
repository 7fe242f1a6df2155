use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

pub struct UserCharacterRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserCharacterRepository<'a, C> {
    /// Creates a new instance of [`UserCharacterRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Create a new entry for a character owned by a user
    ///
    /// # Arguments
    /// - `user_id` (`i32`): ID of the user entry in the database
    /// - `character_id` (`i32`): ID of the character entry in the database
    /// - `owner_hash` (`String`): A string representing the ownership of the character
    pub async fn create(
        &self,
        user_id: i32,
        character_id: i32,
        owner_hash: String,
    ) -> Result<entity::recruit_user_character::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let user_character = entity::recruit_user_character::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            character_id: ActiveValue::Set(character_id),
            owner_hash: ActiveValue::Set(owner_hash),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        user_character.insert(self.db).await
    }

    /// Get the ownership entry for a character record
    pub async fn get_by_character_id(
        &self,
        character_id: i32,
    ) -> Result<Option<entity::recruit_user_character::Model>, DbErr> {
        entity::prelude::RecruitUserCharacter::find()
            .filter(entity::recruit_user_character::Column::CharacterId.eq(character_id))
            .one(self.db)
            .await
    }

    /// Gets every owned character for the provided users, ordered by character record ID
    pub async fn get_many_by_user_ids(
        &self,
        user_ids: &[i32],
    ) -> Result<
        Vec<(
            entity::recruit_user_character::Model,
            Option<entity::eve_character::Model>,
        )>,
        DbErr,
    > {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::RecruitUserCharacter::find()
            .filter(entity::recruit_user_character::Column::UserId.is_in(user_ids.iter().copied()))
            .order_by_asc(entity::recruit_user_character::Column::CharacterId)
            .find_also_related(entity::eve_character::Entity)
            .all(self.db)
            .await
    }

    /// IDs of the users owning any of the character records `character_ids`
    pub async fn get_user_ids_by_character_ids(
        &self,
        character_ids: &[i32],
    ) -> Result<Vec<i32>, DbErr> {
        if character_ids.is_empty() {
            return Ok(Vec::new());
        }

        let entries = entity::prelude::RecruitUserCharacter::find()
            .filter(
                entity::recruit_user_character::Column::CharacterId
                    .is_in(character_ids.iter().copied()),
            )
            .all(self.db)
            .await?;

        let mut user_ids: Vec<i32> = entries.into_iter().map(|e| e.user_id).collect();
        user_ids.sort_unstable();
        user_ids.dedup();

        Ok(user_ids)
    }

    /// Moves an ownership entry to `new_user_id` and records the current owner hash
    ///
    /// # Returns
    /// - `Some(model)` if the entry was updated
    /// - `None` if no entry with that ID exists
    pub async fn update(
        &self,
        user_character_entry_id: i32,
        new_user_id: i32,
        owner_hash: String,
    ) -> Result<Option<entity::recruit_user_character::Model>, DbErr> {
        let user_character =
            match entity::prelude::RecruitUserCharacter::find_by_id(user_character_entry_id)
                .one(self.db)
                .await?
            {
                Some(user_character) => user_character,
                None => return Ok(None),
            };

        let mut user_character_am = user_character.into_active_model();
        user_character_am.user_id = ActiveValue::Set(new_user_id);
        user_character_am.owner_hash = ActiveValue::Set(owner_hash);
        user_character_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        Ok(Some(user_character_am.update(self.db).await?))
    }
}
