use chrono::Utc;
use entity::{eve_character, prelude::*, recruit_user, recruit_user_character};
use sea_orm::{ActiveModelTrait, ActiveValue, EntityTrait, IntoActiveModel};

use crate::{error::TestError, fixtures::user::UserFixtures};

impl<'a> UserFixtures<'a> {
    /// Inserts a user whose main character is the character record `main_character_id`.
    pub async fn insert_user(
        &self,
        main_character_id: i32,
        seat_user_id: Option<i64>,
    ) -> Result<recruit_user::Model, TestError> {
        Ok(RecruitUser::insert(recruit_user::ActiveModel {
            seat_user_id: ActiveValue::Set(seat_user_id),
            main_character_id: ActiveValue::Set(main_character_id),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.db)
        .await?)
    }

    /// Links the character record `character_id` to `user_id`.
    pub async fn insert_user_character_ownership(
        &self,
        user_id: i32,
        character_id: i32,
        owner_hash: &str,
    ) -> Result<recruit_user_character::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            RecruitUserCharacter::insert(recruit_user_character::ActiveModel {
                user_id: ActiveValue::Set(user_id),
                character_id: ActiveValue::Set(character_id),
                owner_hash: ActiveValue::Set(owner_hash.to_string()),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Inserts a character, a user with that character as main and the ownership row linking
    /// them. The owner hash is `owner_hash_{character_id}`.
    pub async fn insert_user_with_mock_character(
        &mut self,
        character_id: i64,
        corporation_id: i64,
    ) -> Result<(recruit_user::Model, eve_character::Model), TestError> {
        let character = self
            .setup
            .eve()
            .insert_mock_character(character_id, corporation_id)
            .await?;

        let user = self.insert_user(character.id, None).await?;
        self.insert_user_character_ownership(
            user.id,
            character.id,
            &format!("owner_hash_{}", character_id),
        )
        .await?;

        Ok((user, character))
    }

    /// Sets the SeAT user a local user is linked to.
    pub async fn link_seat_user(
        &self,
        user_id: i32,
        seat_user_id: i64,
    ) -> Result<recruit_user::Model, TestError> {
        let user = RecruitUser::find_by_id(user_id)
            .one(&self.setup.db)
            .await?
            .ok_or_else(|| TestError::Other(format!("user {} not found", user_id)))?;

        let mut active = user.into_active_model();
        active.seat_user_id = ActiveValue::Set(Some(seat_user_id));

        Ok(active.update(&self.setup.db).await?)
    }
}
