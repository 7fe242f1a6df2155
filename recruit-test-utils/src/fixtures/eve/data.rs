//! Inserts corporation and character rows, creating the parent corporation when missing.

use chrono::Utc;
use entity::{eve_character, eve_corporation, prelude::*};
use sea_orm::{ActiveValue, ColumnTrait, EntityTrait, QueryFilter};

use crate::{error::TestError, fixtures::eve::EveFixtures};

impl<'a> EveFixtures<'a> {
    /// Inserts a corporation named `Corporation {id}`, or returns the existing row.
    pub async fn insert_mock_corporation(
        &self,
        corporation_id: i64,
    ) -> Result<eve_corporation::Model, TestError> {
        if let Some(existing) = EveCorporation::find()
            .filter(eve_corporation::Column::CorporationId.eq(corporation_id))
            .one(&self.setup.db)
            .await?
        {
            return Ok(existing);
        }

        let now = Utc::now().naive_utc();

        Ok(EveCorporation::insert(eve_corporation::ActiveModel {
            corporation_id: ActiveValue::Set(corporation_id),
            name: ActiveValue::Set(format!("Corporation {}", corporation_id)),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.db)
        .await?)
    }

    /// Inserts a character named `Character {id}` in `corporation_id`, or returns the existing row.
    pub async fn insert_mock_character(
        &self,
        character_id: i64,
        corporation_id: i64,
    ) -> Result<eve_character::Model, TestError> {
        if let Some(existing) = EveCharacter::find()
            .filter(eve_character::Column::CharacterId.eq(character_id))
            .one(&self.setup.db)
            .await?
        {
            return Ok(existing);
        }

        let corporation = self.insert_mock_corporation(corporation_id).await?;
        let now = Utc::now().naive_utc();

        Ok(EveCharacter::insert(eve_character::ActiveModel {
            character_id: ActiveValue::Set(character_id),
            name: ActiveValue::Set(format!("Character {}", character_id)),
            corporation_id: ActiveValue::Set(corporation.id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.db)
        .await?)
    }
}
