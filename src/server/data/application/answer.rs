use std::collections::HashSet;

use entity::sea_orm_active_enums::{Interest, Language};
use sea_orm::{ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};

/// Language and interest rows of an application's questionnaire.
///
/// Both are sets: writes compute the difference against what is stored and only insert or
/// delete the rows that changed.
pub struct AnswerRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AnswerRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_languages(
        &self,
        application_ids: &[i32],
    ) -> Result<Vec<entity::application_language::Model>, DbErr> {
        if application_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::ApplicationLanguage::find()
            .filter(
                entity::application_language::Column::ApplicationId
                    .is_in(application_ids.iter().copied()),
            )
            .all(self.db)
            .await
    }

    pub async fn get_interests(
        &self,
        application_ids: &[i32],
    ) -> Result<Vec<entity::application_interest::Model>, DbErr> {
        if application_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::ApplicationInterest::find()
            .filter(
                entity::application_interest::Column::ApplicationId
                    .is_in(application_ids.iter().copied()),
            )
            .all(self.db)
            .await
    }

    /// Makes the stored languages equal `desired`
    ///
    /// # Returns
    /// `true` if any row was inserted or deleted
    pub async fn set_languages(
        &self,
        application_id: i32,
        desired: &HashSet<Language>,
    ) -> Result<bool, DbErr> {
        let existing = self.get_languages(&[application_id]).await?;

        let stale: Vec<i32> = existing
            .iter()
            .filter(|row| !desired.contains(&row.language))
            .map(|row| row.id)
            .collect();
        let stored: HashSet<Language> = existing.iter().map(|row| row.language).collect();
        let missing: Vec<_> = desired
            .iter()
            .filter(|language| !stored.contains(language))
            .map(|language| entity::application_language::ActiveModel {
                application_id: ActiveValue::Set(application_id),
                language: ActiveValue::Set(*language),
                ..Default::default()
            })
            .collect();

        let changed = !stale.is_empty() || !missing.is_empty();

        if !stale.is_empty() {
            entity::prelude::ApplicationLanguage::delete_many()
                .filter(entity::application_language::Column::Id.is_in(stale))
                .exec(self.db)
                .await?;
        }

        if !missing.is_empty() {
            entity::prelude::ApplicationLanguage::insert_many(missing)
                .exec(self.db)
                .await?;
        }

        Ok(changed)
    }

    /// Makes the stored interests equal `desired`
    ///
    /// # Returns
    /// `true` if any row was inserted or deleted
    pub async fn set_interests(
        &self,
        application_id: i32,
        desired: &HashSet<Interest>,
    ) -> Result<bool, DbErr> {
        let existing = self.get_interests(&[application_id]).await?;

        let stale: Vec<i32> = existing
            .iter()
            .filter(|row| !desired.contains(&row.interest))
            .map(|row| row.id)
            .collect();
        let stored: HashSet<Interest> = existing.iter().map(|row| row.interest).collect();
        let missing: Vec<_> = desired
            .iter()
            .filter(|interest| !stored.contains(interest))
            .map(|interest| entity::application_interest::ActiveModel {
                application_id: ActiveValue::Set(application_id),
                interest: ActiveValue::Set(*interest),
                ..Default::default()
            })
            .collect();

        let changed = !stale.is_empty() || !missing.is_empty();

        if !stale.is_empty() {
            entity::prelude::ApplicationInterest::delete_many()
                .filter(entity::application_interest::Column::Id.is_in(stale))
                .exec(self.db)
                .await?;
        }

        if !missing.is_empty() {
            entity::prelude::ApplicationInterest::insert_many(missing)
                .exec(self.db)
                .await?;
        }

        Ok(changed)
    }
}
