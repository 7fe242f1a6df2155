use migration::OnConflict;
use sea_orm::{ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};

/// Key/value settings such as the Discord webhook URLs.
pub struct SettingRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SettingRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, DbErr> {
        let setting = entity::prelude::Setting::find()
            .filter(entity::setting::Column::Key.eq(key))
            .one(self.db)
            .await?;

        Ok(setting.map(|s| s.value))
    }

    pub async fn get_many(&self, keys: &[&str]) -> Result<Vec<entity::setting::Model>, DbErr> {
        entity::prelude::Setting::find()
            .filter(entity::setting::Column::Key.is_in(keys.iter().copied()))
            .all(self.db)
            .await
    }

    /// Inserts the setting or overwrites its value
    pub async fn set(&self, key: &str, value: String) -> Result<(), DbErr> {
        let setting = entity::setting::ActiveModel {
            key: ActiveValue::Set(key.to_string()),
            value: ActiveValue::Set(value),
            ..Default::default()
        };

        entity::prelude::Setting::insert(setting)
            .on_conflict(
                OnConflict::column(entity::setting::Column::Key)
                    .update_column(entity::setting::Column::Value)
                    .to_owned(),
            )
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn delete(&self, key: &str) -> Result<u64, DbErr> {
        let result = entity::prelude::Setting::delete_many()
            .filter(entity::setting::Column::Key.eq(key))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use recruit_test_utils::prelude::*;

    use crate::server::data::setting::SettingRepository;

    /// Expect a second write to the same key to overwrite the value
    #[tokio::test]
    async fn set_overwrites_value() -> Result<(), TestError> {
        let test = TestBuilder::new().with_setting_tables().build().await?;
        let repo = SettingRepository::new(&test.db);

        repo.set("discord_webhook_new_application", "first".to_string())
            .await?;
        repo.set("discord_webhook_new_application", "second".to_string())
            .await?;

        let value = repo.get("discord_webhook_new_application").await?;
        assert_eq!(value.as_deref(), Some("second"));
        assert_eq!(
            repo.get_many(&["discord_webhook_new_application"]).await?.len(),
            1
        );

        Ok(())
    }

    /// Expect a deleted key to read back as absent
    #[tokio::test]
    async fn delete_removes_key() -> Result<(), TestError> {
        let test = TestBuilder::new().with_setting_tables().build().await?;
        let repo = SettingRepository::new(&test.db);
        repo.set("discord_webhook_applicant_joined", "url".to_string())
            .await?;

        let deleted = repo.delete("discord_webhook_applicant_joined").await?;

        assert_eq!(deleted, 1);
        assert!(repo.get("discord_webhook_applicant_joined").await?.is_none());

        Ok(())
    }
}
