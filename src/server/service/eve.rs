use sea_orm::DatabaseConnection;

use crate::server::{
    data::eve::{character::CharacterRepository, corporation::CorporationRepository},
    error::Error,
    service::affiliation::AffiliationService,
};

/// Creates character and corporation records on demand from ESI.
pub struct EveService<'a> {
    db: &'a DatabaseConnection,
    esi_client: &'a eve_esi::Client,
}

impl<'a> EveService<'a> {
    /// Creates a new instance of [`EveService`]
    pub fn new(db: &'a DatabaseConnection, esi_client: &'a eve_esi::Client) -> Self {
        Self { db, esi_client }
    }

    /// Get corporation from database or create an entry for it from ESI
    pub async fn get_or_create_corporation(
        &self,
        corporation_id: i64,
    ) -> Result<entity::eve_corporation::Model, Error> {
        let corporation_repo = CorporationRepository::new(self.db);

        if let Some(corporation) = corporation_repo
            .get_by_corporation_id(corporation_id)
            .await?
        {
            return Ok(corporation);
        }

        let corporation = self
            .esi_client
            .corporation()
            .get_corporation_information(corporation_id)
            .await?;

        Ok(corporation_repo
            .create(corporation_id, corporation.name)
            .await?)
    }

    /// Get character from database or create an entry for it from ESI.
    ///
    /// The corporation comes from an affiliation lookup. `name` is usually known from the SSO
    /// claims; when it isn't, the character's public information is fetched for it.
    pub async fn get_or_create_character(
        &self,
        character_id: i64,
        name: Option<String>,
    ) -> Result<entity::eve_character::Model, Error> {
        let character_repo = CharacterRepository::new(self.db);

        if let Some(character) = character_repo.get_by_character_id(character_id).await? {
            return Ok(character);
        }

        let affiliation = AffiliationService::new(self.esi_client)
            .get_affiliations(vec![character_id])
            .await?
            .into_iter()
            .find(|affiliation| affiliation.character_id == character_id)
            .ok_or_else(|| {
                Error::InternalError(format!(
                    "ESI returned no affiliation for character ID {}",
                    character_id
                ))
            })?;

        let corporation = self
            .get_or_create_corporation(affiliation.corporation_id)
            .await?;

        let name = match name {
            Some(name) => name,
            None => {
                self.esi_client
                    .character()
                    .get_character_public_information(character_id)
                    .await?
                    .name
            }
        };

        Ok(character_repo
            .create(character_id, name, corporation.id)
            .await?)
    }
}
