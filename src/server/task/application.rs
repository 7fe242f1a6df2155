//! Expiry and promotion sweep over active applications.

use std::collections::HashMap;

use dioxus_logger::tracing;
use entity::sea_orm_active_enums::ApplicationStatus;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        application::application::ApplicationRepository,
        eve::{character::CharacterRepository, corporation::CorporationRepository},
        user::user::UserRepository,
    },
    error::Error,
    service::{affiliation::AffiliationService, application::ApplicationService, eve::EveService},
    util::{
        eve::is_autumn_corporation,
        time::{is_older_than, now, APPLICATION_EXPIRY},
    },
};

/// Counts produced by one sweep.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ApplicationSweepSummary {
    pub expired: usize,
    pub joined: usize,
    /// Accepted applicants whose main is not yet in an Autumn corporation
    pub not_joined: usize,
}

impl std::fmt::Display for ApplicationSweepSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Marked {} applications as expired & {} as joined. {} have not yet joined.",
            self.expired, self.joined, self.not_joined
        )
    }
}

/// Expires stale applications, then promotes Accepted applicants who have joined.
///
/// Expiries are committed one by one before any affiliation is fetched, so a failed ESI lookup
/// aborts the run with the expiries kept and no promotion applied. While checking affiliations,
/// the cached corporation of each main character is brought up to date as well.
pub async fn update_applications(
    db: &DatabaseConnection,
    esi_client: &eve_esi::Client,
) -> Result<ApplicationSweepSummary, Error> {
    let application_service = ApplicationService::new(db);
    let mut summary = ApplicationSweepSummary::default();

    let now = now();
    let mut accepted = Vec::new();
    for application in ApplicationRepository::new(db).get_all_active().await? {
        if is_older_than(application.last_updated, APPLICATION_EXPIRY, now) {
            if application_service
                .expire(application.id, application.status)
                .await?
            {
                summary.expired += 1;
            }
        } else if application.status == ApplicationStatus::Accepted {
            accepted.push(application);
        }
    }

    if accepted.is_empty() {
        return Ok(summary);
    }

    let user_ids: Vec<i32> = accepted.iter().map(|a| a.user_id).collect();
    let main_characters: HashMap<i32, entity::eve_character::Model> = UserRepository::new(db)
        .get_many_with_main_character(&user_ids)
        .await?
        .into_iter()
        .filter_map(|(user, character)| character.map(|character| (user.id, character)))
        .collect();

    let character_ids: Vec<i64> = main_characters
        .values()
        .map(|character| character.character_id)
        .collect();
    let affiliations: HashMap<i64, i64> = AffiliationService::new(esi_client)
        .get_affiliations(character_ids)
        .await?
        .into_iter()
        .map(|affiliation| (affiliation.character_id, affiliation.corporation_id))
        .collect();

    let corporation_record_ids: Vec<i32> = main_characters
        .values()
        .map(|character| character.corporation_id)
        .collect();
    let cached_corporations: HashMap<i32, i64> = CorporationRepository::new(db)
        .get_many_by_ids(&corporation_record_ids)
        .await?
        .into_iter()
        .map(|corporation| (corporation.id, corporation.corporation_id))
        .collect();

    let eve_service = EveService::new(db, esi_client);
    let character_repo = CharacterRepository::new(db);

    for application in accepted {
        let Some(character) = main_characters.get(&application.user_id) else {
            tracing::warn!(
                application_id = application.id,
                "No main character found for user ID {}",
                application.user_id
            );
            continue;
        };

        let Some(&corporation_id) = affiliations.get(&character.character_id) else {
            tracing::warn!(
                application_id = application.id,
                "Failed to retrieve affiliation for character ID {} of user ID {}",
                character.character_id,
                application.user_id
            );
            continue;
        };

        if is_autumn_corporation(corporation_id) {
            if application_service.mark_joined(application.id).await? {
                summary.joined += 1;
            }
        } else {
            summary.not_joined += 1;
        }

        if cached_corporations.get(&character.corporation_id) != Some(&corporation_id) {
            let corporation = eve_service.get_or_create_corporation(corporation_id).await?;
            character_repo
                .update_corporation(character.id, corporation.id)
                .await?;

            tracing::debug!(
                character_id = character.character_id,
                "Updated cached corporation to {}",
                corporation_id
            );
        }
    }

    Ok(summary)
}
