//! Bulk lookup of character affiliations through ESI.

use dioxus_logger::tracing;
use eve_esi::model::character::CharacterAffiliation;

use crate::server::{
    error::Error,
    service::retry::RetryContext,
    util::eve::{sanitize_character_ids, ESI_AFFILIATION_REQUEST_LIMIT},
};

/// Read-only view of where characters currently are.
///
/// Nothing is cached; every call goes to ESI. Invalid and duplicate IDs are dropped before the
/// request since ESI rejects a whole batch over a single bad ID.
pub struct AffiliationService<'a> {
    esi_client: &'a eve_esi::Client,
}

impl<'a> AffiliationService<'a> {
    /// Creates a new instance of [`AffiliationService`]
    pub fn new(esi_client: &'a eve_esi::Client) -> Self {
        Self { esi_client }
    }

    /// Fetches the current affiliation of each character.
    ///
    /// IDs are requested in chunks of [`ESI_AFFILIATION_REQUEST_LIMIT`], each chunk retried on
    /// transient failures.
    ///
    /// # Returns
    /// - `Ok(Vec<CharacterAffiliation>)` - One entry per character ESI knows about
    /// - `Err(Error::EsiError)` - A chunk failed permanently or exhausted its attempts
    pub async fn get_affiliations(
        &self,
        character_ids: Vec<i64>,
    ) -> Result<Vec<CharacterAffiliation>, Error> {
        let requested = character_ids.len();
        let character_ids = sanitize_character_ids(character_ids);

        if character_ids.len() < requested {
            tracing::warn!(
                "Dropped {} invalid or duplicate character IDs from affiliation lookup",
                requested - character_ids.len()
            );
        }

        let mut affiliations = Vec::with_capacity(character_ids.len());

        for chunk in character_ids.chunks(ESI_AFFILIATION_REQUEST_LIMIT) {
            let ctx = RetryContext::new();
            let chunk = chunk.to_vec();
            let esi_client = self.esi_client.clone();

            let fetched = ctx
                .execute_with_retry(
                    &format!("affiliations for {} characters", chunk.len()),
                    |_| {
                        let esi_client = esi_client.clone();
                        let chunk = chunk.clone();

                        Box::pin(async move {
                            Ok(esi_client
                                .character()
                                .character_affiliation(chunk)
                                .await?)
                        })
                    },
                )
                .await?;

            affiliations.extend(fetched);
        }

        Ok(affiliations)
    }
}

#[cfg(test)]
mod tests {
    use recruit_test_utils::prelude::*;

    use crate::server::{error::Error, service::affiliation::AffiliationService};

    /// Expect affiliations to be returned for valid characters
    #[tokio::test]
    async fn returns_affiliations() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_character_affiliation_endpoint(
                vec![
                    factory::mock_character_affiliation(95_000_001, 98785281),
                    factory::mock_character_affiliation(95_000_002, 98000001),
                ],
                1,
            )
            .build()
            .await?;

        let affiliations = AffiliationService::new(&test.esi_client)
            .get_affiliations(vec![95_000_001, 95_000_002])
            .await?;

        assert_eq!(affiliations.len(), 2);
        assert_eq!(affiliations[0].corporation_id, 98785281);
        test.assert_mocks();

        Ok(())
    }

    /// Expect no request at all when every ID is invalid
    #[tokio::test]
    async fn skips_request_for_invalid_ids() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_character_affiliation_endpoint(Vec::new(), 0)
            .build()
            .await?;

        let affiliations = AffiliationService::new(&test.esi_client)
            .get_affiliations(vec![1, 2, 3])
            .await?;

        assert!(affiliations.is_empty());
        test.assert_mocks();

        Ok(())
    }

    /// Expect a server error to be retried and the lookup to succeed on the next attempt
    #[tokio::test]
    async fn retries_on_server_error() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_mock_endpoint(|server| {
                server
                    .mock("POST", "/characters/affiliation")
                    .with_status(500)
                    .expect(1)
                    .create()
            })
            .with_character_affiliation_endpoint(
                vec![factory::mock_character_affiliation(95_000_001, 98785281)],
                1,
            )
            .build()
            .await?;

        let affiliations = AffiliationService::new(&test.esi_client)
            .get_affiliations(vec![95_000_001])
            .await?;

        assert_eq!(affiliations.len(), 1);
        test.assert_mocks();

        Ok(())
    }

    /// Expect an ESI error once every attempt failed
    #[tokio::test]
    async fn fails_after_max_attempts() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_mock_endpoint(|server| {
                server
                    .mock("POST", "/characters/affiliation")
                    .with_status(503)
                    .expect(3)
                    .create()
            })
            .build()
            .await?;

        let result = AffiliationService::new(&test.esi_client)
            .get_affiliations(vec![95_000_001])
            .await;

        assert!(matches!(result, Err(Error::EsiError(_))));
        test.assert_mocks();

        Ok(())
    }
}
