//! Declarative test setup.
//!
//! Every `with_*` call only queues work; tables, fixtures and mock endpoints are created in
//! that order when [`TestBuilder::build`] runs.

use eve_esi::model::{
    character::{Character, CharacterAffiliation},
    corporation::Corporation,
};
use mockito::Mock;
use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, EntityTrait, Schema};

use crate::{error::TestError, TestContext};

/// Same partial unique index the application migration creates.
const UQ_APPLICATION_USER_ACTIVE: &str = "CREATE UNIQUE INDEX uq_application_user_active \
     ON application (user_id) WHERE status IN ('Pending', 'Accepted')";

type MockBuilder = Box<dyn FnOnce(&mut mockito::ServerGuard) -> Mock>;

/// Builder for a [`TestContext`].
///
/// ```ignore
/// let test = TestBuilder::new()
///     .with_application_tables()
///     .with_user_for_character(1, 98000001)
///     .with_character_affiliation_endpoint(vec![factory::mock_character_affiliation(1, 98785281)], 1)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    include_user_tables: bool,
    include_application_tables: bool,
    include_seat_tables: bool,
    include_setting_tables: bool,

    corporations: Vec<i64>,
    characters: Vec<(i64, i64)>,
    users_for_characters: Vec<(i64, i64)>,

    mock_builders: Vec<MockBuilder>,
    corporation_endpoints: Vec<(i64, Corporation, usize)>,
    character_endpoints: Vec<(i64, Character, usize)>,
    character_affiliation_endpoints: Vec<(Vec<CharacterAffiliation>, usize)>,
    jwt_configs: Vec<(i64, String)>,
}

impl TestBuilder {
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_user_tables: false,
            include_application_tables: false,
            include_seat_tables: false,
            include_setting_tables: false,
            corporations: Vec::new(),
            characters: Vec::new(),
            users_for_characters: Vec::new(),
            mock_builders: Vec::new(),
            corporation_endpoints: Vec::new(),
            character_endpoints: Vec::new(),
            character_affiliation_endpoints: Vec::new(),
            jwt_configs: Vec::new(),
        }
    }

    /// EveCorporation, EveCharacter, RecruitUser and RecruitUserCharacter.
    pub fn with_user_tables(mut self) -> Self {
        self.include_user_tables = true;
        self
    }

    /// The user tables plus Application, its language and interest rows, and the Notification
    /// outbox.
    pub fn with_application_tables(mut self) -> Self {
        self.include_user_tables = true;
        self.include_application_tables = true;
        self
    }

    /// The user tables plus SeatRole, SeatRoleUser and SeatRolePermission.
    pub fn with_seat_tables(mut self) -> Self {
        self.include_user_tables = true;
        self.include_seat_tables = true;
        self
    }

    /// The Setting key/value table.
    pub fn with_setting_tables(mut self) -> Self {
        self.include_setting_tables = true;
        self
    }

    /// Adds a single entity table. Chain calls to add several.
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    pub fn with_mock_corporation(mut self, corporation_id: i64) -> Self {
        self.corporations.push(corporation_id);
        self
    }

    /// Inserts a character, creating its corporation when missing.
    pub fn with_mock_character(mut self, character_id: i64, corporation_id: i64) -> Self {
        self.characters.push((character_id, corporation_id));
        self
    }

    /// Inserts a character plus a user owning it as main. Users get IDs in call order.
    pub fn with_user_for_character(mut self, character_id: i64, corporation_id: i64) -> Self {
        self.users_for_characters.push((character_id, corporation_id));
        self
    }

    pub fn with_corporation_endpoint(
        mut self,
        corporation_id: i64,
        corporation: Corporation,
        expected_requests: usize,
    ) -> Self {
        self.corporation_endpoints
            .push((corporation_id, corporation, expected_requests));
        self
    }

    pub fn with_character_endpoint(
        mut self,
        character_id: i64,
        character: Character,
        expected_requests: usize,
    ) -> Self {
        self.character_endpoints
            .push((character_id, character, expected_requests));
        self
    }

    pub fn with_character_affiliation_endpoint(
        mut self,
        affiliations: Vec<CharacterAffiliation>,
        expected_requests: usize,
    ) -> Self {
        self.character_affiliation_endpoints
            .push((affiliations, expected_requests));
        self
    }

    /// Adds the JWKS and token endpoints needed to complete an SSO callback.
    pub fn with_jwt_endpoints(mut self, character_id: i64, owner_hash: impl Into<String>) -> Self {
        self.jwt_configs.push((character_id, owner_hash.into()));
        self
    }

    /// Adds an arbitrary mock endpoint, for SeAT, zKillboard, Discord or failing ESI responses.
    pub fn with_mock_endpoint<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut mockito::ServerGuard) -> Mock + 'static,
    {
        self.mock_builders.push(Box::new(setup));
        self
    }

    /// Creates tables, inserts fixtures and registers mock endpoints.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Configured test environment
    /// - `Err(TestError::DbErr)` - Table creation or fixture insertion failed
    /// - `Err(TestError::EsiError)` - ESI client initialization failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new().await?;
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);

        let mut all_tables = Vec::new();

        if self.include_user_tables {
            all_tables.extend([
                schema.create_table_from_entity(entity::prelude::EveCorporation),
                schema.create_table_from_entity(entity::prelude::EveCharacter),
                schema.create_table_from_entity(entity::prelude::RecruitUser),
                schema.create_table_from_entity(entity::prelude::RecruitUserCharacter),
            ]);
        }

        if self.include_application_tables {
            all_tables.extend([
                schema.create_table_from_entity(entity::prelude::Application),
                schema.create_table_from_entity(entity::prelude::ApplicationLanguage),
                schema.create_table_from_entity(entity::prelude::ApplicationInterest),
                schema.create_table_from_entity(entity::prelude::Notification),
            ]);
        }

        if self.include_seat_tables {
            all_tables.extend([
                schema.create_table_from_entity(entity::prelude::SeatRole),
                schema.create_table_from_entity(entity::prelude::SeatRoleUser),
                schema.create_table_from_entity(entity::prelude::SeatRolePermission),
            ]);
        }

        if self.include_setting_tables {
            all_tables.push(schema.create_table_from_entity(entity::prelude::Setting));
        }

        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        if self.include_application_tables {
            setup.db.execute_unprepared(UQ_APPLICATION_USER_ACTIVE).await?;
        }

        for corporation_id in self.corporations {
            setup.eve().insert_mock_corporation(corporation_id).await?;
        }

        for (character_id, corporation_id) in self.characters {
            setup
                .eve()
                .insert_mock_character(character_id, corporation_id)
                .await?;
        }

        for (character_id, corporation_id) in self.users_for_characters {
            setup
                .user()
                .insert_user_with_mock_character(character_id, corporation_id)
                .await?;
        }

        // Custom endpoints first so a test can queue a failing response ahead of a helper's
        // successful one for the same path.
        let mut mocks = Vec::new();

        for builder in self.mock_builders {
            mocks.push(builder(&mut setup.server));
        }

        for (corporation_id, corporation, expected) in self.corporation_endpoints {
            mocks.push(setup.eve().create_corporation_endpoint(
                corporation_id,
                corporation,
                expected,
            ));
        }

        for (character_id, character, expected) in self.character_endpoints {
            mocks.push(
                setup
                    .eve()
                    .create_character_endpoint(character_id, character, expected),
            );
        }

        for (affiliations, expected) in self.character_affiliation_endpoints {
            mocks.push(
                setup
                    .eve()
                    .create_character_affiliation_endpoint(affiliations, expected),
            );
        }

        for (character_id, owner_hash) in self.jwt_configs {
            mocks.extend(setup.auth().create_jwt_endpoints(character_id, &owner_hash));
        }

        setup.mocks = mocks;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
