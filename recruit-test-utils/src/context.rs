//! The environment a test runs against once [`TestBuilder`](crate::TestBuilder) has finished.

use std::sync::Arc;

use mockito::{Mock, Server, ServerGuard};
use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};
use tower_sessions::{MemoryStore, Session};

use crate::{
    constant::{TEST_CALLBACK_URL, TEST_ESI_CLIENT_ID, TEST_ESI_CLIENT_SECRET, TEST_USER_AGENT},
    error::TestError,
};

/// Test environment holding an in-memory SQLite database, an ESI client pointed at a mockito
/// server and an in-memory session.
///
/// The same mockito server also stands in for SeAT, zKillboard and Discord. Clients for those
/// services are built by the calling crate from [`TestContext::server_url`].
///
/// ```ignore
/// let mut test = TestBuilder::new().with_user_tables().build().await?;
///
/// let (user, character) = test.user().insert_user_with_mock_character(1, 98785281).await?;
///
/// test.assert_mocks();
/// ```
pub struct TestContext {
    /// Connection to the in-memory SQLite database
    pub db: DatabaseConnection,
    /// ESI client configured to use the mock server
    pub esi_client: eve_esi::Client,
    /// Session backed by a memory store
    pub session: Session,

    pub(crate) server: ServerGuard,
    pub(crate) mocks: Vec<Mock>,
}

impl TestContext {
    /// Creates a bare context with no tables and no mocks.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Initialized context
    /// - `Err(TestError::EsiError)` - ESI client or config builder failed
    /// - `Err(TestError::DbErr)` - Database connection failed
    pub async fn new() -> Result<Self, TestError> {
        let mock_server = Server::new_async().await;
        let mock_server_url = mock_server.url();

        let esi_config = eve_esi::Config::builder()
            .esi_url(&mock_server_url)
            .token_url(&format!("{}/v2/oauth/token", mock_server_url))
            .jwk_url(&format!("{}/oauth/jwks", mock_server_url))
            .build()?;

        let esi_client = eve_esi::Client::builder()
            .config(esi_config)
            .user_agent(TEST_USER_AGENT)
            .client_id(TEST_ESI_CLIENT_ID)
            .client_secret(TEST_ESI_CLIENT_SECRET)
            .callback_url(TEST_CALLBACK_URL)
            .build()?;

        let store = Arc::new(MemoryStore::default());
        let session = Session::new(None, store, None);

        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestContext {
            server: mock_server,
            db,
            esi_client,
            session,
            mocks: Vec::new(),
        })
    }

    /// Executes CREATE TABLE statements against the test database.
    pub async fn with_tables(&self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Base URL of the mock server, used for SeAT, zKillboard and Discord clients in tests.
    pub fn server_url(&self) -> String {
        self.server.url()
    }

    /// Mutable access to the mock server for endpoints registered after `build()`.
    ///
    /// Mocks created this way are not tracked by [`TestContext::assert_mocks`]; keep the
    /// returned `Mock` and assert it directly.
    pub fn server(&mut self) -> &mut ServerGuard {
        &mut self.server
    }

    /// Asserts every mock registered through the builder was hit the expected number of times.
    ///
    /// # Panics
    /// Panics if any mock endpoint was not called the expected number of times
    pub fn assert_mocks(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }
}
