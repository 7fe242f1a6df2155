use std::time::Duration as StdDuration;

use sea_orm::DatabaseConnection;
use tower_sessions::SessionManagerLayer;
use tower_sessions_redis_store::RedisStore;

use crate::server::{
    client::{
        discord::DiscordClient,
        seat::SeatClient,
        zkill::{ZkillClient, ZKILLBOARD_URL},
    },
    config::Config,
    error::Error,
    model::app::AppState,
};

/// Timeout applied to every SeAT, zKillboard and Discord request
const HTTP_TIMEOUT: StdDuration = StdDuration::from_secs(30);

/// Inactivity after which a session expires
const SESSION_INACTIVITY_MINUTES: i64 = 30;

/// Build and configure the ESI client with the provided credentials
pub fn build_esi_client(config: &Config) -> Result<eve_esi::Client, Error> {
    let esi_client = eve_esi::Client::builder()
        .user_agent(&config.user_agent)
        .client_id(&config.esi_client_id)
        .client_secret(&config.esi_client_secret)
        .callback_url(&config.esi_callback_url)
        .build()?;

    Ok(esi_client)
}

/// Build the HTTP client shared by the SeAT, zKillboard and Discord clients
pub fn build_http_client(config: &Config) -> Result<reqwest::Client, Error> {
    Ok(reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(HTTP_TIMEOUT)
        .build()?)
}

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Connect to Valkey/Redis and configure session management
pub async fn connect_to_session(
    config: &Config,
) -> Result<SessionManagerLayer<RedisStore<tower_sessions_redis_store::fred::prelude::Pool>>, Error>
{
    use time::Duration;
    use tower_sessions::{cookie::SameSite, Expiry};
    use tower_sessions_redis_store::fred::prelude::*;

    let config = Config::from_url(&config.valkey_url)?;
    let pool = Pool::new(config, None, None, None, 6)?;

    pool.connect();
    pool.wait_for_connect().await?;

    let session_store = RedisStore::new(pool);

    // Secure cookies everywhere except debug builds
    let secure_cookies = !cfg!(debug_assertions);

    let session = SessionManagerLayer::new(session_store)
        .with_secure(secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(
            SESSION_INACTIVITY_MINUTES,
        )));

    Ok(session)
}

/// Assemble the state shared by handlers and scheduled jobs
pub fn build_app_state(
    config: &Config,
    db: DatabaseConnection,
    esi_client: eve_esi::Client,
    http_client: reqwest::Client,
) -> AppState {
    AppState {
        db,
        esi_client,
        seat_client: SeatClient::new(
            http_client.clone(),
            config.seat_url.clone(),
            config.seat_api_token.clone(),
        ),
        zkill_client: ZkillClient::new(http_client.clone(), ZKILLBOARD_URL),
        discord_client: DiscordClient::new(http_client),
        frontend_url: config.frontend_url.clone(),
        admin_character_id: config.admin_character_id,
    }
}
