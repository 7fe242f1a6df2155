use sea_orm::DatabaseConnection;

use crate::server::client::{discord::DiscordClient, seat::SeatClient, zkill::ZkillClient};

/// State shared by every handler and scheduled job.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub esi_client: eve_esi::Client,
    pub seat_client: SeatClient,
    pub zkill_client: ZkillClient,
    pub discord_client: DiscordClient,
    /// Origin of the web frontend, without a trailing slash
    pub frontend_url: String,
    /// Character that always resolves to the Admin permission
    pub admin_character_id: Option<i64>,
}
