use dioxus_logger::tracing;

use crate::server::{model::app::AppState, task};

/// Runs a notification delivery pass in the background without holding up the response.
pub fn spawn_delivery(state: &AppState) {
    let state = state.clone();

    tokio::spawn(async move {
        match task::deliver_notifications(&state.db, &state.discord_client, &state.frontend_url)
            .await
        {
            Ok(summary) => tracing::debug!("Delivered notifications: {}", summary),
            Err(e) => tracing::warn!("Notification delivery failed: {:?}", e),
        }
    });
}
