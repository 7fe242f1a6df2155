use serde::{Deserialize, Serialize};

/// Discord webhook URLs keyed by the notification they receive.
///
/// When posted, an empty string removes the webhook and an absent field leaves it untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct DiscordWebhooksDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discord_webhook_new_application: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discord_webhook_application_ready_for_review: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discord_webhook_application_accepted: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discord_webhook_application_rejected: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discord_webhook_application_expired: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discord_webhook_applicant_joined: Option<String>,
}
