//! Discord webhook settings.
//!
//! Each notification kind posts to its own webhook, stored in the key/value setting table.

use entity::sea_orm_active_enums::NotificationKind;
use regex::Regex;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::settings::DiscordWebhooksDto,
    server::{
        client::discord::{DiscordClient, Embed},
        data::setting::SettingRepository,
        error::{settings::SettingsError, Error},
    },
};

const DISCORD_WEBHOOK_PATTERN: &str = r"^https://discord\.com/api/webhooks/\d+/[\w-]+$";

/// A webhook setting key and the label shown for it in test messages.
#[derive(Debug, Clone, Copy)]
pub struct WebhookSetting {
    pub key: &'static str,
    pub description: &'static str,
}

pub const NEW_APPLICATION_WEBHOOK: WebhookSetting = WebhookSetting {
    key: "discord_webhook_new_application",
    description: "New Application",
};
pub const READY_FOR_REVIEW_WEBHOOK: WebhookSetting = WebhookSetting {
    key: "discord_webhook_application_ready_for_review",
    description: "Application Ready for Review",
};
pub const ACCEPTED_WEBHOOK: WebhookSetting = WebhookSetting {
    key: "discord_webhook_application_accepted",
    description: "Applicant Accepted",
};
pub const REJECTED_WEBHOOK: WebhookSetting = WebhookSetting {
    key: "discord_webhook_application_rejected",
    description: "Applicant Rejected",
};
pub const EXPIRED_WEBHOOK: WebhookSetting = WebhookSetting {
    key: "discord_webhook_application_expired",
    description: "Application Expired",
};
pub const JOINED_WEBHOOK: WebhookSetting = WebhookSetting {
    key: "discord_webhook_applicant_joined",
    description: "Applicant Joined",
};

/// The webhook receiving notifications of `kind`
pub fn webhook_for(kind: NotificationKind) -> WebhookSetting {
    match kind {
        NotificationKind::NewApplication => NEW_APPLICATION_WEBHOOK,
        NotificationKind::ReadyForReview => READY_FOR_REVIEW_WEBHOOK,
        NotificationKind::Accepted => ACCEPTED_WEBHOOK,
        NotificationKind::Rejected => REJECTED_WEBHOOK,
        NotificationKind::Expired => EXPIRED_WEBHOOK,
        NotificationKind::Joined => JOINED_WEBHOOK,
    }
}

fn entries(dto: &DiscordWebhooksDto) -> [(WebhookSetting, Option<&String>); 6] {
    [
        (
            NEW_APPLICATION_WEBHOOK,
            dto.discord_webhook_new_application.as_ref(),
        ),
        (
            READY_FOR_REVIEW_WEBHOOK,
            dto.discord_webhook_application_ready_for_review.as_ref(),
        ),
        (
            ACCEPTED_WEBHOOK,
            dto.discord_webhook_application_accepted.as_ref(),
        ),
        (
            REJECTED_WEBHOOK,
            dto.discord_webhook_application_rejected.as_ref(),
        ),
        (
            EXPIRED_WEBHOOK,
            dto.discord_webhook_application_expired.as_ref(),
        ),
        (JOINED_WEBHOOK, dto.discord_webhook_applicant_joined.as_ref()),
    ]
}

fn set_entry(dto: &mut DiscordWebhooksDto, key: &str, value: String) {
    let field = match key {
        k if k == NEW_APPLICATION_WEBHOOK.key => &mut dto.discord_webhook_new_application,
        k if k == READY_FOR_REVIEW_WEBHOOK.key => {
            &mut dto.discord_webhook_application_ready_for_review
        }
        k if k == ACCEPTED_WEBHOOK.key => &mut dto.discord_webhook_application_accepted,
        k if k == REJECTED_WEBHOOK.key => &mut dto.discord_webhook_application_rejected,
        k if k == EXPIRED_WEBHOOK.key => &mut dto.discord_webhook_application_expired,
        k if k == JOINED_WEBHOOK.key => &mut dto.discord_webhook_applicant_joined,
        _ => return,
    };

    *field = Some(value);
}

/// Checks every non-empty value against the Discord webhook URL format.
fn validate(dto: &DiscordWebhooksDto) -> Result<(), Error> {
    let pattern =
        Regex::new(DISCORD_WEBHOOK_PATTERN).map_err(|e| Error::InternalError(e.to_string()))?;

    for (webhook, value) in entries(dto) {
        if let Some(url) = value.filter(|url| !url.is_empty()) {
            if !pattern.is_match(url) {
                return Err(SettingsError::InvalidWebhook(webhook.key).into());
            }
        }
    }

    Ok(())
}

async fn send_test_message(
    discord_client: &DiscordClient,
    webhook: WebhookSetting,
    url: &str,
) -> Result<(), SettingsError> {
    let embed = Embed::new("Webhook test message").field("Webhook Type", webhook.description);

    discord_client
        .send(url, &embed)
        .await
        .map_err(|e| SettingsError::TestDeliveryFailed {
            description: webhook.description,
            reason: e.to_string(),
        })
}

pub struct SettingService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SettingService<'a> {
    /// Creates a new instance of [`SettingService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Configured webhooks; unset keys are left out.
    pub async fn get_webhooks(&self) -> Result<DiscordWebhooksDto, Error> {
        let keys: Vec<&str> = entries(&DiscordWebhooksDto::default())
            .iter()
            .map(|(webhook, _)| webhook.key)
            .collect();

        let mut dto = DiscordWebhooksDto::default();
        for setting in SettingRepository::new(self.db).get_many(&keys).await? {
            set_entry(&mut dto, &setting.key, setting.value);
        }

        Ok(dto)
    }

    /// The webhook URL configured for `kind`, if any
    pub async fn get_webhook(&self, kind: NotificationKind) -> Result<Option<String>, Error> {
        let value = SettingRepository::new(self.db)
            .get(webhook_for(kind).key)
            .await?;

        Ok(value.filter(|url| !url.is_empty()))
    }

    /// Stores the provided webhooks. An empty value removes the webhook, absent fields are
    /// left untouched.
    ///
    /// # Returns
    /// - `Ok(DiscordWebhooksDto)` - The accepted request
    /// - `Err(SettingsError::NoWebhooksProvided)` - Every field was absent
    /// - `Err(SettingsError::InvalidWebhook)` - A value is not a Discord webhook URL
    pub async fn set_webhooks(&self, dto: DiscordWebhooksDto) -> Result<DiscordWebhooksDto, Error> {
        if entries(&dto).iter().all(|(_, value)| value.is_none()) {
            return Err(SettingsError::NoWebhooksProvided.into());
        }

        validate(&dto)?;

        let txn = self.db.begin().await?;
        let setting_repo = SettingRepository::new(&txn);

        for (webhook, value) in entries(&dto) {
            match value {
                Some(url) if url.is_empty() => {
                    setting_repo.delete(webhook.key).await?;
                }
                Some(url) => setting_repo.set(webhook.key, url.clone()).await?,
                None => {}
            }
        }

        txn.commit().await?;

        Ok(dto)
    }

    /// Sends a test embed to each provided webhook, stopping at the first failure.
    pub async fn test_webhooks(
        &self,
        discord_client: &DiscordClient,
        dto: &DiscordWebhooksDto,
    ) -> Result<(), Error> {
        validate(dto)?;

        for (webhook, value) in entries(dto) {
            if let Some(url) = value.filter(|url| !url.is_empty()) {
                send_test_message(discord_client, webhook, url).await?;
            }
        }

        Ok(())
    }
}
