//! Delivery of the notification outbox to Discord.
//!
//! Rows are written by the application state machine in the same transaction as the change
//! they describe. Delivery claims each row before sending and makes a single attempt, so a
//! failed send is logged and dropped rather than retried.

use dioxus_logger::tracing;
use entity::sea_orm_active_enums::{ApplicationLocation, NotificationKind};
use sea_orm::DatabaseConnection;

use crate::{
    model::{application::ApplicationDto, user::UserDto},
    server::{
        client::discord::{DiscordClient, Embed},
        data::notification::NotificationRepository,
        error::Error,
        service::{application::ApplicationService, setting::SettingService, user::UserService},
        util::eve::{
            character_portrait_url, character_zkillboard_url, corporation_logo_url,
            AUTUMN_HIGHSEC_CORPORATION_ID, AUTUMN_HIGHSEC_CORPORATION_NAME,
            AUTUMN_NULLSEC_CORPORATION_ID, AUTUMN_NULLSEC_CORPORATION_NAME,
        },
    },
};

/// Outcome of a delivery pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeliverySummary {
    pub sent: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl std::fmt::Display for DeliverySummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} sent, {} skipped, {} failed",
            self.sent, self.skipped, self.failed
        )
    }
}

/// Name and ID of the corporation an application targets
fn target_corporation(location: ApplicationLocation) -> (&'static str, i64) {
    match location {
        ApplicationLocation::Highsec => {
            (AUTUMN_HIGHSEC_CORPORATION_NAME, AUTUMN_HIGHSEC_CORPORATION_ID)
        }
        ApplicationLocation::Nullsec => {
            (AUTUMN_NULLSEC_CORPORATION_NAME, AUTUMN_NULLSEC_CORPORATION_ID)
        }
    }
}

/// Builds the Discord embed announcing `kind` for `application`.
///
/// `reviewer` is the user who made the decision recorded with the notification, which may
/// differ from the application's current reviewer once a later decision replaced it.
pub fn build_embed(
    kind: NotificationKind,
    application: &ApplicationDto,
    reviewer: Option<&UserDto>,
    frontend_url: &str,
) -> Embed {
    let applicant = &application.user;
    let (corporation_name, corporation_id) = target_corporation(application.location);
    let corporation_footer = |embed: Embed| {
        embed.footer(
            corporation_name,
            Some(corporation_logo_url(corporation_id)),
        )
    };
    let reviewer_footer = |embed: Embed, prefix: &str| match reviewer {
        Some(reviewer) => embed.footer(
            format!("{}{}", prefix, reviewer.character_name),
            Some(character_portrait_url(reviewer.character_id)),
        ),
        None => embed,
    };

    let embed = Embed::new(title(kind))
        .url(format!(
            "{}/admin/applications/{}",
            frontend_url.trim_end_matches('/'),
            application.id
        ))
        .author(
            applicant.character_name.clone(),
            character_portrait_url(applicant.character_id),
            character_zkillboard_url(applicant.character_id),
        );

    let embed = match kind {
        NotificationKind::NewApplication => corporation_footer(
            embed
                .description(format!(
                    "New application from {} to {}.",
                    applicant.character_name, corporation_name
                ))
                .field("Current Corporation", applicant.corporation_name.clone()),
        ),
        NotificationKind::ReadyForReview => corporation_footer(embed.description(format!(
            "{} has completed all application steps to join {} and is ready for review!",
            applicant.character_name, corporation_name
        ))),
        NotificationKind::Accepted => reviewer_footer(
            embed.description(format!(
                "{}'s application to {} has been accepted!",
                applicant.character_name, corporation_name
            )),
            "Reviewer: ",
        ),
        NotificationKind::Rejected => reviewer_footer(
            embed
                .description(format!(
                    "{}'s application to {} has been rejected.",
                    applicant.character_name, corporation_name
                ))
                .field("Rejection Reason", application.rejection_reason.clone()),
            "",
        ),
        NotificationKind::Expired => corporation_footer(embed.description(format!(
            "{}'s application to {} has expired after 30 days of inactivity.",
            applicant.character_name, corporation_name
        ))),
        NotificationKind::Joined => corporation_footer(embed.description(format!(
            "{} has joined {}!",
            applicant.character_name, corporation_name
        ))),
    };

    embed.timestamp_now()
}

fn title(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::NewApplication => "New Application",
        NotificationKind::ReadyForReview => "Application Ready for Review",
        NotificationKind::Accepted => "Application Accepted",
        NotificationKind::Rejected => "Application Rejected",
        NotificationKind::Expired => "Application Expired",
        NotificationKind::Joined => "Applicant Joined",
    }
}

pub struct NotificationService<'a> {
    db: &'a DatabaseConnection,
    discord_client: &'a DiscordClient,
    frontend_url: &'a str,
}

impl<'a> NotificationService<'a> {
    /// Creates a new instance of [`NotificationService`]
    pub fn new(
        db: &'a DatabaseConnection,
        discord_client: &'a DiscordClient,
        frontend_url: &'a str,
    ) -> Self {
        Self {
            db,
            discord_client,
            frontend_url,
        }
    }

    /// Delivers every unprocessed notification once.
    ///
    /// Rows claimed by a concurrent pass are skipped, as are kinds without a configured
    /// webhook. Send failures are logged and never returned.
    pub async fn deliver_pending(&self) -> Result<DeliverySummary, Error> {
        let notification_repo = NotificationRepository::new(self.db);
        let setting_service = SettingService::new(self.db);
        let application_service = ApplicationService::new(self.db);
        let user_service = UserService::new(self.db);

        let mut summary = DeliverySummary::default();

        for notification in notification_repo.get_unprocessed().await? {
            if !notification_repo.claim(notification.id).await? {
                continue;
            }

            let Some(webhook) = setting_service.get_webhook(notification.kind).await? else {
                summary.skipped += 1;
                continue;
            };

            let application = match application_service.get(notification.application_id).await {
                Ok(application) => application,
                Err(e) => {
                    tracing::warn!(
                        notification_id = notification.id,
                        "Failed to load application ID {} for notification: {}",
                        notification.application_id,
                        e
                    );
                    summary.failed += 1;
                    continue;
                }
            };
            let reviewer = match notification.reviewer_user_id {
                Some(reviewer_user_id) => match user_service.get_user(reviewer_user_id).await {
                    Ok(reviewer) => reviewer,
                    Err(e) => {
                        tracing::warn!(
                            notification_id = notification.id,
                            "Failed to load reviewer user ID {} for notification: {}",
                            reviewer_user_id,
                            e
                        );
                        summary.failed += 1;
                        continue;
                    }
                },
                None => None,
            };
            let embed = build_embed(
                notification.kind,
                &application,
                reviewer.as_ref(),
                self.frontend_url,
            );

            match self.discord_client.send(&webhook, &embed).await {
                Ok(()) => summary.sent += 1,
                Err(e) => {
                    tracing::warn!(
                        notification_id = notification.id,
                        application_id = notification.application_id,
                        "Failed to deliver {:?} notification: {}",
                        notification.kind,
                        e
                    );
                    summary.failed += 1;
                }
            }
        }

        Ok(summary)
    }
}
