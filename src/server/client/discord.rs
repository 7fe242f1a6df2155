//! Discord webhook delivery.

use serde::Serialize;
use serde_json::json;

use crate::server::error::Error;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmbedAuthor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmbedFooter {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

/// A Discord message embed, serialized in the shape the webhook API expects.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
    /// RFC 3339 timestamp shown next to the footer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl Embed {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn author(mut self, name: impl Into<String>, icon_url: String, url: String) -> Self {
        self.author = Some(EmbedAuthor {
            name: name.into(),
            icon_url: Some(icon_url),
            url: Some(url),
        });
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline: false,
        });
        self
    }

    pub fn footer(mut self, text: impl Into<String>, icon_url: Option<String>) -> Self {
        self.footer = Some(EmbedFooter {
            text: text.into(),
            icon_url,
        });
        self
    }

    /// Stamps the embed with the current time
    pub fn timestamp_now(mut self) -> Self {
        self.timestamp = Some(chrono::Utc::now().to_rfc3339());
        self
    }
}

#[derive(Clone)]
pub struct DiscordClient {
    client: reqwest::Client,
}

impl DiscordClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Posts a single embed to `webhook_url`. No retries are attempted.
    pub async fn send(&self, webhook_url: &str, embed: &Embed) -> Result<(), Error> {
        self.client
            .post(webhook_url)
            .json(&json!({ "embeds": [embed] }))
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use recruit_test_utils::prelude::*;
    use serde_json::json;

    use crate::server::client::discord::{DiscordClient, Embed};

    /// Expect the embed to be wrapped in an `embeds` array
    #[tokio::test]
    async fn posts_embed() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_mock_endpoint(|server| {
                server
                    .mock("POST", "/api/webhooks/1/token")
                    .match_body(Matcher::PartialJson(json!({
                        "embeds": [{ "title": "New Application", "description": "hello" }]
                    })))
                    .with_status(204)
                    .create()
            })
            .build()
            .await?;

        let client = DiscordClient::new(reqwest::Client::new());
        let embed = Embed::new("New Application").description("hello");
        client
            .send(&format!("{}/api/webhooks/1/token", test.server_url()), &embed)
            .await?;

        test.assert_mocks();

        Ok(())
    }

    /// Expect an error status from Discord to be reported
    #[tokio::test]
    async fn reports_failed_delivery() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_mock_endpoint(|server| {
                server
                    .mock("POST", "/api/webhooks/1/token")
                    .with_status(404)
                    .create()
            })
            .build()
            .await?;

        let client = DiscordClient::new(reqwest::Client::new());
        let result = client
            .send(
                &format!("{}/api/webhooks/1/token", test.server_url()),
                &Embed::new("Webhook test message"),
            )
            .await;

        assert!(result.is_err());

        Ok(())
    }

    #[test]
    fn omits_empty_parts() {
        let value = serde_json::to_value(Embed::new("Title")).expect("serializable");

        assert_eq!(value, json!({ "title": "Title" }));
    }
}
