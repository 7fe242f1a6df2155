//! Client for the zKillboard statistics API.

use serde::Deserialize;

use crate::server::error::Error;

pub const ZKILLBOARD_URL: &str = "https://zkillboard.com";

#[derive(Debug, Default, Deserialize)]
struct ZkillStatsInfo {
    #[serde(rename = "memberCount", default)]
    member_count: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct ZkillCorporationStats {
    #[serde(default)]
    info: ZkillStatsInfo,
    #[serde(rename = "shipsDestroyed", default)]
    ships_destroyed: Option<i64>,
}

/// Member count and lifetime kills of a corporation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorporationStats {
    pub members: i64,
    pub ships_destroyed: i64,
}

#[derive(Clone)]
pub struct ZkillClient {
    client: reqwest::Client,
    base_url: String,
}

impl ZkillClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Fetches `GET /api/stats/corporationID/{id}/`; missing counters read as 0
    pub async fn get_corporation_stats(&self, corporation_id: i64) -> Result<CorporationStats, Error> {
        let body: ZkillCorporationStats = self
            .client
            .get(format!(
                "{}/api/stats/corporationID/{}/",
                self.base_url, corporation_id
            ))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(CorporationStats {
            members: body.info.member_count.unwrap_or(0),
            ships_destroyed: body.ships_destroyed.unwrap_or(0),
        })
    }
}
