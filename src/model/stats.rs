use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct StatsRequestDto {
    #[serde(default)]
    pub stats_corporation_ids: Vec<i64>,
    #[serde(default)]
    pub stats_history_corporation_ids: Vec<i64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct CorporationStatsDto {
    pub corporation_id: i64,
    pub members: i64,
    pub ships_destroyed: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct StatsEntryDto {
    pub members: i64,
    pub ships_destroyed: i64,
    pub date: NaiveDate,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct CorporationStatsEntriesDto {
    pub corporation_id: i64,
    pub entries: Vec<StatsEntryDto>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct StatsDto {
    pub corporation_stats: Vec<CorporationStatsDto>,
    pub corporation_stats_entries: Vec<CorporationStatsEntriesDto>,
}
