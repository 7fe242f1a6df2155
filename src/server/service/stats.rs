//! Daily zKillboard snapshots of the Autumn corporations and the public stats query.

use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;

use crate::{
    model::stats::{
        CorporationStatsDto, CorporationStatsEntriesDto, StatsDto, StatsEntryDto, StatsRequestDto,
    },
    server::{
        client::zkill::ZkillClient,
        data::stats::CorporationStatsRepository,
        error::Error,
        service::retry::RetryContext,
        util::{eve::AUTUMN_CORPORATION_IDS, time::now},
    },
};

/// Most history entries returned per corporation.
pub const STATS_HISTORY_LIMIT: u64 = 60;

pub struct StatsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> StatsService<'a> {
    /// Creates a new instance of [`StatsService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records today's stats for each Autumn corporation that has no entry for today.
    ///
    /// A corporation whose fetch keeps failing is logged and skipped so the others still get
    /// their entry.
    ///
    /// # Returns
    /// Number of entries created
    pub async fn collect(&self, zkill_client: &ZkillClient) -> Result<usize, Error> {
        self.collect_with(zkill_client, RetryContext::new).await
    }

    async fn collect_with(
        &self,
        zkill_client: &ZkillClient,
        retry_context: impl Fn() -> RetryContext,
    ) -> Result<usize, Error> {
        let stats_repo = CorporationStatsRepository::new(self.db);
        let today = now().date();

        let mut created = 0;
        for corporation_id in AUTUMN_CORPORATION_IDS {
            if stats_repo.exists_for_date(corporation_id, today).await? {
                continue;
            }

            let ctx = retry_context();
            let result = ctx
                .execute_with_retry(
                    &format!("zKillboard stats for corporation {}", corporation_id),
                    |_| {
                        let zkill_client = zkill_client.clone();

                        Box::pin(async move {
                            zkill_client.get_corporation_stats(corporation_id).await
                        })
                    },
                )
                .await;

            match result {
                Ok(stats) => {
                    stats_repo
                        .create(corporation_id, stats.members, stats.ships_destroyed, today)
                        .await?;
                    created += 1;
                }
                Err(e) => tracing::error!(
                    corporation_id = corporation_id,
                    "Failed to collect corporation stats: {}",
                    e
                ),
            }
        }

        Ok(created)
    }

    /// Latest entry per `stats_corporation_ids` and recent history per
    /// `stats_history_corporation_ids`. Corporations without entries are left out of the
    /// latest list and get an empty history.
    pub async fn get_stats(&self, request: StatsRequestDto) -> Result<StatsDto, Error> {
        let stats_repo = CorporationStatsRepository::new(self.db);

        let mut corporation_stats = Vec::new();
        for corporation_id in request.stats_corporation_ids {
            if let Some(latest) = stats_repo.get_latest(corporation_id).await? {
                corporation_stats.push(CorporationStatsDto {
                    corporation_id,
                    members: latest.members,
                    ships_destroyed: latest.ships_destroyed,
                });
            }
        }

        let mut corporation_stats_entries = Vec::new();
        for corporation_id in request.stats_history_corporation_ids {
            let entries = stats_repo
                .get_history(corporation_id, STATS_HISTORY_LIMIT)
                .await?
                .into_iter()
                .map(|entry| StatsEntryDto {
                    members: entry.members,
                    ships_destroyed: entry.ships_destroyed,
                    date: entry.date,
                })
                .collect();

            corporation_stats_entries.push(CorporationStatsEntriesDto {
                corporation_id,
                entries,
            });
        }

        Ok(StatsDto {
            corporation_stats,
            corporation_stats_entries,
        })
    }
}
