use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::NaiveDate;
use recruit::{
    model::stats::{StatsDto, StatsRequestDto},
    server::controller::join::post_stats,
};
use recruit_test_utils::prelude::*;
use sea_orm::{ActiveValue, EntityTrait};

use crate::setup::{app_state, body_json};

const CORPORATION_ID: i64 = 98_785_281;

async fn insert_stats(
    test: &TestContext,
    members: i64,
    ships_destroyed: i64,
    date: NaiveDate,
) -> Result<(), TestError> {
    entity::prelude::CorporationStats::insert(entity::corporation_stats::ActiveModel {
        corporation_id: ActiveValue::Set(CORPORATION_ID),
        members: ActiveValue::Set(members),
        ships_destroyed: ActiveValue::Set(ships_destroyed),
        date: ActiveValue::Set(date),
        ..Default::default()
    })
    .exec(&test.db)
    .await?;

    Ok(())
}

/// Public stats return the newest entry and the history without requiring a login
#[tokio::test]
async fn returns_public_stats() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::CorporationStats)
        .build()
        .await?;
    for (day, members) in [(1, 100), (2, 110)] {
        let date = NaiveDate::from_ymd_opt(2026, 10, day)
            .ok_or_else(|| TestError::Other("invalid date".to_string()))?;
        insert_stats(&test, members, members * 10, date).await?;
    }
    let state = app_state(&test, None);

    let resp = post_stats(
        State(state),
        Json(StatsRequestDto {
            stats_corporation_ids: vec![CORPORATION_ID, 1],
            stats_history_corporation_ids: vec![CORPORATION_ID],
        }),
    )
    .await
    .into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let stats: StatsDto = body_json(resp).await?;
    assert_eq!(stats.corporation_stats.len(), 1);
    assert_eq!(stats.corporation_stats[0].members, 110);
    assert_eq!(stats.corporation_stats_entries.len(), 1);
    assert_eq!(stats.corporation_stats_entries[0].entries.len(), 2);

    Ok(())
}
