use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use entity::sea_orm_active_enums::{
    ApplicationLocation, ApplicationReferrer, ApplicationRegion, ApplicationStatus, Interest,
    Language, NotificationKind,
};
use recruit::{
    model::application::{ApplicationDto, PutApplicationLocationDto, PutApplicationQuestionsDto},
    server::controller::application::{
        get_application, get_seat_status, put_discord_complete, put_location, put_questions,
    },
};
use recruit_test_utils::prelude::*;
use sea_orm::{EntityTrait, QueryOrder};

use crate::setup::{app_state, body_json, login};

const CHARACTER_ID: i64 = 95_000_001;
const OUTSIDE_CORPORATION_ID: i64 = 98_000_001;
const AUTUMN_CORPORATION_ID: i64 = 98_785_281;

fn questions() -> PutApplicationQuestionsDto {
    PutApplicationQuestionsDto {
        referrer: Some(ApplicationReferrer::Friend),
        region: Some(ApplicationRegion::Europe),
        end_goals: "Fly capitals".to_string(),
        why_autumn: "Good fleets".to_string(),
        interests: vec![Interest::PvP, Interest::PvP, Interest::Mining],
        languages: vec![Language::English],
    }
}

/// Walks an applicant through every step, queuing NewApplication then ReadyForReview
#[tokio::test]
async fn applicant_completes_every_step() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_application_tables()
        .with_seat_tables()
        .with_setting_tables()
        .with_user_for_character(CHARACTER_ID, OUTSIDE_CORPORATION_ID)
        .build()
        .await?;
    let sheet_endpoint = test
        .seat()
        .create_character_sheet_endpoint(CHARACTER_ID, Some(7), 1);
    let state = app_state(&test, None);
    login(&test.session, 1).await?;

    let resp = put_location(
        State(state.clone()),
        test.session.clone(),
        Json(PutApplicationLocationDto {
            location: ApplicationLocation::Highsec,
        }),
    )
    .await
    .into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let application: ApplicationDto = body_json(resp).await?;
    assert_eq!(application.status, ApplicationStatus::Pending);
    assert_eq!(application.location, ApplicationLocation::Highsec);
    assert!(!application.seat_completed);

    let resp = get_seat_status(State(state.clone()), test.session.clone())
        .await
        .into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let application: ApplicationDto = body_json(resp).await?;
    assert!(application.seat_completed);

    let resp = put_discord_complete(State(state.clone()), test.session.clone())
        .await
        .into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = put_questions(State(state.clone()), test.session.clone(), Json(questions()))
        .await
        .into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = get_application(State(state), test.session.clone())
        .await
        .into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let application: ApplicationDto = body_json(resp).await?;
    assert!(application.seat_completed);
    assert!(application.discord_completed);
    assert_eq!(application.questions.interests.len(), 2);
    assert_eq!(application.questions.end_goals, "Fly capitals");

    let kinds: Vec<NotificationKind> = entity::prelude::Notification::find()
        .order_by_asc(entity::notification::Column::Id)
        .all(&test.db)
        .await?
        .into_iter()
        .map(|notification| notification.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![NotificationKind::NewApplication, NotificationKind::ReadyForReview]
    );

    sheet_endpoint.assert();

    Ok(())
}

/// Saving the same complete questionnaire twice queues ReadyForReview once
#[tokio::test]
async fn ready_for_review_is_queued_once() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_application_tables()
        .with_seat_tables()
        .with_setting_tables()
        .with_user_for_character(CHARACTER_ID, OUTSIDE_CORPORATION_ID)
        .build()
        .await?;
    test.application()
        .insert_application(1, ApplicationStatus::Pending)
        .await?;
    let state = app_state(&test, None);
    login(&test.session, 1).await?;

    for _ in 0..2 {
        let resp = put_questions(State(state.clone()), test.session.clone(), Json(questions()))
            .await
            .into_response();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let ready = entity::prelude::Notification::find()
        .all(&test.db)
        .await?
        .into_iter()
        .filter(|notification| notification.kind == NotificationKind::ReadyForReview)
        .count();
    assert_eq!(ready, 1);

    Ok(())
}

/// Returns 401 when no user is logged in
#[tokio::test]
async fn requires_login() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_application_tables()
        .with_seat_tables()
        .build()
        .await?;
    let state = app_state(&test, None);

    let resp = get_application(State(state), test.session.clone())
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Returns 404 when the user never applied
#[tokio::test]
async fn no_application_is_not_found() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_application_tables()
        .with_seat_tables()
        .with_user_for_character(CHARACTER_ID, OUTSIDE_CORPORATION_ID)
        .build()
        .await?;
    let state = app_state(&test, None);
    login(&test.session, 1).await?;

    let resp = get_application(State(state), test.session.clone())
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Members of an Autumn corporation cannot apply
#[tokio::test]
async fn members_cannot_apply() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_application_tables()
        .with_seat_tables()
        .with_user_for_character(CHARACTER_ID, AUTUMN_CORPORATION_ID)
        .build()
        .await?;
    let state = app_state(&test, None);
    login(&test.session, 1).await?;

    let resp = put_location(
        State(state),
        test.session.clone(),
        Json(PutApplicationLocationDto {
            location: ApplicationLocation::Nullsec,
        }),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// An accepted application blocks starting a new one
#[tokio::test]
async fn accepted_application_conflicts() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_application_tables()
        .with_seat_tables()
        .with_user_for_character(CHARACTER_ID, OUTSIDE_CORPORATION_ID)
        .build()
        .await?;
    test.application()
        .insert_application(1, ApplicationStatus::Accepted)
        .await?;
    let state = app_state(&test, None);
    login(&test.session, 1).await?;

    let resp = put_location(
        State(state),
        test.session.clone(),
        Json(PutApplicationLocationDto {
            location: ApplicationLocation::Highsec,
        }),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::CONFLICT);

    Ok(())
}
