use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use entity::sea_orm_active_enums::{
    ApplicationLocation, ApplicationStatus, NotificationKind, Permission,
};
use recruit::{
    model::{
        application::{
            ApplicationDto, GetApplicationsDto, PutApplicationLocationDto, PutApplicationStatusDto,
        },
        settings::DiscordWebhooksDto,
    },
    server::controller::{
        admin::{
            application::{
                get_application, get_applications, put_application_status, ApplicationListParams,
            },
            role::post_role_permissions,
            settings::{get_webhooks, post_webhooks},
        },
        application::put_location,
    },
};
use recruit_test_utils::prelude::*;
use sea_orm::EntityTrait;

use crate::setup::{app_state, body_json, login, session_for};

const APPLICANT_CHARACTER_ID: i64 = 95_000_001;
const REVIEWER_CHARACTER_ID: i64 = 95_000_002;
const OUTSIDE_CORPORATION_ID: i64 = 98_000_001;

const APPLICANT_USER_ID: i32 = 1;
const REVIEWER_USER_ID: i32 = 2;

/// Builds a context with an applicant (user 1) and a reviewer (user 2)
async fn setup() -> Result<TestContext, TestError> {
    TestBuilder::new()
        .with_application_tables()
        .with_seat_tables()
        .with_setting_tables()
        .with_user_for_character(APPLICANT_CHARACTER_ID, OUTSIDE_CORPORATION_ID)
        .with_user_for_character(REVIEWER_CHARACTER_ID, OUTSIDE_CORPORATION_ID)
        .build()
        .await
}

/// Grants the reviewer a SeAT role carrying `permissions`
async fn grant(test: &mut TestContext, permissions: &[Permission]) -> Result<(), TestError> {
    let role = test.seat().insert_role(1, "Recruiters").await?;
    test.seat().insert_role_user(role.id, REVIEWER_USER_ID).await?;
    for permission in permissions {
        test.seat()
            .insert_role_permission(role.id, *permission)
            .await?;
    }

    Ok(())
}

fn list_params(limit: u64) -> ApplicationListParams {
    ApplicationListParams {
        limit,
        page: 1,
        status: None,
        location: None,
        seat_completed: None,
        discord_completed: None,
        user: None,
        character: None,
    }
}

/// A rejection records reviewer & reason, queues a notification and starts the cooldown
#[tokio::test]
async fn reviewer_rejects_application() -> Result<(), TestError> {
    let mut test = setup().await?;
    grant(
        &mut test,
        &[Permission::ViewApplication, Permission::RejectApplication],
    )
    .await?;
    let application = test
        .application()
        .insert_application(APPLICANT_USER_ID, ApplicationStatus::Pending)
        .await?;
    let state = app_state(&test, None);
    login(&test.session, REVIEWER_USER_ID).await?;

    let resp = put_application_status(
        State(state.clone()),
        test.session.clone(),
        Path(application.id),
        Json(PutApplicationStatusDto {
            status: ApplicationStatus::Rejected,
            rejection_reason: Some("  Alt of a known spy  ".to_string()),
        }),
    )
    .await
    .into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let rejected: ApplicationDto = body_json(resp).await?;
    assert_eq!(rejected.status, ApplicationStatus::Rejected);
    assert_eq!(rejected.rejection_reason, "Alt of a known spy");
    assert_eq!(
        rejected.reviewer.map(|reviewer| reviewer.id),
        Some(REVIEWER_USER_ID)
    );

    let notifications = entity::prelude::Notification::find().all(&test.db).await?;
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Rejected);
    assert_eq!(notifications[0].reviewer_user_id, Some(REVIEWER_USER_ID));

    let applicant_session = session_for(APPLICANT_USER_ID).await?;
    let resp = put_location(
        State(state),
        applicant_session,
        Json(PutApplicationLocationDto {
            location: ApplicationLocation::Nullsec,
        }),
    )
    .await
    .into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Rejecting without a reason is refused
#[tokio::test]
async fn rejection_requires_reason() -> Result<(), TestError> {
    let mut test = setup().await?;
    grant(&mut test, &[Permission::RejectApplication]).await?;
    let application = test
        .application()
        .insert_application(APPLICANT_USER_ID, ApplicationStatus::Pending)
        .await?;
    let state = app_state(&test, None);
    login(&test.session, REVIEWER_USER_ID).await?;

    let resp = put_application_status(
        State(state),
        test.session.clone(),
        Path(application.id),
        Json(PutApplicationStatusDto {
            status: ApplicationStatus::Rejected,
            rejection_reason: Some("   ".to_string()),
        }),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// A reviewer who may only reject cannot accept
#[tokio::test]
async fn accepting_requires_permission() -> Result<(), TestError> {
    let mut test = setup().await?;
    grant(&mut test, &[Permission::RejectApplication]).await?;
    let application = test
        .application()
        .insert_application(APPLICANT_USER_ID, ApplicationStatus::Pending)
        .await?;
    let state = app_state(&test, None);
    login(&test.session, REVIEWER_USER_ID).await?;

    let resp = put_application_status(
        State(state),
        test.session.clone(),
        Path(application.id),
        Json(PutApplicationStatusDto {
            status: ApplicationStatus::Accepted,
            rejection_reason: None,
        }),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}

/// Decisions on a terminal application conflict
#[tokio::test]
async fn terminal_application_conflicts() -> Result<(), TestError> {
    let mut test = setup().await?;
    let application = test
        .application()
        .insert_application(APPLICANT_USER_ID, ApplicationStatus::Joined)
        .await?;
    let state = app_state(&test, Some(REVIEWER_CHARACTER_ID));
    login(&test.session, REVIEWER_USER_ID).await?;

    let resp = put_application_status(
        State(state),
        test.session.clone(),
        Path(application.id),
        Json(PutApplicationStatusDto {
            status: ApplicationStatus::Cancelled,
            rejection_reason: None,
        }),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::CONFLICT);

    Ok(())
}

/// The configured admin character sees every application without any role
#[tokio::test]
async fn admin_character_lists_applications() -> Result<(), TestError> {
    let mut test = setup().await?;
    test.application()
        .insert_application(APPLICANT_USER_ID, ApplicationStatus::Pending)
        .await?;
    let state = app_state(&test, Some(REVIEWER_CHARACTER_ID));
    login(&test.session, REVIEWER_USER_ID).await?;

    let resp = get_applications(State(state), test.session.clone(), Query(list_params(10)))
        .await
        .into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let page: GetApplicationsDto = body_json(resp).await?;
    assert_eq!(page.total, 1);
    assert_eq!(page.applications[0].user.id, APPLICANT_USER_ID);

    Ok(())
}

/// Users without a role are forbidden from listing applications
#[tokio::test]
async fn listing_requires_permission() -> Result<(), TestError> {
    let test = setup().await?;
    let state = app_state(&test, None);
    login(&test.session, APPLICANT_USER_ID).await?;

    let resp = get_applications(State(state), test.session.clone(), Query(list_params(10)))
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}

/// A page size above the maximum is refused
#[tokio::test]
async fn listing_rejects_oversized_page() -> Result<(), TestError> {
    let test = setup().await?;
    let state = app_state(&test, Some(REVIEWER_CHARACTER_ID));
    login(&test.session, REVIEWER_USER_ID).await?;

    let resp = get_applications(State(state), test.session.clone(), Query(list_params(101)))
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Unknown application IDs are not found
#[tokio::test]
async fn unknown_application_is_not_found() -> Result<(), TestError> {
    let test = setup().await?;
    let state = app_state(&test, Some(REVIEWER_CHARACTER_ID));
    login(&test.session, REVIEWER_USER_ID).await?;

    let resp = get_application(State(state), test.session.clone(), Path(999))
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Only admins may change role permissions
#[tokio::test]
async fn role_permissions_require_admin() -> Result<(), TestError> {
    let mut test = setup().await?;
    grant(&mut test, &[Permission::ViewApplication, Permission::SetRolePermissions]).await?;
    let state = app_state(&test, None);
    login(&test.session, REVIEWER_USER_ID).await?;

    let resp = post_role_permissions(
        State(state),
        test.session.clone(),
        Path(1),
        Json(vec![Permission::Admin]),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}

/// Saved webhooks are returned, and clearing one with an empty string removes it
#[tokio::test]
async fn manages_webhooks() -> Result<(), TestError> {
    let mut test = setup().await?;
    grant(&mut test, &[Permission::ManageSettings]).await?;
    let state = app_state(&test, None);
    login(&test.session, REVIEWER_USER_ID).await?;

    let webhook = "https://discord.com/api/webhooks/123/abc-DEF".to_string();
    let resp = post_webhooks(
        State(state.clone()),
        test.session.clone(),
        Json(DiscordWebhooksDto {
            discord_webhook_new_application: Some(webhook.clone()),
            discord_webhook_application_accepted: Some(webhook.clone()),
            ..Default::default()
        }),
    )
    .await
    .into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = post_webhooks(
        State(state.clone()),
        test.session.clone(),
        Json(DiscordWebhooksDto {
            discord_webhook_application_accepted: Some(String::new()),
            ..Default::default()
        }),
    )
    .await
    .into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = get_webhooks(State(state), test.session.clone())
        .await
        .into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let webhooks: DiscordWebhooksDto = body_json(resp).await?;
    assert_eq!(webhooks.discord_webhook_new_application, Some(webhook));
    assert_eq!(webhooks.discord_webhook_application_accepted, None);

    Ok(())
}

/// Webhook URLs outside Discord are refused
#[tokio::test]
async fn rejects_foreign_webhook() -> Result<(), TestError> {
    let mut test = setup().await?;
    grant(&mut test, &[Permission::ManageSettings]).await?;
    let state = app_state(&test, None);
    login(&test.session, REVIEWER_USER_ID).await?;

    let resp = post_webhooks(
        State(state),
        test.session.clone(),
        Json(DiscordWebhooksDto {
            discord_webhook_new_application: Some("https://example.com/hook".to_string()),
            ..Default::default()
        }),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}
