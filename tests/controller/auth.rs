use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use entity::sea_orm_active_enums::Permission;
use recruit::{
    model::user::UserDto,
    server::{
        controller::auth::{callback, get_user, login, logout, CallbackParams},
        model::session::{
            auth::{SessionAuthCsrf, SESSION_AUTH_CSRF_KEY},
            user::{SessionUserId, SESSION_USER_ID_KEY},
        },
    },
};
use recruit_test_utils::{constant::TEST_FRONTEND_URL, prelude::*};

use crate::setup::{app_state, body_json};

const CHARACTER_ID: i64 = 95_000_001;
const OUTSIDE_CORPORATION_ID: i64 = 98_000_001;

/// Login stores the CSRF state and redirects to EVE Online
#[tokio::test]
async fn login_redirects_with_state() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    let state = app_state(&test, None);

    let resp = login(State(state), test.session.clone())
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert!(resp.headers().contains_key(header::LOCATION));

    let csrf = test
        .session
        .get::<SessionAuthCsrf>(SESSION_AUTH_CSRF_KEY)
        .await?;
    assert!(csrf.is_some_and(|SessionAuthCsrf(csrf)| !csrf.is_empty()));

    Ok(())
}

/// A returning user is logged in and sent to the application page
#[tokio::test]
async fn callback_logs_user_in() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_user_tables()
        .with_jwt_endpoints(CHARACTER_ID, format!("owner_hash_{}", CHARACTER_ID))
        .build()
        .await?;
    let (user, _) = test
        .user()
        .insert_user_with_mock_character(CHARACTER_ID, OUTSIDE_CORPORATION_ID)
        .await?;
    test.user().link_seat_user(user.id, 5).await?;
    test.session
        .insert(SESSION_AUTH_CSRF_KEY, SessionAuthCsrf("state".to_string()))
        .await?;
    let state = app_state(&test, None);

    let resp = callback(
        State(state),
        test.session.clone(),
        Query(CallbackParams {
            state: "state".to_string(),
            code: "code".to_string(),
        }),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        resp.headers()
            .get(header::LOCATION)
            .and_then(|location| location.to_str().ok()),
        Some(format!("{}/application", TEST_FRONTEND_URL).as_str())
    );

    let session_user = test
        .session
        .get::<SessionUserId>(SESSION_USER_ID_KEY)
        .await?
        .map(|SessionUserId(id)| id);
    assert_eq!(session_user, Some(user.id.to_string()));

    test.assert_mocks();

    Ok(())
}

/// A callback whose state does not match the session is refused
#[tokio::test]
async fn callback_rejects_state_mismatch() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    test.session
        .insert(SESSION_AUTH_CSRF_KEY, SessionAuthCsrf("state".to_string()))
        .await?;
    let state = app_state(&test, None);

    let resp = callback(
        State(state),
        test.session.clone(),
        Query(CallbackParams {
            state: "forged".to_string(),
            code: "code".to_string(),
        }),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// The configured admin character carries every permission
#[tokio::test]
async fn admin_user_has_every_permission() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .with_seat_tables()
        .with_user_for_character(CHARACTER_ID, OUTSIDE_CORPORATION_ID)
        .build()
        .await?;
    crate::setup::login(&test.session, 1).await?;
    let state = app_state(&test, Some(CHARACTER_ID));

    let resp = get_user(State(state), test.session.clone())
        .await
        .into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let user: UserDto = body_json(resp).await?;
    assert_eq!(user.character_id, CHARACTER_ID);
    assert!(user.permissions.contains(&Permission::Admin));

    Ok(())
}

/// Reading the user without a session is unauthorized
#[tokio::test]
async fn get_user_requires_login() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let state = app_state(&test, None);

    let resp = get_user(State(state), test.session.clone())
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// A session pointing at a deleted user is cleared and answers 404
#[tokio::test]
async fn stale_session_user_is_not_found() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .with_seat_tables()
        .build()
        .await?;
    crate::setup::login(&test.session, 42).await?;
    let state = app_state(&test, None);

    let resp = get_user(State(state), test.session.clone())
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(test
        .session
        .get::<SessionUserId>(SESSION_USER_ID_KEY)
        .await?
        .is_none());

    Ok(())
}

/// Logging out clears the session, and logging out twice still succeeds
#[tokio::test]
async fn logout_clears_session() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    crate::setup::login(&test.session, 1).await?;

    let resp = logout(test.session.clone()).await.into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(test
        .session
        .get::<SessionUserId>(SESSION_USER_ID_KEY)
        .await?
        .is_none());

    let resp = logout(test.session.clone()).await.into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}
