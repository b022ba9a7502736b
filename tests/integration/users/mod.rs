//! User profile and credential change tests

use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::common::{user_id_of, TestApp};

#[tokio::test]
async fn test_get_user_profile() {
    let app = TestApp::new();
    let token = app.signup("user@test.com", "Password1", "USER").await;
    let id = user_id_of(&app.codec, &token);

    let response = app
        .send(Method::GET, &format!("/users/{}", id), Some(&token), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({"id": id, "email": "user@test.com"}));
}

#[tokio::test]
async fn test_get_unknown_user() {
    let app = TestApp::new();
    let token = app.signup("user@test.com", "Password1", "USER").await;

    let response = app.send(Method::GET, "/users/999", Some(&token), None).await;
    response.assert_error(StatusCode::BAD_REQUEST, "BAD_REQUEST", "User not found");
}

#[tokio::test]
async fn test_change_password_then_signin_with_new_password() {
    let app = TestApp::new();
    let token = app.signup("user@test.com", "OldPassword1", "USER").await;

    let response = app
        .send(
            Method::PUT,
            "/users",
            Some(&token),
            Some(json!({"oldPassword": "OldPassword1", "newPassword": "NewPassword1"})),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "body: {}", response.body);

    assert_eq!(
        app.signin("user@test.com", "NewPassword1").await.status,
        StatusCode::OK
    );
    app.signin("user@test.com", "OldPassword1")
        .await
        .assert_error(StatusCode::BAD_REQUEST, "BAD_REQUEST", "Wrong password");
}

#[tokio::test]
async fn test_change_password_applies_to_token_subject() {
    let app = TestApp::new();
    let first = app.signup("first@test.com", "Password1", "USER").await;
    app.signup("second@test.com", "Password1", "USER").await;

    let response = app
        .send(
            Method::PUT,
            "/users",
            Some(&first),
            Some(json!({"oldPassword": "Password1", "newPassword": "NewPassword1"})),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // Only the caller's credential changed
    assert_eq!(
        app.signin("second@test.com", "Password1").await.status,
        StatusCode::OK
    );
    assert_eq!(
        app.signin("first@test.com", "NewPassword1").await.status,
        StatusCode::OK
    );
}

#[tokio::test]
async fn test_change_password_rejects_weak_password() {
    let app = TestApp::new();
    let token = app.signup("user@test.com", "Password1", "USER").await;
    let id = user_id_of(&app.codec, &token);
    let before = app.directory.get(id).unwrap().password_hash;

    for weak in ["Short1", "nouppercase1", "NoDigitsHere"] {
        let response = app
            .send(
                Method::PUT,
                "/users",
                Some(&token),
                Some(json!({"oldPassword": "Password1", "newPassword": weak})),
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "password: {}", weak);
        assert_eq!(response.body["status"], "BAD_REQUEST");
    }

    assert_eq!(app.directory.get(id).unwrap().password_hash, before);
}

#[tokio::test]
async fn test_change_password_rejects_reused_password() {
    let app = TestApp::new();
    let token = app.signup("user@test.com", "Password1", "USER").await;

    let response = app
        .send(
            Method::PUT,
            "/users",
            Some(&token),
            Some(json!({"oldPassword": "Password1", "newPassword": "Password1"})),
        )
        .await;

    response.assert_error(
        StatusCode::BAD_REQUEST,
        "BAD_REQUEST",
        "New password must differ from the current password",
    );
}

#[tokio::test]
async fn test_change_password_rejects_wrong_old_password() {
    let app = TestApp::new();
    let token = app.signup("user@test.com", "Password1", "USER").await;

    let response = app
        .send(
            Method::PUT,
            "/users",
            Some(&token),
            Some(json!({"oldPassword": "Password2", "newPassword": "NewPassword1"})),
        )
        .await;

    response.assert_error(StatusCode::BAD_REQUEST, "BAD_REQUEST", "Wrong password");
    assert_eq!(
        app.signin("user@test.com", "Password1").await.status,
        StatusCode::OK
    );
}

#[tokio::test]
async fn test_change_password_requires_authentication() {
    let app = TestApp::new();

    let response = app
        .send(
            Method::PUT,
            "/users",
            None,
            Some(json!({"oldPassword": "Password1", "newPassword": "NewPassword1"})),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
