//! Token issuance and request authentication filter tests

use axum::http::{Method, StatusCode};
use base64::{
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
    Engine as _,
};
use chrono::{Duration, Utc};
use tollgate_auth::{AuthConfig, Role, TokenCodec};

use crate::common::{bearer_token, user_id_of, TestApp};

mod test_issuance {
    use super::*;

    #[tokio::test]
    async fn test_signup_then_signin_issues_bearer_tokens() {
        let app = TestApp::new();

        let signup_token = app.signup("user@test.com", "Password1", "user").await;
        assert!(signup_token.starts_with("Bearer "));

        let response = app.signin("user@test.com", "Password1").await;
        assert_eq!(response.status, StatusCode::OK);
        let signin_token = bearer_token(&response);

        let id = user_id_of(&app.codec, &signin_token);
        assert_eq!(id, user_id_of(&app.codec, &signup_token));

        let claims = app
            .codec
            .extract_claims(signin_token.trim_start_matches("Bearer "))
            .unwrap();
        assert_eq!(claims.email, "user@test.com");
        assert_eq!(claims.role, Role::User);
    }

    #[tokio::test]
    async fn test_stored_credential_is_hashed() {
        let app = TestApp::new();
        let token = app.signup("user@test.com", "Password1", "USER").await;

        let user = app.directory.get(user_id_of(&app.codec, &token)).unwrap();
        assert_ne!(user.password_hash, "Password1");
        assert!(user.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_duplicate_signup_is_rejected() {
        let app = TestApp::new();
        app.signup("dup@test.com", "Password1", "USER").await;

        let response = app
            .send(
                Method::POST,
                "/auth/signup",
                None,
                Some(serde_json::json!({
                    "email": "dup@test.com",
                    "password": "Password2",
                    "userRole": "ADMIN",
                })),
            )
            .await;

        response.assert_error(StatusCode::BAD_REQUEST, "BAD_REQUEST", "Email already exists");
        assert_eq!(app.directory.len(), 1);
    }

    #[tokio::test]
    async fn test_signup_with_unknown_role_is_rejected() {
        let app = TestApp::new();

        let response = app
            .send(
                Method::POST,
                "/auth/signup",
                None,
                Some(serde_json::json!({
                    "email": "user@test.com",
                    "password": "Password1",
                    "userRole": "SUPERUSER",
                })),
            )
            .await;

        response.assert_error(StatusCode::BAD_REQUEST, "BAD_REQUEST", "Invalid UserRole");
        assert!(app.directory.is_empty());
    }

    #[tokio::test]
    async fn test_signup_with_invalid_email_is_rejected() {
        let app = TestApp::new();

        let response = app
            .send(
                Method::POST,
                "/auth/signup",
                None,
                Some(serde_json::json!({
                    "email": "not-an-email",
                    "password": "Password1",
                    "userRole": "USER",
                })),
            )
            .await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["status"], "BAD_REQUEST");
        assert!(app.directory.is_empty());
    }

    #[tokio::test]
    async fn test_signin_unregistered_email() {
        let app = TestApp::new();

        let response = app.signin("nobody@test.com", "Password1").await;
        response.assert_error(StatusCode::BAD_REQUEST, "BAD_REQUEST", "User not registered");
    }

    #[tokio::test]
    async fn test_signin_wrong_password() {
        let app = TestApp::new();
        app.signup("user@test.com", "Password1", "USER").await;

        let response = app.signin("user@test.com", "Password2").await;
        response.assert_error(StatusCode::BAD_REQUEST, "BAD_REQUEST", "Wrong password");
    }
}

mod test_filter {
    use super::*;

    #[tokio::test]
    async fn test_missing_authorization_header() {
        let app = TestApp::new();

        let response = app.send(Method::GET, "/users/1", None, None).await;
        response.assert_error(
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
            "Authentication required",
        );
    }

    #[tokio::test]
    async fn test_non_bearer_scheme() {
        let app = TestApp::new();

        let response = app
            .send(Method::GET, "/users/1", Some("Basic dXNlcjpwYXNz"), None)
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_bearer_scheme_without_token() {
        let app = TestApp::new();

        let response = app.send(Method::GET, "/users/1", Some("Bearer "), None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_expired_token() {
        let app = TestApp::new();
        let token = app.signup("user@test.com", "Password1", "USER").await;
        let id = user_id_of(&app.codec, &token);

        // 61 minutes after issuance with a 60 minute lifetime
        let expired = app.bearer_at(
            id,
            "user@test.com",
            Role::User,
            Utc::now() - Duration::minutes(61),
        );

        let response = app
            .send(Method::GET, &format!("/users/{}", id), Some(&expired), None)
            .await;
        response.assert_error(
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
            "Authentication required: token has expired",
        );
    }

    #[tokio::test]
    async fn test_token_within_lifetime() {
        let app = TestApp::new();
        let token = app.signup("user@test.com", "Password1", "USER").await;
        let id = user_id_of(&app.codec, &token);

        let fresh = app.bearer_at(
            id,
            "user@test.com",
            Role::User,
            Utc::now() - Duration::minutes(30),
        );

        let response = app
            .send(Method::GET, &format!("/users/{}", id), Some(&fresh), None)
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_malformed_token() {
        let app = TestApp::new();

        let response = app
            .send(Method::GET, "/users/1", Some("Bearer not-a-jwt"), None)
            .await;
        response.assert_error(
            StatusCode::BAD_REQUEST,
            "BAD_REQUEST",
            "Authentication required: malformed token",
        );
    }

    #[tokio::test]
    async fn test_tampered_signature() {
        let app = TestApp::new();
        let token = app.signup("user@test.com", "Password1", "USER").await;

        let raw = token.trim_start_matches("Bearer ");
        let (signed, signature) = raw.rsplit_once('.').unwrap();
        let mut bytes = URL_SAFE_NO_PAD.decode(signature).unwrap();
        bytes[0] ^= 0x01;
        let tampered = format!("Bearer {}.{}", signed, URL_SAFE_NO_PAD.encode(bytes));

        let response = app.send(Method::GET, "/users/1", Some(&tampered), None).await;
        response.assert_error(
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
            "Authentication required: invalid token",
        );
    }

    #[tokio::test]
    async fn test_token_signed_with_other_secret() {
        let app = TestApp::new();
        let foreign = TokenCodec::new(&AuthConfig::new(
            STANDARD.encode(b"some-other-secret-key-that-is-long-enough-to-use"),
            Duration::minutes(60),
        ))
        .unwrap();
        let token = foreign
            .create(1, "user@test.com", Role::Admin, Utc::now())
            .unwrap();

        let response = app
            .send(
                Method::GET,
                "/users/1",
                Some(&format!("Bearer {}", token)),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_issuance_paths_bypass_the_filter() {
        let app = TestApp::new();
        app.signup("user@test.com", "Password1", "USER").await;

        // A garbage credential is not even parsed on allowlisted paths
        let response = app
            .send(
                Method::POST,
                "/auth/signin",
                Some("Bearer garbage"),
                Some(serde_json::json!({"email": "user@test.com", "password": "Password1"})),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_allowlist_matches_whole_segments() {
        let app = TestApp::new();

        let response = app.send(Method::GET, "/authors", None, None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_health_needs_no_token() {
        let app = TestApp::default();

        let response = app.send(Method::GET, "/health", None, None).await;
        assert_eq!(response.status, StatusCode::OK);
    }
}
