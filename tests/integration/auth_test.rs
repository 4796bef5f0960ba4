//! Integration tests for the login / me / logout flow.

mod helpers;

use chrono::{Duration, Utc};
use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

async fn app_with_user() -> helpers::TestApp {
    let app = helpers::TestApp::new();
    app.register("a", "a@b.com", "pw1").await;
    app
}

#[tokio::test]
async fn test_login_success() {
    let app = app_with_user().await;

    let response = app
        .request(
            "POST",
            "/api/login",
            Some(json!({ "email": "a@b.com", "password": "pw1" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["token_type"], "bearer");
    assert_eq!(response.body["expires_in"], 3600);
    assert!(response.body["access_token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn test_login_is_case_insensitive_on_email() {
    let app = app_with_user().await;
    let token = app.login("A@B.COM", "pw1").await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_login_invalid_password() {
    let app = app_with_user().await;

    let response = app
        .request(
            "POST",
            "/api/login",
            Some(json!({ "email": "a@b.com", "password": "wrong" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, json!({ "error": "Unauthorized" }));
}

#[tokio::test]
async fn test_login_nonexistent_user() {
    let app = app_with_user().await;

    let response = app
        .request(
            "POST",
            "/api/login",
            Some(json!({ "email": "nobody@b.com", "password": "pw1" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, json!({ "error": "Unauthorized" }));
}

#[tokio::test]
async fn test_login_missing_fields() {
    let app = app_with_user().await;

    let response = app
        .request("POST", "/api/login", Some(json!({ "email": "a@b.com" })), None)
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        response.body["errors"]["password"],
        json!(["The password field is required."])
    );
}

#[tokio::test]
async fn test_me_returns_current_user() {
    let app = app_with_user().await;
    let token = app.login("a@b.com", "pw1").await;

    let response = app.request("GET", "/api/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], "a");
    assert_eq!(response.body["email"], "a@b.com");
    assert!(response.body.get("id").is_some());
    assert!(response.body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_me_without_token() {
    let app = app_with_user().await;

    let response = app.request("GET", "/api/me", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, json!({ "message": "Unauthenticated" }));
}

#[tokio::test]
async fn test_me_with_invalid_token() {
    let app = app_with_user().await;

    for token in ["garbage", "a.b.c", "eyJhbGciOiJIUzI1NiJ9.e30.AAAA"] {
        let response = app.request("GET", "/api/me", None, Some(token)).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "token {token}");
        assert_eq!(response.body, json!({ "message": "Unauthenticated" }));
    }
}

#[tokio::test]
async fn test_me_with_expired_token() {
    let app = app_with_user().await;
    let user_id = app
        .request("GET", "/api/me", None, Some(&app.login("a@b.com", "pw1").await))
        .await
        .body["id"]
        .as_str()
        .and_then(|id| id.parse::<Uuid>().ok())
        .expect("user id");

    let expired = app
        .codec
        .issue_at(user_id, Utc::now() - Duration::hours(2))
        .expect("issue token");

    let response = app
        .request("GET", "/api/me", None, Some(&expired.token))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, json!({ "message": "Unauthenticated" }));
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let app = app_with_user().await;
    let token = app.login("a@b.com", "pw1").await;

    let response = app.request("GET", "/api/logout", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({ "message": "Successfully logged out" })
    );
    assert_eq!(app.revocations.len(), 1);

    let response = app.request("GET", "/api/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, json!({ "message": "Unauthenticated" }));
}

#[tokio::test]
async fn test_logout_twice_is_rejected() {
    let app = app_with_user().await;
    let token = app.login("a@b.com", "pw1").await;

    let first = app.request("POST", "/api/logout", None, Some(&token)).await;
    assert_eq!(first.status, StatusCode::OK);

    let second = app.request("POST", "/api/logout", None, Some(&token)).await;
    assert_eq!(second.status, StatusCode::UNAUTHORIZED);
    assert_eq!(second.body, json!({ "message": "Unauthenticated" }));
}

#[tokio::test]
async fn test_logout_without_token() {
    let app = app_with_user().await;

    let response = app.request("GET", "/api/logout", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(app.revocations.is_empty());
}

#[tokio::test]
async fn test_logout_leaves_other_tokens_valid() {
    let app = app_with_user().await;
    let first = app.login("a@b.com", "pw1").await;
    let second = app.login("a@b.com", "pw1").await;

    app.request("GET", "/api/logout", None, Some(&first)).await;

    let response = app.request("GET", "/api/me", None, Some(&second)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["email"], "a@b.com");
}
