//! Integration tests for registration.

mod helpers;

use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::json;

#[tokio::test]
async fn test_register_success() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/register",
            Some(json!({ "name": "j", "email": "j@e.com", "password": "pw" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["error"], false);
    assert_eq!(response.body["message"], "Created!");
    assert_eq!(response.body["user"]["name"], "j");
    assert_eq!(response.body["user"]["email"], "j@e.com");
    assert!(response.body["user"].get("id").is_some());
    assert!(response.body["user"].get("password_hash").is_none());
    assert_eq!(app.users.len(), 1);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = helpers::TestApp::new();
    app.register("j", "j@e.com", "pw").await;

    let response = app
        .request(
            "POST",
            "/api/register",
            Some(json!({ "name": "j", "email": "J@E.com", "password": "pw" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], true);
    assert!(response.body["message"].as_str().is_some());
    assert_eq!(app.users.len(), 1);
}

#[tokio::test]
async fn test_register_concurrent_duplicates_keep_one_record() {
    let app = helpers::TestApp::new();
    let body = json!({ "name": "r", "email": "race@e.com", "password": "pw" }).to_string();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let router = app.router.clone();
            let req = Request::builder()
                .method("POST")
                .uri("/api/register")
                .header("Content-Type", "application/json")
                .body(Body::from(body.clone()))
                .expect("request");
            tokio::spawn(helpers::send_to(router, req))
        })
        .collect();

    let mut created = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.expect("task").status {
            StatusCode::CREATED => created += 1,
            StatusCode::CONFLICT => conflicts += 1,
            other => panic!("unexpected status {other}"),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(conflicts, 7);
    assert_eq!(app.users.len(), 1);
}

#[tokio::test]
async fn test_register_missing_fields() {
    let app = helpers::TestApp::new();

    let response = app
        .request("POST", "/api/register", Some(json!({})), None)
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        response.body["errors"]["name"],
        json!(["The name field is required."])
    );
    assert_eq!(
        response.body["errors"]["email"],
        json!(["The email field is required."])
    );
    assert_eq!(
        response.body["errors"]["password"],
        json!(["The password field is required."])
    );
    assert!(app.users.is_empty());
}

#[tokio::test]
async fn test_register_invalid_email() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/register",
            Some(json!({ "name": "j", "email": "not-an-email", "password": "pw" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        response.body["message"],
        "The email must be a valid email address."
    );
}

#[tokio::test]
async fn test_register_malformed_json() {
    let app = helpers::TestApp::new();

    let response = app
        .send("POST", "/api/register", "{not json".to_string(), None)
        .await;

    assert!(response.status.is_client_error());
    assert!(response.body["message"].as_str().is_some());
    assert!(app.users.is_empty());
}

#[tokio::test]
async fn test_registered_user_can_log_in() {
    let app = helpers::TestApp::new();
    app.register("j", "J@e.com", "pw").await;

    let token = app.login("j@e.com", "pw").await;
    let response = app.request("GET", "/api/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], "j");
}
