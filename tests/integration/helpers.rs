//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use authgate_api::{AppState, build_router};
use authgate_auth::{AuthService, MemoryRevocationRegistry, PasswordHasher, TokenCodec};
use authgate_core::config::AppConfig;
use authgate_database::MemoryUserStore;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Users held by the app
    pub users: Arc<MemoryUserStore>,
    /// Revoked tokens held by the app
    pub revocations: Arc<MemoryRevocationRegistry>,
    /// Codec sharing the app's signing key
    pub codec: TokenCodec,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application with in-memory backends
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "integration-test-secret".to_string();

        let users = Arc::new(MemoryUserStore::new());
        let revocations = Arc::new(MemoryRevocationRegistry::new());
        let codec = TokenCodec::new(&config.auth);
        let hasher = PasswordHasher::with_params(1024, 1, 1).expect("Invalid Argon2 parameters");

        let auth = AuthService::new(
            users.clone(),
            revocations.clone(),
            codec.clone(),
            hasher,
        );

        let state = AppState::new(Arc::new(config.clone()), Arc::new(auth), None);

        Self {
            router: build_router(state),
            users,
            revocations,
            codec,
            config,
        }
    }

    /// Register a user through the API, asserting success
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Value {
        let response = self
            .request(
                "POST",
                "/api/register",
                Some(json!({ "name": name, "email": email, "password": password })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Registration failed: {:?}",
            response.body
        );

        response.body
    }

    /// Login and return JWT access token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/login",
                Some(json!({ "email": email, "password": password })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response
            .body
            .get("access_token")
            .and_then(|v| v.as_str())
            .expect("No access_token in login response")
            .to_string()
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        self.send(method, path, body_str, token).await
    }

    /// Make an HTTP request with a raw body
    pub async fn send(
        &self,
        method: &str,
        path: &str,
        body: String,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req.body(Body::from(body)).expect("Failed to build request");

        send_to(self.router.clone(), req).await
    }
}

/// Send a request through a router and parse the JSON response
pub async fn send_to(router: Router, req: Request<Body>) -> TestResponse {
    let response = router.oneshot(req).await.expect("Failed to send request");

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("Failed to read body");

    let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

    TestResponse { status, body }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
