//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /api/health
///
/// Returns 503 when a configured database does not answer.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = match &state.db {
        Some(pool) => match pool.health_check().await {
            Ok(true) => Some("connected"),
            Ok(false) => Some("unavailable"),
            Err(e) => {
                tracing::warn!(error = %e, "Database health check failed");
                Some("unavailable")
            }
        },
        None => None,
    };

    let healthy = database != Some("unavailable");
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthResponse {
            status: if healthy { "ok" } else { "degraded" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: state.started_at.elapsed().as_secs(),
            database: database.map(str::to_string),
        }),
    )
}
