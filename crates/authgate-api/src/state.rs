//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use authgate_auth::AuthService;
use authgate_core::config::AppConfig;
use authgate_database::DatabasePool;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Register / login / me / logout
    pub auth: Arc<AuthService>,
    /// PostgreSQL pool, present only when a postgres backend is configured
    pub db: Option<DatabasePool>,
    /// Process start, for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    /// Creates the state, starting the uptime clock now.
    pub fn new(config: Arc<AppConfig>, auth: Arc<AuthService>, db: Option<DatabasePool>) -> Self {
        Self {
            config,
            auth,
            db,
            started_at: Instant::now(),
        }
    }
}
