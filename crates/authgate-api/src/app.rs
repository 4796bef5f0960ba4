//! Application builder: selects backends from configuration and wires the
//! auth service into `AppState`.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use authgate_auth::revocation::build_registry;
use authgate_auth::{AuthService, PasswordHasher, RevocationSweeper, TokenCodec};
use authgate_core::config::{AppConfig, StoreBackend};
use authgate_core::error::AppError;
use authgate_core::result::AppResult;
use authgate_database::{DatabasePool, MemoryUserStore, PgUserStore, UserStore};

use crate::state::AppState;

/// Everything the server binary needs to run.
#[derive(Debug)]
pub struct Components {
    /// State for the router.
    pub state: AppState,
    /// Background revocation sweeper, not yet started.
    pub sweeper: RevocationSweeper,
}

/// Connects configured backends and builds the application state.
pub async fn build_components(config: AppConfig) -> AppResult<Components> {
    let db = if config.needs_database() {
        Some(DatabasePool::connect(&config.database).await?)
    } else {
        None
    };

    let users = build_user_store(config.database.provider, db.as_ref())?;
    let revocations = build_registry(&config.revocation, db.as_ref())?;

    info!(
        users = ?config.database.provider,
        revocation = ?config.revocation.backend,
        "Backends initialized"
    );

    let auth = AuthService::new(
        users,
        Arc::clone(&revocations),
        TokenCodec::new(&config.auth),
        PasswordHasher::new(),
    );

    let sweeper = RevocationSweeper::new(
        revocations,
        Duration::from_secs(config.revocation.sweep_interval_seconds.max(1)),
    );

    let state = AppState::new(Arc::new(config), Arc::new(auth), db);

    Ok(Components { state, sweeper })
}

/// Build the credential store selected by configuration.
pub fn build_user_store(
    backend: StoreBackend,
    db: Option<&DatabasePool>,
) -> AppResult<Arc<dyn UserStore>> {
    match backend {
        StoreBackend::Memory => Ok(Arc::new(MemoryUserStore::new())),
        StoreBackend::Postgres => {
            let pool = db.ok_or_else(|| {
                AppError::configuration("postgres user store requires a database pool")
            })?;
            Ok(Arc::new(PgUserStore::new(pool.pool().clone())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_configuration_needs_no_database() {
        let components = build_components(AppConfig::default()).await.unwrap();
        assert!(components.state.db.is_none());
        assert_eq!(components.state.auth.ttl_seconds(), 3600);
    }

    #[test]
    fn test_postgres_store_without_pool_is_rejected() {
        let err = build_user_store(StoreBackend::Postgres, None).unwrap_err();
        assert_eq!(err.kind, authgate_core::error::ErrorKind::Configuration);
    }
}
