//! Registry of tokens invalidated before their natural expiry.
//!
//! An entry only has to live until the token's own `exp`: after that the
//! codec rejects the token anyway, so expired entries are dropped lazily on
//! lookup and in bulk by [`RevocationSweeper`].

pub mod memory;
pub mod postgres;
pub mod sweeper;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use authgate_core::config::{RevocationConfig, StoreBackend};
use authgate_core::error::AppError;
use authgate_core::result::AppResult;
use authgate_database::DatabasePool;

pub use memory::MemoryRevocationRegistry;
pub use postgres::PgRevocationRegistry;
pub use sweeper::RevocationSweeper;

/// Storage for revoked token ids.
///
/// A `revoke` must be visible to every `is_revoked` that starts after it
/// returns. Backend failures are returned, never swallowed.
#[async_trait]
pub trait RevocationRegistry: Send + Sync + std::fmt::Debug + 'static {
    /// Record `token_id` as revoked until `expires_at`. Idempotent.
    async fn revoke(&self, token_id: Uuid, expires_at: DateTime<Utc>) -> AppResult<()>;

    /// Whether `token_id` has an entry still active at `now`.
    async fn is_revoked_at(&self, token_id: Uuid, now: DateTime<Utc>) -> AppResult<bool>;

    /// Remove entries with `expires_at <= now`. Returns how many were removed.
    async fn sweep(&self, now: DateTime<Utc>) -> AppResult<u64>;

    /// Whether `token_id` is currently revoked.
    async fn is_revoked(&self, token_id: Uuid) -> AppResult<bool> {
        self.is_revoked_at(token_id, Utc::now()).await
    }
}

/// Build the registry selected by configuration.
pub fn build_registry(
    config: &RevocationConfig,
    pool: Option<&DatabasePool>,
) -> AppResult<Arc<dyn RevocationRegistry>> {
    match config.backend {
        StoreBackend::Memory => Ok(Arc::new(MemoryRevocationRegistry::new())),
        StoreBackend::Postgres => {
            let pool = pool.ok_or_else(|| {
                AppError::configuration("postgres revocation backend requires a database pool")
            })?;
            Ok(Arc::new(PgRevocationRegistry::new(pool)))
        }
    }
}
