//! Postgres-backed revocation registry.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use authgate_core::result::AppResult;
use authgate_database::{DatabasePool, RevokedTokenRepository};

use super::RevocationRegistry;

/// Revocation registry persisted in the `revoked_tokens` table.
///
/// Survives restarts and is shared by every instance pointing at the same
/// database. The primary key on `token_id` makes revoke idempotent.
#[derive(Debug, Clone)]
pub struct PgRevocationRegistry {
    repo: RevokedTokenRepository,
}

impl PgRevocationRegistry {
    /// Create a registry sharing an existing connection pool.
    pub fn new(pool: &DatabasePool) -> Self {
        Self {
            repo: RevokedTokenRepository::new(pool.pool().clone()),
        }
    }
}

#[async_trait]
impl RevocationRegistry for PgRevocationRegistry {
    async fn revoke(&self, token_id: Uuid, expires_at: DateTime<Utc>) -> AppResult<()> {
        self.repo.insert(token_id, expires_at).await
    }

    async fn is_revoked_at(&self, token_id: Uuid, now: DateTime<Utc>) -> AppResult<bool> {
        self.repo.exists_active(token_id, now).await
    }

    async fn sweep(&self, now: DateTime<Utc>) -> AppResult<u64> {
        self.repo.delete_expired(now).await
    }
}
