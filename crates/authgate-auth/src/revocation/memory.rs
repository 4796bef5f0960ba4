//! In-process revocation registry.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

use authgate_core::result::AppResult;

use super::RevocationRegistry;

/// Revocation registry held in a sharded concurrent map.
///
/// Writes for distinct ids land on independent shards; writes and reads of
/// the same id serialize on that id's shard lock.
#[derive(Debug, Default)]
pub struct MemoryRevocationRegistry {
    entries: DashMap<Uuid, DateTime<Utc>>,
}

impl MemoryRevocationRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of retained entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries are retained.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl RevocationRegistry for MemoryRevocationRegistry {
    async fn revoke(&self, token_id: Uuid, expires_at: DateTime<Utc>) -> AppResult<()> {
        self.entries
            .entry(token_id)
            .and_modify(|existing| {
                if expires_at > *existing {
                    *existing = expires_at;
                }
            })
            .or_insert(expires_at);
        Ok(())
    }

    async fn is_revoked_at(&self, token_id: Uuid, now: DateTime<Utc>) -> AppResult<bool> {
        let active = match self.entries.get(&token_id) {
            Some(expires_at) => *expires_at > now,
            None => return Ok(false),
        };

        if !active {
            self.entries
                .remove_if(&token_id, |_, expires_at| *expires_at <= now);
            debug!(%token_id, "Dropped expired revocation entry on lookup");
        }

        Ok(active)
    }

    async fn sweep(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let before = self.entries.len();
        self.entries.retain(|_, expires_at| *expires_at > now);
        Ok(before.saturating_sub(self.entries.len()) as u64)
    }
}
