//! Revocation registry configuration.

use serde::{Deserialize, Serialize};

use super::database::StoreBackend;

/// Where revoked token ids live and how often expired entries are purged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevocationConfig {
    /// Registry backend.
    #[serde(default)]
    pub backend: StoreBackend,
    /// Interval between sweeps of expired entries, in seconds.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
}

impl Default for RevocationConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            sweep_interval_seconds: default_sweep_interval(),
        }
    }
}

fn default_sweep_interval() -> u64 {
    60
}
