//! Periodic removal of expired revocation entries.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::time;
use tracing::{debug, error, info};

use super::RevocationRegistry;

/// Background task that sweeps the revocation registry on a fixed interval.
#[derive(Debug, Clone)]
pub struct RevocationSweeper {
    registry: Arc<dyn RevocationRegistry>,
    interval: Duration,
}

impl RevocationSweeper {
    /// Creates a sweeper running every `interval`.
    pub fn new(registry: Arc<dyn RevocationRegistry>, interval: Duration) -> Self {
        Self { registry, interval }
    }

    /// Runs a single sweep. Failures are logged and reported as zero removals.
    pub async fn run_once(&self) -> u64 {
        match self.registry.sweep(Utc::now()).await {
            Ok(0) => {
                debug!("Revocation sweep found nothing to remove");
                0
            }
            Ok(removed) => {
                info!(removed, "Revocation sweep completed");
                removed
            }
            Err(e) => {
                error!(error = %e, "Revocation sweep failed");
                0
            }
        }
    }

    /// Sweeps until `shutdown` flips to `true` or its sender is dropped.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        info!(
            interval_seconds = self.interval.as_secs(),
            "Revocation sweeper started"
        );

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(time::MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    self.run_once().await;
                }
            }
        }

        info!("Revocation sweeper stopped");
    }
}
