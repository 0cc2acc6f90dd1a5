//! Background sweeper for the revocation registry
//!
//! Entries in the registry only matter while their tokens could still
//! pass signature verification; once expired they are dead weight. The
//! sweeper removes them periodically so registry size stays bounded by
//! the revocation rate over one refresh-ttl window.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{error, info, warn};

use crate::errors::DomainResult;
use crate::repositories::RevocationStore;

/// Sweeper scheduling configuration
#[derive(Debug, Clone)]
pub struct SweeperConfig {
    /// Seconds between sweep passes
    pub interval_seconds: u64,

    /// Whether the background task runs at all
    pub enabled: bool,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600, // 1 hour
            enabled: true,
        }
    }
}

/// Periodically removes expired entries from a revocation store
pub struct RevocationSweeper<R: RevocationStore + 'static> {
    store: Arc<R>,
    config: SweeperConfig,
}

impl<R: RevocationStore + 'static> RevocationSweeper<R> {
    /// Create a sweeper over the given store
    pub fn new(store: Arc<R>, config: SweeperConfig) -> Self {
        Self { store, config }
    }

    /// Run a single sweep pass
    ///
    /// # Returns
    /// The number of entries removed.
    pub async fn run_once(&self) -> DomainResult<usize> {
        let removed = self.store.sweep(Utc::now()).await?;

        if removed > 0 {
            info!(removed, "Swept expired revocation entries");
        }

        Ok(removed)
    }

    /// Spawn the periodic sweep loop
    ///
    /// A failed pass is logged and the loop keeps running; the next
    /// pass retries naturally.
    pub fn start_background_task(self: Arc<Self>) {
        if !self.config.enabled {
            warn!("Revocation sweeper is disabled");
            return;
        }

        let interval = Duration::from_secs(self.config.interval_seconds);
        info!(interval_seconds = self.config.interval_seconds, "Starting revocation sweeper");

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick fires immediately; skip it so startup is quiet.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                if let Err(e) = self.run_once().await {
                    error!("Revocation sweep failed: {e}");
                }
            }
        });
    }
}
