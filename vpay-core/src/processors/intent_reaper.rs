//! IntentReaper processor.
//!
//! Intents live in memory only. The reaper bounds that memory by evicting:
//! - `Created` intents that were never paid within `created_ttl`
//! - every other intent once it has been idle for `retention`
//!
//! Intents held by an in-flight verification are never evicted.

use crate::config::IntentConfig;
use crate::intent::{IntentState, IntentTracker, PaymentIntent};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::watch;
use tracing::{debug, info};

/// Whether `intent` should be evicted at `now`.
pub fn is_expired(intent: &PaymentIntent, now: OffsetDateTime, config: &IntentConfig) -> bool {
    match intent.state {
        IntentState::Created => now - intent.created_at >= config.created_ttl,
        _ => now - intent.updated_at >= config.retention,
    }
}

pub struct IntentReaper {
    tracker: Arc<IntentTracker>,
    config: IntentConfig,
    shutdown_rx: watch::Receiver<bool>,
}

impl IntentReaper {
    pub fn new(
        tracker: Arc<IntentTracker>,
        config: IntentConfig,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            tracker,
            config,
            shutdown_rx,
        }
    }

    /// Run one sweep. Returns the number of evicted intents.
    pub async fn sweep(&self) -> usize {
        let config = self.config;
        let evicted = self
            .tracker
            .evict_where(|intent, now| is_expired(intent, now, &config))
            .await;
        if evicted > 0 {
            let remaining = self.tracker.len().await;
            info!(evicted, remaining, "Evicted expired intents");
        } else {
            debug!("No expired intents");
        }
        evicted
    }

    /// Run the reaper until shutdown is signalled.
    pub async fn run(mut self) {
        info!(
            interval_secs = self.config.sweep_interval.as_secs(),
            "IntentReaper started"
        );

        loop {
            tokio::select! {
                biased;

                changed = self.shutdown_rx.changed() => {
                    if changed.is_err() || *self.shutdown_rx.borrow() {
                        info!("IntentReaper received shutdown signal");
                        break;
                    }
                }

                _ = tokio::time::sleep(self.config.sweep_interval) => {
                    self.sweep().await;
                }
            }
        }

        info!("IntentReaper shutdown complete");
    }
}
