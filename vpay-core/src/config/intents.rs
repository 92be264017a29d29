//! Intent retention settings.

use std::time::Duration;

/// How long intents are kept in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntentConfig {
    /// `Created` intents older than this are considered abandoned.
    pub created_ttl: Duration,
    /// Intents past creation are kept this long after their last change.
    pub retention: Duration,
    /// Interval between reaper sweeps.
    pub sweep_interval: Duration,
}

impl Default for IntentConfig {
    fn default() -> Self {
        Self {
            created_ttl: Duration::from_secs(60 * 60),
            retention: Duration::from_secs(24 * 60 * 60),
            sweep_interval: Duration::from_secs(60),
        }
    }
}
