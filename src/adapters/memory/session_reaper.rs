//! SessionReaper - Background service that retires old sessions.
//!
//! Sessions otherwise live until the process exits, and mood sessions keep
//! a snapshot timer running the whole time. The reaper periodically retires
//! every session older than `max_age` across all registered repositories.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `max_age` | 24h | Sessions created longer ago are retired |
//! | `sweep_interval` | 5min | How often to sweep |
//!
//! ## Graceful Shutdown
//!
//! The service listens on a `watch` channel and stops after the current
//! sweep when `true` is sent or the sender is dropped.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;
use tracing::{debug, info};

use crate::domain::foundation::Timestamp;
use crate::ports::SessionRetirement;

/// Configuration for the SessionReaper service.
#[derive(Debug, Clone)]
pub struct SessionReaperConfig {
    /// Sessions older than this are retired.
    pub max_age: Duration,

    /// How often to sweep.
    pub sweep_interval: Duration,
}

impl Default for SessionReaperConfig {
    fn default() -> Self {
        Self {
            max_age: Duration::from_secs(24 * 60 * 60),
            sweep_interval: Duration::from_secs(5 * 60),
        }
    }
}

impl SessionReaperConfig {
    /// Create config with custom maximum session age.
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// Create config with custom sweep interval.
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }
}

/// Background service that retires sessions past their maximum age.
pub struct SessionReaper {
    targets: Vec<Arc<dyn SessionRetirement>>,
    config: SessionReaperConfig,
}

impl SessionReaper {
    pub fn new(targets: Vec<Arc<dyn SessionRetirement>>, config: SessionReaperConfig) -> Self {
        Self { targets, config }
    }

    /// Run the sweep loop until shutdown signal is received.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.config.sweep_interval.max(Duration::from_secs(1)));
        info!(
            max_age_secs = self.config.max_age.as_secs(),
            sweep_interval_secs = self.config.sweep_interval.as_secs(),
            "session reaper started"
        );

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("session reaper stopped");
                        return;
                    }
                }

                _ = interval.tick() => {
                    self.sweep();
                }
            }
        }
    }

    /// Retires every session older than `max_age`. Returns how many went.
    pub fn sweep(&self) -> usize {
        let cutoff = Timestamp::now().minus_secs(self.config.max_age.as_secs());
        let mut total = 0;
        for target in &self.targets {
            let retired = target.retire_created_before(cutoff);
            if retired > 0 {
                info!(kind = target.kind(), retired, "retired expired sessions");
            }
            total += retired;
        }
        debug!(total, "reaper sweep finished");
        total
    }
}
