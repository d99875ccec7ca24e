//! Polling configuration: snapshot cadence, pin generation and retirement.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::memory::{PollSettings, SessionReaperConfig};

/// Polling configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PollingConfig {
    /// Seconds between periodic snapshots of mood sessions
    #[serde(default = "default_snapshot_interval")]
    pub snapshot_interval_secs: u64,

    /// Pin draws allowed per session creation before giving up
    #[serde(default = "default_pin_max_attempts")]
    pub pin_max_attempts: u32,

    /// Sessions older than this are retired; unset keeps them forever
    pub session_max_age_secs: Option<u64>,

    /// Seconds between retirement sweeps
    #[serde(default = "default_reaper_interval")]
    pub reaper_interval_secs: u64,
}

impl PollingConfig {
    /// Repository settings derived from this section.
    pub fn poll_settings(&self) -> PollSettings {
        PollSettings {
            snapshot_interval: Duration::from_secs(self.snapshot_interval_secs),
            pin_max_attempts: self.pin_max_attempts,
        }
    }

    /// Reaper settings, present only when a maximum age is configured.
    pub fn reaper_config(&self) -> Option<SessionReaperConfig> {
        self.session_max_age_secs.map(|max_age| {
            SessionReaperConfig::default()
                .with_max_age(Duration::from_secs(max_age))
                .with_sweep_interval(Duration::from_secs(self.reaper_interval_secs))
        })
    }

    /// Validate polling configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.snapshot_interval_secs == 0 {
            return Err(ValidationError::InvalidSnapshotInterval);
        }
        if self.pin_max_attempts == 0 {
            return Err(ValidationError::InvalidPinAttempts);
        }
        if self.session_max_age_secs == Some(0) {
            return Err(ValidationError::InvalidSessionMaxAge);
        }
        if self.reaper_interval_secs == 0 {
            return Err(ValidationError::InvalidReaperInterval);
        }
        Ok(())
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            snapshot_interval_secs: default_snapshot_interval(),
            pin_max_attempts: default_pin_max_attempts(),
            session_max_age_secs: None,
            reaper_interval_secs: default_reaper_interval(),
        }
    }
}

fn default_snapshot_interval() -> u64 {
    60
}

fn default_pin_max_attempts() -> u32 {
    10_000
}

fn default_reaper_interval() -> u64 {
    300
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polling_config_defaults() {
        let config = PollingConfig::default();
        assert_eq!(config.snapshot_interval_secs, 60);
        assert_eq!(config.pin_max_attempts, 10_000);
        assert!(config.session_max_age_secs.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_poll_settings_conversion() {
        let config = PollingConfig {
            snapshot_interval_secs: 5,
            pin_max_attempts: 42,
            ..Default::default()
        };
        let settings = config.poll_settings();
        assert_eq!(settings.snapshot_interval, Duration::from_secs(5));
        assert_eq!(settings.pin_max_attempts, 42);
    }

    #[test]
    fn test_reaper_disabled_without_max_age() {
        assert!(PollingConfig::default().reaper_config().is_none());
    }

    #[test]
    fn test_reaper_config_from_max_age() {
        let config = PollingConfig {
            session_max_age_secs: Some(3600),
            reaper_interval_secs: 120,
            ..Default::default()
        };
        let reaper = config.reaper_config().unwrap();
        assert_eq!(reaper.max_age, Duration::from_secs(3600));
        assert_eq!(reaper.sweep_interval, Duration::from_secs(120));
    }

    #[test]
    fn test_validation_rejects_zero_values() {
        let zero_interval = PollingConfig {
            snapshot_interval_secs: 0,
            ..Default::default()
        };
        assert_eq!(
            zero_interval.validate(),
            Err(ValidationError::InvalidSnapshotInterval)
        );

        let zero_attempts = PollingConfig {
            pin_max_attempts: 0,
            ..Default::default()
        };
        assert_eq!(
            zero_attempts.validate(),
            Err(ValidationError::InvalidPinAttempts)
        );

        let zero_age = PollingConfig {
            session_max_age_secs: Some(0),
            ..Default::default()
        };
        assert_eq!(zero_age.validate(), Err(ValidationError::InvalidSessionMaxAge));
    }
}
