//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid bind address: {0}")]
    InvalidAddress(String),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout (must be 1..=300 seconds)")]
    InvalidTimeout,

    #[error("Snapshot interval must be at least one second")]
    InvalidSnapshotInterval,

    #[error("Pin generation needs at least one attempt")]
    InvalidPinAttempts,

    #[error("Session max age must be at least one second")]
    InvalidSessionMaxAge,

    #[error("Reaper interval must be at least one second")]
    InvalidReaperInterval,
}
