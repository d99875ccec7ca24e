//! Timestamped results captured into a session's history.

use serde::Serialize;

use crate::domain::foundation::Timestamp;

/// Immutable copy of a session's results at one instant.
///
/// Serializes flat: `{"timestamp": ..., <result fields>}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot<R> {
    pub timestamp: Timestamp,
    #[serde(flatten)]
    pub results: R,
}

impl<R> Snapshot<R> {
    pub fn new(timestamp: Timestamp, results: R) -> Self {
        Self { timestamp, results }
    }
}
