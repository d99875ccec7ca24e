//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Returns the duration from another timestamp to this one.
    ///
    /// Returns negative duration if other is after self.
    pub fn duration_since(&self, other: &Timestamp) -> Duration {
        self.0.signed_duration_since(other.0)
    }

    /// Creates a new timestamp by subtracting the specified number of seconds.
    pub fn minus_secs(&self, secs: u64) -> Self {
        Self(self.0 - Duration::seconds(secs as i64))
    }

    /// RFC 3339 rendering used in exports.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339()
    }

    /// Filesystem-safe rendering, e.g. `2024-01-15_10-30-00`.
    pub fn to_file_stamp(&self) -> String {
        self.0.format("%Y-%m-%d_%H-%M-%S").to_string()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    fn fixed() -> Timestamp {
        let dt = DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        Timestamp::from_datetime(dt)
    }

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.as_datetime() >= &before);
        assert!(ts.as_datetime() <= &after);
    }

    #[test]
    fn timestamp_ordering_works() {
        let ts1 = Timestamp::now();
        sleep(std::time::Duration::from_millis(10));
        let ts2 = Timestamp::now();

        assert!(ts1.is_before(&ts2));
        assert!(ts1 < ts2);
    }

    #[test]
    fn minus_secs_moves_backwards() {
        let ts = fixed();
        let earlier = ts.minus_secs(90);
        assert_eq!(ts.duration_since(&earlier).num_seconds(), 90);
    }

    #[test]
    fn file_stamp_has_no_separators_unsafe_for_filenames() {
        assert_eq!(fixed().to_file_stamp(), "2024-01-15_10-30-00");
    }

    #[test]
    fn timestamp_serializes_to_json() {
        let json = serde_json::to_string(&fixed()).unwrap();
        assert!(json.contains("2024-01-15T10:30:00"));
    }
}
