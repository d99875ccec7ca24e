//! The option domain a poll is parameterized by.
//!
//! Both poll variants share one session aggregate and one repository; what
//! differs between them lives behind [`VoteChoice`]: the set of valid
//! values, how raw request values are validated, how votes are tallied,
//! the pin-code format, and whether the session keeps a snapshot history.

use std::fmt;
use std::hash::Hash;

use serde::Serialize;
use serde_json::Value;

use crate::domain::foundation::ValidationError;

use super::PinFormat;

/// A value a voter can pick in one poll variant.
pub trait VoteChoice:
    Copy + Eq + Hash + fmt::Debug + fmt::Display + Serialize + Send + Sync + 'static
{
    /// Aggregate derived from the current votes of a session.
    type Results: Tally + Clone + fmt::Debug + PartialEq + Serialize + Send + Sync + 'static;

    /// Short variant label used in logs.
    const KIND: &'static str;

    /// Name of the request field that carries the vote.
    const FIELD: &'static str;

    /// Format of join codes handed out for this variant.
    const PIN_FORMAT: PinFormat;

    /// Whether sessions of this variant keep a snapshot history.
    const RECORDS_HISTORY: bool;

    /// Validates a raw request value into a choice.
    fn parse(value: &Value) -> Result<Self, ValidationError>;

    /// Counts votes into the variant's results.
    ///
    /// Every option is present in the output, zero when nobody picked it.
    fn tally<'a, I>(votes: I) -> Self::Results
    where
        I: IntoIterator<Item = &'a Self>;
}

/// Tabular view of a results value, used by exports.
pub trait Tally {
    /// `(option label, vote count)` pairs in option order.
    fn counts(&self) -> Vec<(String, u32)>;

    /// Derived figures shown next to the counts.
    fn summary(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}
