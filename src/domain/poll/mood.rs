//! Mood voting on a 1-10 scale.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::domain::foundation::ValidationError;

use super::{PinFormat, Tally, VoteChoice};

/// A mood level between [`MoodLevel::MIN`] and [`MoodLevel::MAX`] inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "u8")]
pub struct MoodLevel(u8);

impl MoodLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Creates a level, rejecting values outside 1..=10.
    pub fn new(level: i64) -> Result<Self, ValidationError> {
        if level < Self::MIN as i64 || level > Self::MAX as i64 {
            return Err(ValidationError::out_of_range(
                "level",
                Self::MIN as i64,
                Self::MAX as i64,
                level,
            ));
        }
        Ok(Self(level as u8))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Every level, lowest first.
    pub fn all() -> impl Iterator<Item = MoodLevel> {
        (Self::MIN..=Self::MAX).map(MoodLevel)
    }
}

impl From<MoodLevel> for u8 {
    fn from(level: MoodLevel) -> Self {
        level.0
    }
}

impl fmt::Display for MoodLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mood aggregate: counts per level plus the rounded average.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodResults {
    pub results: BTreeMap<u8, u32>,
    pub average_mood: f64,
    pub total_votes: u32,
}

impl MoodResults {
    pub fn count(&self, level: MoodLevel) -> u32 {
        self.results.get(&level.value()).copied().unwrap_or(0)
    }
}

impl Tally for MoodResults {
    fn counts(&self) -> Vec<(String, u32)> {
        self.results.iter().map(|(l, n)| (l.to_string(), *n)).collect()
    }

    fn summary(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Average Mood", format!("{:.2}", self.average_mood)),
            ("Total Votes", self.total_votes.to_string()),
        ]
    }
}

impl VoteChoice for MoodLevel {
    type Results = MoodResults;

    const KIND: &'static str = "mood";
    const FIELD: &'static str = "level";
    const PIN_FORMAT: PinFormat = PinFormat::LettersDigits;
    const RECORDS_HISTORY: bool = true;

    /// Accepts JSON integers and integer strings such as `"7"`.
    fn parse(value: &Value) -> Result<Self, ValidationError> {
        let level = match value {
            Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => i,
                (None, Some(f)) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => f as i64,
                _ => return Err(not_an_integer(value)),
            },
            Value::String(s) => s.trim().parse::<i64>().map_err(|_| not_an_integer(value))?,
            _ => return Err(not_an_integer(value)),
        };
        Self::new(level)
    }

    fn tally<'a, I>(votes: I) -> MoodResults
    where
        I: IntoIterator<Item = &'a Self>,
    {
        let mut results: BTreeMap<u8, u32> = MoodLevel::all().map(|l| (l.value(), 0)).collect();
        let mut sum: u64 = 0;
        let mut total: u32 = 0;
        for level in votes {
            *results.entry(level.value()).or_insert(0) += 1;
            sum += u64::from(level.value());
            total += 1;
        }

        let average_mood = if total == 0 {
            0.0
        } else {
            round2(sum as f64 / f64::from(total))
        };

        MoodResults {
            results,
            average_mood,
            total_votes: total,
        }
    }
}

fn not_an_integer(value: &Value) -> ValidationError {
    ValidationError::invalid_format(
        "level",
        format!("expected an integer between 1 and 10, got {}", value),
    )
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
