//! Categorical profile voting (Explorer / Shopper / Vacationer / Prisoner).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use crate::domain::foundation::ValidationError;

use super::{PinFormat, Tally, VoteChoice};

/// One of the four retrospective profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Profile {
    Explorer,
    Shopper,
    Vacationer,
    Prisoner,
}

impl Profile {
    /// All profiles in display order.
    pub const ALL: [Profile; 4] = [
        Profile::Explorer,
        Profile::Shopper,
        Profile::Vacationer,
        Profile::Prisoner,
    ];

    /// Wire name of the profile.
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Explorer => "EXPLORER",
            Profile::Shopper => "SHOPPER",
            Profile::Vacationer => "VACATIONER",
            Profile::Prisoner => "PRISONER",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Profile {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Profile::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                ValidationError::invalid_format("profile", format!("unknown profile '{}'", wanted))
            })
    }
}

/// Vote counts per profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProfileResults(BTreeMap<Profile, u32>);

impl ProfileResults {
    /// Count for one profile.
    pub fn count(&self, profile: Profile) -> u32 {
        self.0.get(&profile).copied().unwrap_or(0)
    }

    /// Sum over all profiles.
    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }
}

impl Tally for ProfileResults {
    fn counts(&self) -> Vec<(String, u32)> {
        self.0.iter().map(|(p, n)| (p.to_string(), *n)).collect()
    }
}

impl VoteChoice for Profile {
    type Results = ProfileResults;

    const KIND: &'static str = "profile";
    const FIELD: &'static str = "profile";
    const PIN_FORMAT: PinFormat = PinFormat::DigitPairs;
    const RECORDS_HISTORY: bool = false;

    fn parse(value: &Value) -> Result<Self, ValidationError> {
        match value {
            Value::String(s) => s.parse(),
            other => Err(ValidationError::invalid_format(
                "profile",
                format!("expected a profile name, got {}", other),
            )),
        }
    }

    fn tally<'a, I>(votes: I) -> ProfileResults
    where
        I: IntoIterator<Item = &'a Self>,
    {
        let mut counts: BTreeMap<Profile, u32> = Profile::ALL.into_iter().map(|p| (p, 0)).collect();
        for profile in votes {
            *counts.entry(*profile).or_insert(0) += 1;
        }
        ProfileResults(counts)
    }
}
