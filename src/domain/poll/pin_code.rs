//! Pin code value object and generator.
//!
//! Pin codes are the short tokens participants type to join a session.
//!
//! # Formats
//!
//! - `DigitPairs`: `DDD-DDD`, both groups in 100..=999 (e.g. `482-917`)
//! - `LettersDigits`: `LLL-DDD`, three uppercase ASCII letters then a group
//!   in 100..=999 (e.g. `QRT-504`)
//!
//! Codes are compared after trimming and ASCII upper-casing, so `qrt-504`
//! joins the same session as `QRT-504`.

use std::fmt;

use rand::Rng;
use serde::Serialize;

use super::PollError;

/// Layout of a pin code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinFormat {
    DigitPairs,
    LettersDigits,
}

impl PinFormat {
    /// Number of distinct codes the format can produce.
    pub fn capacity(&self) -> u64 {
        match self {
            PinFormat::DigitPairs => 900 * 900,
            PinFormat::LettersDigits => 26 * 26 * 26 * 900,
        }
    }

    /// Draws one candidate code.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PinCode {
        let tail: u16 = rng.gen_range(100..=999);
        let code = match self {
            PinFormat::DigitPairs => {
                let head: u16 = rng.gen_range(100..=999);
                format!("{}-{}", head, tail)
            }
            PinFormat::LettersDigits => {
                let head: String = (0..3)
                    .map(|_| char::from(b'A' + rng.gen_range(0..26u8)))
                    .collect();
                format!("{}-{}", head, tail)
            }
        };
        PinCode(code)
    }

    /// Checks whether a string is laid out in this format.
    pub fn matches(&self, code: &str) -> bool {
        let Some((head, tail)) = code.split_once('-') else {
            return false;
        };
        let head_ok = match self {
            PinFormat::DigitPairs => is_digit_group(head),
            PinFormat::LettersDigits => {
                head.len() == 3 && head.bytes().all(|b| b.is_ascii_uppercase())
            }
        };
        head_ok && is_digit_group(tail)
    }
}

fn is_digit_group(group: &str) -> bool {
    group.len() == 3 && group.bytes().all(|b| b.is_ascii_digit()) && !group.starts_with('0')
}

/// A join code handed out for one live session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PinCode(String);

impl PinCode {
    /// Normalizes user input for lookups.
    pub fn normalized(raw: &str) -> Self {
        Self(raw.trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PinCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Produces pin codes that are not assigned to any live session.
///
/// Generation does not reserve the code; the caller must insert it under
/// the same lock it used to answer `is_taken`.
#[derive(Debug, Clone)]
pub struct PinCodeGenerator {
    format: PinFormat,
    max_attempts: u32,
}

impl PinCodeGenerator {
    pub fn new(format: PinFormat, max_attempts: u32) -> Self {
        Self {
            format,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Draws codes until one is free.
    ///
    /// # Errors
    ///
    /// - `PinSpaceExhausted` after `max_attempts` collisions
    pub fn generate_unique<F>(&self, is_taken: F) -> Result<PinCode, PollError>
    where
        F: Fn(&PinCode) -> bool,
    {
        self.generate_with(&mut rand::thread_rng(), is_taken)
    }

    /// Same as [`generate_unique`](Self::generate_unique) with an explicit RNG.
    pub fn generate_with<R, F>(&self, rng: &mut R, is_taken: F) -> Result<PinCode, PollError>
    where
        R: Rng + ?Sized,
        F: Fn(&PinCode) -> bool,
    {
        for _ in 0..self.max_attempts {
            let candidate = self.format.sample(rng);
            if !is_taken(&candidate) {
                return Ok(candidate);
            }
        }
        tracing::error!(
            format = ?self.format,
            attempts = self.max_attempts,
            "pin code space exhausted"
        );
        Err(PollError::PinSpaceExhausted {
            attempts: self.max_attempts,
        })
    }
}
