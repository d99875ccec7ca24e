//! Poll module - sessions, option domains and their aggregates.
//!
//! # Variants
//!
//! - [`Profile`] - categorical vote over four profiles, `DDD-DDD` pins
//! - [`MoodLevel`] - 1-10 mood vote with snapshot history, `LLL-DDD` pins
//!
//! Both run through the same [`PollSession`] aggregate; variant behaviour
//! is selected by the [`VoteChoice`] implementation.

mod choice;
mod errors;
mod mood;
mod pin_code;
mod profile;
mod session;
mod snapshot;

pub use choice::{Tally, VoteChoice};
pub use errors::PollError;
pub use mood::{MoodLevel, MoodResults};
pub use pin_code::{PinCode, PinCodeGenerator, PinFormat};
pub use profile::{Profile, ProfileResults};
pub use session::{PollSession, VoteOutcome};
pub use snapshot::Snapshot;
