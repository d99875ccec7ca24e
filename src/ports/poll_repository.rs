//! Poll repository port.
//!
//! Defines the contract the transport layer uses to drive one poll
//! variant. There is one repository instance per variant.
//!
//! # Design
//!
//! - **Synchronous**: every operation is a short critical section, nothing
//!   suspends mid-flight
//! - **Clone-out reads**: callers never hold repository locks; only
//!   `results` copies the snapshot history, everything else returns
//!   [`SessionInfo`]
//! - **No rename**: names are fixed at creation; `rename` always fails

use crate::domain::foundation::{SessionId, Timestamp, VoterId};
use crate::domain::poll::{PinCode, PollError, PollSession, Snapshot, VoteChoice, VoteOutcome};

/// Identity of a session, without votes or history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub id: SessionId,
    pub name: String,
    pub pin_code: PinCode,
    pub created_at: Timestamp,
}

impl SessionInfo {
    pub fn of<C: VoteChoice>(session: &PollSession<C>) -> Self {
        Self {
            id: *session.id(),
            name: session.name().to_string(),
            pin_code: session.pin_code().clone(),
            created_at: *session.created_at(),
        }
    }
}

/// Read model for the results endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsView<C: VoteChoice> {
    pub id: SessionId,
    pub name: String,
    pub created_at: Timestamp,
    pub current: C::Results,
    pub history: Vec<Snapshot<C::Results>>,
}

impl<C: VoteChoice> ResultsView<C> {
    /// Builds the view from a session's current state.
    pub fn of(session: &PollSession<C>) -> Self {
        Self {
            id: *session.id(),
            name: session.name().to_string(),
            created_at: *session.created_at(),
            current: session.results(),
            history: session.history().to_vec(),
        }
    }
}

/// Retirement hook shared by all poll variants.
///
/// Split from [`PollRepository`] so one reaper can sweep repositories of
/// different choice types.
pub trait SessionRetirement: Send + Sync {
    /// Variant label for logs.
    fn kind(&self) -> &'static str;

    /// Retires every session created strictly before `cutoff`.
    ///
    /// Returns how many sessions were retired.
    fn retire_created_before(&self, cutoff: Timestamp) -> usize;
}

/// Repository port for one poll variant.
pub trait PollRepository<C: VoteChoice>: SessionRetirement {
    /// Creates a session with a fresh id and a unique pin code.
    ///
    /// # Errors
    ///
    /// - `PinSpaceExhausted` if no free pin code could be found
    fn create_session(&self, name: &str) -> Result<SessionInfo, PollError>;

    /// Find a session by its ID.
    ///
    /// Returns `None` if not found.
    fn find_by_id(&self, id: &SessionId) -> Option<SessionInfo>;

    /// Find a session by its join code (case-insensitive).
    fn find_by_pin_code(&self, pin_code: &str) -> Option<SessionInfo>;

    /// Records or replaces the voter's choice.
    ///
    /// Variants that record history capture a snapshot when the vote is
    /// new or differs from the voter's previous choice.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the session doesn't exist
    fn record_vote(
        &self,
        id: &SessionId,
        voter: VoterId,
        choice: C,
    ) -> Result<VoteOutcome, PollError>;

    /// Current results and history of a session.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the session doesn't exist
    fn results(&self, id: &SessionId) -> Result<ResultsView<C>, PollError>;

    /// Session names are immutable; this always fails, whether or not the
    /// session exists.
    fn rename(&self, _id: &str, _new_name: &str) -> Result<(), PollError> {
        Err(PollError::RenameUnsupported)
    }

    /// Removes a session and stops its background work.
    ///
    /// Its pin code becomes available again.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the session doesn't exist
    fn retire_session(&self, id: &SessionId) -> Result<(), PollError>;

    /// Number of live sessions.
    fn session_count(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::poll::{MoodLevel, Profile};

    #[test]
    fn poll_repository_is_object_safe() {
        fn _accepts_profile(_repo: &dyn PollRepository<Profile>) {}
        fn _accepts_mood(_repo: &dyn PollRepository<MoodLevel>) {}
        fn _accepts_retirement(_repo: &dyn SessionRetirement) {}
    }
}
