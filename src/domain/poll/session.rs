//! Poll session aggregate.
//!
//! A session is one voting round. Its identity (id, name, pin code) is
//! fixed when it is created; only the votes and, for variants that record
//! history, the snapshot log change afterwards.

use std::collections::HashMap;

use crate::domain::foundation::{SessionId, Timestamp, VoterId};

use super::{PinCode, Snapshot, VoteChoice};

/// What recording a vote did to the voter's previous choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    /// First vote from this voter.
    New,
    /// The voter switched to a different option.
    Changed,
    /// The voter re-submitted the same option.
    Unchanged,
}

impl VoteOutcome {
    /// True when the tally may have moved.
    pub fn is_change(&self) -> bool {
        !matches!(self, VoteOutcome::Unchanged)
    }
}

/// Session aggregate for one poll variant.
///
/// # Invariants
///
/// - At most one vote per voter; a later vote replaces the earlier one
/// - `history` only grows, in capture order
#[derive(Debug, Clone)]
pub struct PollSession<C: VoteChoice> {
    id: SessionId,
    name: String,
    pin_code: PinCode,
    votes: HashMap<VoterId, C>,
    created_at: Timestamp,
    history: Vec<Snapshot<C::Results>>,
}

impl<C: VoteChoice> PollSession<C> {
    /// Creates an empty session.
    pub fn new(id: SessionId, name: impl Into<String>, pin_code: PinCode) -> Self {
        Self {
            id,
            name: name.into(),
            pin_code,
            votes: HashMap::new(),
            created_at: Timestamp::now(),
            history: Vec::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pin_code(&self) -> &PinCode {
        &self.pin_code
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// The voter's current choice, if any.
    pub fn vote_of(&self, voter: &VoterId) -> Option<C> {
        self.votes.get(voter).copied()
    }

    /// Number of distinct voters.
    pub fn vote_count(&self) -> usize {
        self.votes.len()
    }

    pub fn history(&self) -> &[Snapshot<C::Results>] {
        &self.history
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Records or replaces a voter's choice.
    pub fn cast_vote(&mut self, voter: VoterId, choice: C) -> VoteOutcome {
        match self.votes.insert(voter, choice) {
            None => VoteOutcome::New,
            Some(previous) if previous == choice => VoteOutcome::Unchanged,
            Some(_) => VoteOutcome::Changed,
        }
    }

    /// Appends the current results to the history and returns the entry.
    pub fn capture_snapshot(&mut self) -> &Snapshot<C::Results> {
        let snapshot = Snapshot::new(Timestamp::now(), self.results());
        self.history.push(snapshot);
        &self.history[self.history.len() - 1]
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Current aggregate of the votes.
    pub fn results(&self) -> C::Results {
        C::tally(self.votes.values())
    }
}
