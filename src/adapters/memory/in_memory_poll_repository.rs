//! In-memory poll repository.
//!
//! One generic implementation serves every poll variant. Two indexes
//! (by id, by pin code) sit behind a single `RwLock`; each session sits
//! behind its own `Mutex`, so votes on different sessions never contend
//! and votes on one session are applied one at a time.
//!
//! Lock order is always indexes first, then a session. No code path takes
//! the index lock while holding a session lock.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use tracing::{debug, info};

use crate::domain::foundation::{SessionId, Timestamp, VoterId};
use crate::domain::poll::{
    PinCode, PinCodeGenerator, PollError, PollSession, VoteChoice, VoteOutcome,
};
use crate::ports::{PollRepository, ResultsView, SessionInfo, SessionRetirement};

use super::{lock, read, write, SnapshotScheduler};

type SharedSession<C> = Arc<Mutex<PollSession<C>>>;

/// Tunables for an in-memory repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// Time between two scheduled snapshots.
    pub snapshot_interval: Duration,
    /// Collisions tolerated before pin generation gives up.
    pub pin_max_attempts: u32,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            snapshot_interval: Duration::from_secs(60),
            pin_max_attempts: 10_000,
        }
    }
}

struct Indexes<C: VoteChoice> {
    sessions: HashMap<SessionId, SharedSession<C>>,
    by_pin: HashMap<PinCode, SessionId>,
}

/// Process-local repository for one poll variant.
pub struct InMemoryPollRepository<C: VoteChoice> {
    indexes: RwLock<Indexes<C>>,
    pins: PinCodeGenerator,
    scheduler: SnapshotScheduler,
    _choice: PhantomData<fn() -> C>,
}

impl<C: VoteChoice> InMemoryPollRepository<C> {
    pub fn new(settings: PollSettings) -> Self {
        Self {
            indexes: RwLock::new(Indexes {
                sessions: HashMap::new(),
                by_pin: HashMap::new(),
            }),
            pins: PinCodeGenerator::new(C::PIN_FORMAT, settings.pin_max_attempts),
            scheduler: SnapshotScheduler::new(settings.snapshot_interval),
            _choice: PhantomData,
        }
    }

    /// Repository with default settings.
    pub fn with_defaults() -> Self {
        Self::new(PollSettings::default())
    }

    /// Number of armed snapshot timers.
    pub fn active_timers(&self) -> usize {
        self.scheduler.active_timers()
    }

    fn shared(&self, id: &SessionId) -> Option<SharedSession<C>> {
        read(&self.indexes).sessions.get(id).cloned()
    }

    /// Starts the snapshot timer, then cancels it again if the session was
    /// retired in the meantime, so no timer outlives its session.
    fn arm_timer(&self, id: &SessionId, session: &SharedSession<C>) {
        self.scheduler.start(session);
        if !read(&self.indexes).sessions.contains_key(id) {
            self.scheduler.stop(id);
        }
    }

    fn detach(&self, id: &SessionId) -> Option<SharedSession<C>> {
        let mut indexes = write(&self.indexes);
        let session = indexes.sessions.remove(id)?;
        let pin = lock(&session).pin_code().clone();
        indexes.by_pin.remove(&pin);
        Some(session)
    }
}

impl<C: VoteChoice> Default for InMemoryPollRepository<C> {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl<C: VoteChoice> SessionRetirement for InMemoryPollRepository<C> {
    fn kind(&self) -> &'static str {
        C::KIND
    }

    fn retire_created_before(&self, cutoff: Timestamp) -> usize {
        let stale: Vec<SessionId> = read(&self.indexes)
            .sessions
            .iter()
            .filter(|(_, session)| lock(session).created_at().is_before(&cutoff))
            .map(|(id, _)| *id)
            .collect();

        stale
            .iter()
            .filter(|id| self.retire_session(id).is_ok())
            .count()
    }
}

impl<C: VoteChoice> PollRepository<C> for InMemoryPollRepository<C> {
    fn create_session(&self, name: &str) -> Result<SessionInfo, PollError> {
        let shared = {
            let mut indexes = write(&self.indexes);
            let pin = self
                .pins
                .generate_unique(|candidate| indexes.by_pin.contains_key(candidate))?;

            let session = PollSession::new(SessionId::new(), name, pin.clone());
            let id = *session.id();
            let shared = Arc::new(Mutex::new(session));
            indexes.by_pin.insert(pin, id);
            indexes.sessions.insert(id, Arc::clone(&shared));
            shared
        };

        let info = SessionInfo::of(&*lock(&shared));
        if C::RECORDS_HISTORY {
            self.arm_timer(&info.id, &shared);
        }

        info!(
            session_id = %info.id,
            kind = C::KIND,
            pin_code = %info.pin_code,
            "session created"
        );
        Ok(info)
    }

    fn find_by_id(&self, id: &SessionId) -> Option<SessionInfo> {
        self.shared(id).map(|session| SessionInfo::of(&*lock(&session)))
    }

    fn find_by_pin_code(&self, pin_code: &str) -> Option<SessionInfo> {
        let pin = PinCode::normalized(pin_code);
        let session = {
            let indexes = read(&self.indexes);
            let id = indexes.by_pin.get(&pin)?;
            indexes.sessions.get(id).cloned()?
        };
        let found = SessionInfo::of(&*lock(&session));
        Some(found)
    }

    fn record_vote(
        &self,
        id: &SessionId,
        voter: VoterId,
        choice: C,
    ) -> Result<VoteOutcome, PollError> {
        let session = self.shared(id).ok_or_else(|| PollError::not_found(id))?;
        let mut guard = lock(&session);

        let outcome = guard.cast_vote(voter, choice);
        debug!(
            session_id = %id,
            kind = C::KIND,
            choice = %choice,
            outcome = ?outcome,
            "vote recorded"
        );

        if C::RECORDS_HISTORY && outcome.is_change() {
            SnapshotScheduler::capture_now(&mut guard);
        }

        Ok(outcome)
    }

    fn results(&self, id: &SessionId) -> Result<ResultsView<C>, PollError> {
        let session = self.shared(id).ok_or_else(|| PollError::not_found(id))?;
        let guard = lock(&session);
        Ok(ResultsView::of(&guard))
    }

    fn retire_session(&self, id: &SessionId) -> Result<(), PollError> {
        self.detach(id).ok_or_else(|| PollError::not_found(id))?;
        self.scheduler.stop(id);
        info!(session_id = %id, kind = C::KIND, "session retired");
        Ok(())
    }

    fn session_count(&self) -> usize {
        read(&self.indexes).sessions.len()
    }
}
