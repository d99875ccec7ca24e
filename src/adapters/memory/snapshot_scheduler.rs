//! SnapshotScheduler - periodic history capture for poll sessions.
//!
//! Each session with history gets one tokio task that appends a snapshot
//! every `interval`, whether or not votes changed. The task only holds a
//! `Weak` reference to the session, so it ends by itself once the session
//! is dropped; `stop` aborts it immediately.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `interval` | 60s | Time between two scheduled snapshots |

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, warn};

use crate::domain::foundation::SessionId;
use crate::domain::poll::{PollSession, VoteChoice};

use super::lock;

/// Owns the recurring snapshot timers of one repository.
#[derive(Debug)]
pub struct SnapshotScheduler {
    interval: Duration,
    timers: Mutex<HashMap<SessionId, JoinHandle<()>>>,
}

impl SnapshotScheduler {
    /// Creates a scheduler; intervals below one second are raised to one second.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_secs(1)),
            timers: Mutex::new(HashMap::new()),
        }
    }

    /// Captures a snapshot now and arms the recurring timer.
    ///
    /// An existing timer for the same session is cancelled first. Without a
    /// tokio runtime only the immediate snapshot is taken.
    pub fn start<C: VoteChoice>(&self, session: &Arc<Mutex<PollSession<C>>>) {
        let id = {
            let mut guard = lock(session);
            Self::capture_now(&mut guard);
            *guard.id()
        };

        let runtime = match Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                warn!(session_id = %id, "no tokio runtime, periodic snapshots disabled");
                return;
            }
        };

        let weak = Arc::downgrade(session);
        let period = self.interval;
        let task = runtime.spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if !capture_scheduled(&weak) {
                    break;
                }
            }
        });

        if let Some(previous) = lock(&self.timers).insert(id, task) {
            previous.abort();
        }
    }

    /// Appends one snapshot of the session's current results.
    pub fn capture_now<C: VoteChoice>(session: &mut PollSession<C>) {
        session.capture_snapshot();
        debug!(
            session_id = %session.id(),
            kind = C::KIND,
            history_len = session.history().len(),
            "snapshot captured"
        );
    }

    /// Cancels the session's recurring timer.
    ///
    /// Returns `false` if no timer was armed.
    pub fn stop(&self, id: &SessionId) -> bool {
        match lock(&self.timers).remove(id) {
            Some(task) => {
                task.abort();
                true
            }
            None => false,
        }
    }

    /// Number of armed timers.
    pub fn active_timers(&self) -> usize {
        lock(&self.timers).len()
    }
}

impl Drop for SnapshotScheduler {
    fn drop(&mut self) {
        for (_, task) in lock(&self.timers).drain() {
            task.abort();
        }
    }
}

/// Runs one scheduled capture. Returns `false` once the session is gone.
fn capture_scheduled<C: VoteChoice>(weak: &Weak<Mutex<PollSession<C>>>) -> bool {
    match weak.upgrade() {
        Some(session) => {
            SnapshotScheduler::capture_now(&mut lock(&session));
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::VoterId;
    use crate::domain::poll::{MoodLevel, PinCode};

    fn shared_session() -> Arc<Mutex<PollSession<MoodLevel>>> {
        Arc::new(Mutex::new(PollSession::new(
            SessionId::new(),
            "Daily Check",
            PinCode::normalized("ABC-123"),
        )))
    }

    fn history_len(session: &Arc<Mutex<PollSession<MoodLevel>>>) -> usize {
        lock(session).history().len()
    }

    #[test]
    fn start_without_runtime_still_captures_initial_snapshot() {
        let scheduler = SnapshotScheduler::new(Duration::from_secs(60));
        let session = shared_session();

        scheduler.start(&session);

        assert_eq!(history_len(&session), 1);
        assert_eq!(scheduler.active_timers(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_append_snapshots_unconditionally() {
        let scheduler = SnapshotScheduler::new(Duration::from_secs(60));
        let session = shared_session();

        scheduler.start(&session);
        assert_eq!(history_len(&session), 1);

        time::sleep(Duration::from_secs(61)).await;
        assert_eq!(history_len(&session), 2);

        time::sleep(Duration::from_secs(60)).await;
        assert_eq!(history_len(&session), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn scheduled_snapshot_sees_latest_votes() {
        let scheduler = SnapshotScheduler::new(Duration::from_secs(60));
        let session = shared_session();
        scheduler.start(&session);

        lock(&session).cast_vote(VoterId::new("u1").unwrap(), MoodLevel::new(9).unwrap());
        time::sleep(Duration::from_secs(61)).await;

        let guard = lock(&session);
        let last = guard.history().last().unwrap();
        assert_eq!(last.results.total_votes, 1);
        assert_eq!(last.results.average_mood, 9.0);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_the_timer() {
        let scheduler = SnapshotScheduler::new(Duration::from_secs(60));
        let session = shared_session();
        scheduler.start(&session);

        assert!(scheduler.stop(session.lock().unwrap().id()));
        time::sleep(Duration::from_secs(200)).await;

        assert_eq!(history_len(&session), 1);
        assert_eq!(scheduler.active_timers(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn restarting_replaces_the_previous_timer() {
        let scheduler = SnapshotScheduler::new(Duration::from_secs(60));
        let session = shared_session();

        scheduler.start(&session);
        scheduler.start(&session);
        assert_eq!(history_len(&session), 2);
        assert_eq!(scheduler.active_timers(), 1);

        time::sleep(Duration::from_secs(61)).await;
        assert_eq!(history_len(&session), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn timer_ends_when_session_is_dropped() {
        let scheduler = SnapshotScheduler::new(Duration::from_secs(60));
        let session = shared_session();
        let id = *lock(&session).id();
        scheduler.start(&session);
        drop(session);

        time::sleep(Duration::from_secs(61)).await;

        let finished = lock(&scheduler.timers)
            .get(&id)
            .map(|task| task.is_finished())
            .unwrap_or(false);
        assert!(finished);
    }

    #[test]
    fn stop_unknown_session_returns_false() {
        let scheduler = SnapshotScheduler::new(Duration::from_secs(60));
        assert!(!scheduler.stop(&SessionId::new()));
    }
}
