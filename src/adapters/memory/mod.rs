//! In-memory adapters.
//!
//! Sessions live for the lifetime of the process (or until retired); there
//! is no persistence.

mod in_memory_poll_repository;
mod session_reaper;
mod snapshot_scheduler;

pub use in_memory_poll_repository::{InMemoryPollRepository, PollSettings};
pub use session_reaper::{SessionReaper, SessionReaperConfig};
pub use snapshot_scheduler::SnapshotScheduler;

use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

// A panic while holding one of these locks cannot leave the maps half
// updated, so poisoned guards are recovered instead of propagated.

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn read<T>(rw: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    rw.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(rw: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    rw.write().unwrap_or_else(PoisonError::into_inner)
}
