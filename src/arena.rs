//! A thin, lock-guarded handle around a [`Scheduler`] for a multi-threaded
//! host.
//!
//! `Scheduler` itself is a plain `Send` struct with no internal
//! synchronization — mirroring how the teacher's `Interpreter<S>` leaves
//! locking to its caller. `Arena` is the one synchronized entry point a host
//! running the tick loop on a dedicated OS thread while handling inbound
//! connections on others would reach for.

use std::sync::{Mutex, MutexGuard};

use crate::config::ArenaConfig;
use crate::scheduler::Scheduler;

/// Owns a [`Scheduler`] behind a [`Mutex`].
#[derive(Debug)]
pub struct Arena {
    scheduler: Mutex<Scheduler>,
}

impl Arena {
    /// Builds an arena around a freshly constructed scheduler.
    pub fn new(config: ArenaConfig) -> Self {
        Self {
            scheduler: Mutex::new(Scheduler::new(config)),
        }
    }

    /// Locks the scheduler for exclusive access.
    ///
    /// Panics if the mutex is poisoned — a prior holder panicked mid-mutation
    /// and the scheduler's invariants can no longer be trusted.
    pub fn lock(&self) -> MutexGuard<'_, Scheduler> {
        self.scheduler.lock().expect("arena mutex poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Player;
    use crate::thread::Thread;

    #[test]
    fn lock_grants_exclusive_access_to_the_scheduler() {
        let arena = Arena::new(ArenaConfig::default());
        {
            let mut scheduler = arena.lock();
            scheduler.add_player(Player::new(0, "p", "tok", "#fff"));
            scheduler.spawn_new_thread(Thread::new(0, 0, 0), &mut ());
        }
        assert_eq!(arena.lock().live_thread_count(), 1);
    }
}
