//! `YEETCALL`: the four syscalls, dispatched on `xd`, with their arguments
//! and return value carried in `dx`.

use crate::consts::{LOCATE_NEAREST_MAX_DISTANCE, SYSCALL_ERROR_WORD};
use crate::player::PlayerId;
use crate::scheduler::Scheduler;
use crate::thread::Thread;

#[cfg(feature = "random")]
use crate::consts::LOCATE_RANDOM_MAX_DISTANCE;
#[cfg(feature = "random")]
use rand::Rng;

impl Scheduler {
    /// Dispatches on `thread.xd()`; an unrecognized syscall number writes
    /// the `"teey"` failure sentinel to `dx` rather than crashing.
    pub(super) fn syscall_handler(&mut self, thread: &mut Thread) {
        match thread.xd() {
            1 => self.transfer_ownership(thread),
            2 => self.locate_nearest_thread(thread),
            3 => self.locate_random_thread(thread),
            4 => self.random_int(thread),
            _ => thread.set_dx(SYSCALL_ERROR_WORD),
        }
    }

    /// `dx` names the target player. Succeeds only if that player is known
    /// and owns fewer than `⌊1.5·max_processes⌋` threads already.
    fn transfer_ownership(&mut self, thread: &mut Thread) {
        let target: PlayerId = thread.dx().into();
        let cap = self.config.transfer_process_cap();

        let eligible = self.players.get(target).map(|p| p.thread_count() < cap).unwrap_or(false);

        if !eligible {
            thread.set_dx(SYSCALL_ERROR_WORD);
            return;
        }

        if let Some(previous) = self.players.get_mut(thread.owner()) {
            previous.remove_thread(thread.id());
        }

        thread.set_owner(target);

        if let Some(new_owner) = self.players.get_mut(target) {
            new_owner.push_thread(thread.id());
        }
    }

    /// Writes the `pc` of the closest thread not owned by `thread`, within
    /// [`LOCATE_NEAREST_MAX_DISTANCE`], to `dx`. A thread with no eligible
    /// neighbor gets the failure sentinel, not a stale zero.
    fn locate_nearest_thread(&mut self, thread: &mut Thread) {
        let mut best: Option<(u32, usize)> = None;

        for other in self.current_pool.iter().chain(self.next_pool.iter()) {
            if other.owner() == thread.owner() {
                continue;
            }

            let distance = thread.pc().abs_diff(other.pc()) as u32;
            if distance > LOCATE_NEAREST_MAX_DISTANCE {
                continue;
            }

            let is_closer = match best {
                Some((best_distance, _)) => distance < best_distance,
                None => true,
            };

            if is_closer {
                best = Some((distance, other.pc()));
            }
        }

        match best {
            Some((_, pc)) => thread.set_dx(pc as u32),
            None => thread.set_dx(SYSCALL_ERROR_WORD),
        }
    }

    /// Writes the `pc` of a uniformly-chosen thread within
    /// [`LOCATE_RANDOM_MAX_DISTANCE`] (the caller itself is eligible) to
    /// `dx`. Requires the `random` feature; writes the failure sentinel
    /// without it.
    #[cfg(feature = "random")]
    fn locate_random_thread(&mut self, thread: &mut Thread) {
        let candidates: Vec<usize> = self
            .current_pool
            .iter()
            .chain(self.next_pool.iter())
            .map(Thread::pc)
            .chain(std::iter::once(thread.pc()))
            .filter(|&pc| thread.pc().abs_diff(pc) as u32 <= LOCATE_RANDOM_MAX_DISTANCE)
            .collect();

        let pc = candidates[self.rng.gen_range(0..candidates.len())];
        thread.set_dx(pc as u32);
    }

    #[cfg(not(feature = "random"))]
    fn locate_random_thread(&mut self, thread: &mut Thread) {
        thread.set_dx(SYSCALL_ERROR_WORD);
    }

    /// Writes a uniformly-chosen `u32` (the full `[0, WORD_MAX)` range) to
    /// `dx`. Requires the `random` feature.
    #[cfg(feature = "random")]
    fn random_int(&mut self, thread: &mut Thread) {
        let value: u32 = self.rng.gen();
        thread.set_dx(value);
    }

    #[cfg(not(feature = "random"))]
    fn random_int(&mut self, thread: &mut Thread) {
        thread.set_dx(SYSCALL_ERROR_WORD);
    }
}
