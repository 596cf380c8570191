//! The two-pool tick scheduler: owns the core, the players, and every live
//! thread, and drives execution one instruction (or one tick) at a time.

use std::collections::VecDeque;
use std::time::Duration;

#[cfg(feature = "random")]
use rand::SeedableRng;

use crate::config::ArenaConfig;
use crate::core_memory::Core;
use crate::error::SchedulerError;
use crate::events::EventSink;
use crate::player::{Player, PlayerId, PlayerRegistry};
use crate::thread::Thread;

mod interpreter;

/// Owns the arena's entire mutable state: the core, the players, and the two
/// thread pools (`current`, executing this tick, and `next`, queued for the
/// one after).
///
/// A thread popped from `current` is re-queued onto `next` unless it crashes
/// or jumps (a jump re-queues itself, at its new `pc`); when `current` runs
/// dry, `next` becomes `current` and `tick_count` advances.
#[derive(Debug, Clone)]
pub struct Scheduler {
    core: Core,
    players: PlayerRegistry,
    config: ArenaConfig,
    current_pool: VecDeque<Thread>,
    next_pool: VecDeque<Thread>,
    tick_count: u64,
    thread_counter: u64,
    #[cfg(feature = "random")]
    rng: rand::rngs::StdRng,
}

impl Scheduler {
    /// Builds an empty scheduler: no players, no threads, a freshly zeroed core.
    pub fn new(config: ArenaConfig) -> Self {
        Self {
            core: Core::new(config.core_size),
            players: PlayerRegistry::new(),
            config,
            current_pool: VecDeque::new(),
            next_pool: VecDeque::new(),
            tick_count: 0,
            thread_counter: 0,
            #[cfg(feature = "random")]
            rng: rand::rngs::StdRng::from_entropy(),
        }
    }

    /// The core memory.
    pub fn core(&self) -> &Core {
        &self.core
    }

    /// The core memory, mutably. Intended for host-side seeding before the
    /// arena starts running; the interpreter mutates it through its own path.
    pub fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    /// The player registry.
    pub fn players(&self) -> &PlayerRegistry {
        &self.players
    }

    /// The player registry, mutably.
    pub fn players_mut(&mut self) -> &mut PlayerRegistry {
        &mut self.players
    }

    /// The arena's configuration.
    pub const fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Number of ticks completed so far.
    pub const fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Number of threads waiting across both pools.
    pub fn live_thread_count(&self) -> usize {
        self.current_pool.len() + self.next_pool.len()
    }

    /// Every live thread, across both pools, in no particular cross-pool
    /// order. Intended for spectator snapshots and test assertions; the
    /// interpreter itself only ever looks at one pool at a time.
    pub fn threads(&self) -> impl Iterator<Item = &Thread> {
        self.current_pool.iter().chain(self.next_pool.iter())
    }

    /// Looks up a single live thread by id across both pools.
    pub fn thread(&self, id: u64) -> Option<&Thread> {
        self.threads().find(|t| t.id() == id)
    }

    /// Registers a player. Returns `false` if `player.id()` is already taken.
    pub fn add_player(&mut self, player: Player) -> bool {
        self.players.add(player)
    }

    fn next_thread_id(&mut self) -> u64 {
        let id = self.thread_counter;
        self.thread_counter += 1;
        id
    }

    /// Assigns `thread` a fresh id, registers it with its owner, and queues
    /// it onto the current pool.
    pub fn spawn_new_thread(&mut self, mut thread: Thread, sink: &mut impl EventSink) -> u64 {
        let id = self.next_thread_id();
        thread.set_id(id);

        if let Some(owner) = self.players.get_mut(thread.owner()) {
            owner.push_thread(id);
        }

        sink.update_thread(thread.id(), thread.pc(), thread.owner());
        self.current_pool.push_back(thread);
        id
    }

    /// Removes a thread by id from whichever pool holds it, and drops it
    /// from its owner's thread list.
    ///
    /// Errs if no thread with this id is scheduled; the host asked to kill
    /// something that isn't there.
    pub fn kill_thread(&mut self, id: u64, sink: &mut impl EventSink) -> Result<(), SchedulerError> {
        let removed = Self::take_from_pool(&mut self.current_pool, id).or_else(|| Self::take_from_pool(&mut self.next_pool, id));

        let Some(thread) = removed else {
            return Err(SchedulerError::ThreadNotFound { id });
        };

        if let Some(owner) = self.players.get_mut(thread.owner()) {
            owner.remove_thread(id);
        }

        sink.kill_thread(id);
        Ok(())
    }

    fn take_from_pool(pool: &mut VecDeque<Thread>, id: u64) -> Option<Thread> {
        let pos = pool.iter().position(|t| t.id() == id)?;
        pool.remove(pos)
    }

    /// Kills `player_id`'s oldest live thread, if it has one. A no-op if the
    /// player has no threads or isn't registered.
    pub fn kill_oldest_thread(&mut self, player_id: PlayerId, sink: &mut impl EventSink) {
        let oldest = self.players.get_mut(player_id).and_then(Player::pop_oldest_thread);

        if let Some(id) = oldest {
            let removed = Self::take_from_pool(&mut self.current_pool, id).or_else(|| Self::take_from_pool(&mut self.next_pool, id));
            if removed.is_some() {
                sink.kill_thread(id);
            }
        }
    }

    fn swap_pools(&mut self) {
        std::mem::swap(&mut self.current_pool, &mut self.next_pool);
        self.tick_count += 1;
    }

    /// Executes a single instruction.
    ///
    /// If the current pool is empty, first swaps in the next pool and
    /// advances `tick_count`; if both pools are empty, this is a no-op.
    pub fn step(&mut self, sink: &mut impl EventSink) {
        if self.current_pool.is_empty() {
            if self.next_pool.is_empty() {
                return;
            }
            self.swap_pools();
        }

        if let Some(thread) = self.current_pool.pop_front() {
            self.execute(thread, sink);
        }
    }

    /// Drains the current pool one instruction at a time, pacing each step
    /// by `seconds_per_tick / pool_size_at_start`, then swaps in the next
    /// pool. Emits a tick event at entry.
    ///
    /// Pacing is advisory: a host driving many ticks in a test should set
    /// `seconds_per_tick` to `0.0` rather than disable this method.
    pub fn tick(&mut self, sink: &mut impl EventSink) {
        sink.tick_event();

        let pool_size = self.current_pool.len();
        if pool_size == 0 {
            std::thread::sleep(Duration::from_secs_f64(self.config.seconds_per_tick));
            self.current_pool = std::mem::take(&mut self.next_pool);
            self.tick_count += 1;
            return;
        }

        let per_step = Duration::from_secs_f64(self.config.seconds_per_tick / pool_size as f64);

        while let Some(thread) = self.current_pool.pop_front() {
            self.execute(thread, sink);
            std::thread::sleep(per_step);
        }

        self.current_pool = std::mem::take(&mut self.next_pool);
        self.tick_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ArenaConfig {
        ArenaConfig {
            seconds_per_tick: 0.0,
            ..ArenaConfig::default()
        }
    }

    #[test]
    fn spawning_a_thread_registers_it_with_its_owner() {
        let mut scheduler = Scheduler::new(config());
        scheduler.add_player(Player::new(0, "p", "tok", "#fff"));

        let id = scheduler.spawn_new_thread(Thread::new(0, 0, 0), &mut ());

        assert_eq!(scheduler.players().get(0).unwrap().threads(), &[id]);
        assert_eq!(scheduler.live_thread_count(), 1);
    }

    #[test]
    fn killing_an_unscheduled_thread_errs() {
        let mut scheduler = Scheduler::new(config());
        assert!(scheduler.kill_thread(99, &mut ()).is_err());
    }

    #[test]
    fn step_on_empty_pools_is_a_no_op() {
        let mut scheduler = Scheduler::new(config());
        scheduler.step(&mut ());
        assert_eq!(scheduler.tick_count(), 0);
    }

    #[test]
    fn step_swaps_pools_and_advances_tick_count_when_current_is_dry() {
        let mut scheduler = Scheduler::new(config());
        scheduler.core_mut().write_bytes(0, &[0xE0, 0, 0, 0], 0, &mut ());
        scheduler.add_player(Player::new(0, "p", "tok", "#fff"));
        scheduler.spawn_new_thread(Thread::new(0, 0, 0), &mut ());

        // First step executes the NOPE at address 0 and re-queues onto `next`.
        scheduler.step(&mut ());
        assert_eq!(scheduler.tick_count(), 0);

        // Second step: `current` is dry, so this swaps in `next` and advances the tick.
        scheduler.step(&mut ());
        assert_eq!(scheduler.tick_count(), 1);
    }

    #[test]
    fn kill_oldest_thread_is_a_no_op_for_unknown_players() {
        let mut scheduler = Scheduler::new(config());
        scheduler.kill_oldest_thread(42, &mut ());
    }
}
