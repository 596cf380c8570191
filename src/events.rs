//! Callback surface the scheduler and interpreter emit events through.
//!
//! All five hooks are opaque to the core: a host may batch them and deliver
//! only at tick boundaries, or forward them synchronously. The interpreter
//! never assumes delivery is synchronous.

use crate::player::PlayerId;

/// A single byte written to the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreEvent {
    /// Index modified, already reduced modulo the core size.
    pub index: usize,
    /// The byte value written.
    pub value: u8,
}

/// Receives the five event kinds the arena emits.
///
/// A no-op implementation is provided for `()`, so a host that doesn't care
/// about spectating can pass `()` without writing a type.
pub trait EventSink {
    /// One event per byte write, grouped per instruction.
    fn core_event(&mut self, _events: &[CoreEvent]) {}

    /// Emitted whenever a thread is spawned, jumps, or advances `pc` normally.
    fn update_thread(&mut self, _id: u64, _pc: usize, _owner: PlayerId) {}

    /// Emitted on crash or external kill.
    fn kill_thread(&mut self, _id: u64) {}

    /// Free-form diagnostic string.
    fn runtime_event(&mut self, _message: &str) {}

    /// Fired at the start of each tick.
    fn tick_event(&mut self) {}
}

impl EventSink for () {}
