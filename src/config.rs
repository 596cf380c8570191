//! Host-supplied configuration for an [`crate::arena::Arena`].

use crate::consts::{DEFAULT_CORE_SIZE, DEFAULT_MAX_PROCESSES, DEFAULT_SECONDS_PER_TICK};

/// Parameters a host picks when standing up an arena.
///
/// Loading these from environment variables, JSON files, or CLI flags is the
/// external engine's job; this struct only carries the resulting values.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArenaConfig {
    /// Size of the core, in bytes.
    pub core_size: usize,
    /// Per-player live-thread cap enforced by `ZOOP`.
    pub max_processes: usize,
    /// Advisory tick pacing budget, in seconds.
    pub seconds_per_tick: f64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            core_size: DEFAULT_CORE_SIZE,
            max_processes: DEFAULT_MAX_PROCESSES,
            seconds_per_tick: DEFAULT_SECONDS_PER_TICK,
        }
    }
}

impl ArenaConfig {
    /// The process cap `YEETCALL 1` (transfer ownership) enforces, `⌊1.5·max_processes⌋`.
    pub const fn transfer_process_cap(&self) -> usize {
        (self.max_processes * 3) / 2
    }
}
