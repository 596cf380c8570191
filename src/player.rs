//! Player metadata and the thread ids each player owns.

use std::collections::HashMap;

/// Identifies a player. Also used as the core's per-byte owner tag.
pub type PlayerId = u64;

/// An external identity that owns one or more threads and accumulates a score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    name: String,
    token: String,
    score: u64,
    color: String,
    /// Thread ids owned by this player, oldest first.
    threads: Vec<u64>,
}

impl Player {
    /// Builds a new player with an empty thread list and zero score.
    pub fn new(id: PlayerId, name: impl Into<String>, token: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            token: token.into(),
            score: 0,
            color: color.into(),
            threads: Vec::new(),
        }
    }

    /// This player's id.
    pub const fn id(&self) -> PlayerId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Authentication token, opaque to the core.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Monotonic count of instructions executed by this player's threads.
    pub const fn score(&self) -> u64 {
        self.score
    }

    /// Spectator display color, opaque to the core.
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Thread ids owned by this player, oldest first.
    pub fn threads(&self) -> &[u64] {
        &self.threads
    }

    /// Number of live threads currently owned.
    pub fn thread_count(&self) -> usize {
        self.threads.len()
    }

    /// Increments this player's score by one; the scheduler calls this at
    /// the start of every successful `step`.
    pub(crate) fn bump_score(&mut self) {
        self.score += 1;
    }

    pub(crate) fn push_thread(&mut self, id: u64) {
        self.threads.push(id);
    }

    pub(crate) fn remove_thread(&mut self, id: u64) {
        if let Some(pos) = self.threads.iter().position(|&t| t == id) {
            self.threads.remove(pos);
        }
    }

    pub(crate) fn oldest_thread(&self) -> Option<u64> {
        self.threads.first().copied()
    }

    pub(crate) fn pop_oldest_thread(&mut self) -> Option<u64> {
        if self.threads.is_empty() {
            None
        } else {
            Some(self.threads.remove(0))
        }
    }
}

/// Mapping from player id to [`Player`].
///
/// Adding a player is idempotent-by-id: a second add for the same id fails
/// rather than clobbering the existing entry.
#[derive(Debug, Clone, Default)]
pub struct PlayerRegistry {
    players: HashMap<PlayerId, Player>,
}

impl PlayerRegistry {
    /// Builds an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new player. Returns `false` without modifying the
    /// registry if `player.id()` is already registered.
    pub fn add(&mut self, player: Player) -> bool {
        if self.players.contains_key(&player.id()) {
            return false;
        }

        self.players.insert(player.id(), player);
        true
    }

    /// Looks up a player by id.
    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    /// Looks up a player by id, mutably.
    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(&id)
    }

    /// Whether a player with this id is registered.
    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.contains_key(&id)
    }

    /// Iterates over all registered players.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    /// Sum of every player's thread-list length.
    pub fn total_threads(&self) -> usize {
        self.players.values().map(Player::thread_count).sum()
    }
}
