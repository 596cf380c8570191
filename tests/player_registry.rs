//! Player registry: idempotent registration, thread-list bookkeeping, and
//! the "sum of per-player thread lists equals the live thread count"
//! invariant as seen through the public `Player`/`PlayerRegistry` API.

use arena_vm::prelude::{ArenaConfig, Player, PlayerRegistry, Scheduler, Thread};

#[test]
fn registering_the_same_id_twice_leaves_the_first_player_in_place() {
    let mut registry = PlayerRegistry::new();
    assert!(registry.add(Player::new(7, "alice", "tok-a", "#f00")));
    assert!(!registry.add(Player::new(7, "mallory", "tok-m", "#000")));

    assert_eq!(registry.get(7).unwrap().name(), "alice");
}

#[test]
fn an_unregistered_id_looks_up_to_nothing() {
    let registry = PlayerRegistry::new();
    assert!(registry.get(0).is_none());
    assert!(!registry.contains(0));
}

#[test]
fn a_freshly_registered_player_has_no_threads_and_zero_score() {
    let mut registry = PlayerRegistry::new();
    registry.add(Player::new(1, "alice", "tok", "#f00"));

    let player = registry.get(1).unwrap();
    assert_eq!(player.threads(), &[] as &[u64]);
    assert_eq!(player.thread_count(), 0);
    assert_eq!(player.score(), 0);
}

#[test]
fn total_threads_tracks_every_registered_players_list() {
    // The registry has no public way to push a thread id on its own — that's
    // the scheduler's job on spawn — so this drives it through `Scheduler`.
    let mut scheduler = Scheduler::new(ArenaConfig {
        seconds_per_tick: 0.0,
        ..ArenaConfig::default()
    });
    scheduler.add_player(Player::new(1, "alice", "tok-a", "#f00"));
    scheduler.add_player(Player::new(2, "bob", "tok-b", "#0f0"));

    scheduler.spawn_new_thread(Thread::new(0, 0, 1), &mut ());
    scheduler.spawn_new_thread(Thread::new(0, 0, 1), &mut ());
    scheduler.spawn_new_thread(Thread::new(0, 0, 2), &mut ());

    assert_eq!(scheduler.players().total_threads(), 3);
    assert_eq!(scheduler.players().get(1).unwrap().thread_count(), 2);
    assert_eq!(scheduler.players().get(2).unwrap().thread_count(), 1);
}

#[test]
fn iter_visits_every_registered_player_exactly_once() {
    let mut registry = PlayerRegistry::new();
    registry.add(Player::new(1, "alice", "tok-a", "#f00"));
    registry.add(Player::new(2, "bob", "tok-b", "#0f0"));
    registry.add(Player::new(3, "carol", "tok-c", "#00f"));

    let mut ids: Vec<_> = registry.iter().map(Player::id).collect();
    ids.sort();
    assert_eq!(ids, vec![1, 2, 3]);
}
