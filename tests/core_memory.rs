//! Core memory: wraparound addressing, per-write ownership tagging, event grouping.

use arena_vm::prelude::{CoreEvent, EventSink};
use arena_vm::core_memory::Core;

#[derive(Default)]
struct Recorder {
    events: Vec<Vec<CoreEvent>>,
}

impl EventSink for Recorder {
    fn core_event(&mut self, events: &[CoreEvent]) {
        self.events.push(events.to_vec());
    }
}

#[test]
fn a_word_write_past_the_end_wraps_to_the_start() {
    let mut core = Core::new(8);
    let mut sink = Recorder::default();
    core.write_word(6, 0xAABB_CCDD, 1, &mut sink);

    assert_eq!(core.read_range(6, 4), vec![0xAA, 0xBB, 0xCC, 0xDD]);
    for addr in [6, 7, 0, 1] {
        assert_eq!(core.owner(addr), Some(1));
    }
}

#[test]
fn every_byte_write_tags_its_own_owner() {
    let mut core = Core::new(4);
    let mut sink = Recorder::default();

    core.write(0, 1, 10, &mut sink);
    core.write(1, 2, 20, &mut sink);

    assert_eq!(core.owner(0), Some(10));
    assert_eq!(core.owner(1), Some(20));
}

#[test]
fn a_byte_is_unowned_until_its_first_write() {
    let core = Core::new(4);
    assert_eq!(core.owner(0), None);
}

#[test]
fn a_single_word_write_emits_one_grouped_event_covering_all_four_bytes() {
    let mut core = Core::new(16);
    let mut sink = Recorder::default();

    core.write_word(0, 0xDEAD_BEEF, 0, &mut sink);

    assert_eq!(sink.events.len(), 1);
    assert_eq!(sink.events[0].len(), 4);
}

#[test]
fn clear_resets_bytes_and_drops_every_ownership_tag() {
    let mut core = Core::new(4);
    core.write_bytes(0, &[1, 2, 3, 4], 5, &mut ());

    core.clear(0);

    assert_eq!(core.read_range(0, 4), vec![0, 0, 0, 0]);
    for addr in 0..4 {
        assert_eq!(core.owner(addr), None);
    }
}

#[test]
fn read_range_across_the_wrap_boundary_is_contiguous_in_logical_order() {
    let mut core = Core::new(4);
    core.write_bytes(0, &[1, 2, 3, 4], 0, &mut ());
    assert_eq!(core.read_range(2, 4), vec![3, 4, 1, 2]);
}
