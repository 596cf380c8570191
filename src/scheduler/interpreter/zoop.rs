//! `ZOOP`: fork a child thread at the resolved B-address.

use crate::error::PanicReason;
use crate::events::EventSink;
use crate::instruction::Instruction;
use crate::player::Player;
use crate::scheduler::Scheduler;
use crate::thread::Thread;

impl Scheduler {
    /// Spawns a clone of `thread` at B's resolved address, unless the owner
    /// already has `max_processes` live threads — in which case this is a
    /// silent no-op, never a crash.
    pub(super) fn zoop_template(&mut self, thread: &Thread, instr: &Instruction, sink: &mut impl EventSink) -> Result<(), PanicReason> {
        let owner = thread.owner();
        let at_capacity = self
            .players
            .get(owner)
            .map(Player::thread_count)
            .unwrap_or(0)
            >= self.config.max_processes;

        if at_capacity {
            return Ok(());
        }

        let target = self.resolve_address(thread, instr.b_mode(), instr.b_number())? % self.core.size();

        let id = self.next_thread_id();
        let mut child = *thread;
        child.set_id(id);
        child.set_pc(target);

        if let Some(player) = self.players.get_mut(owner) {
            player.push_thread(id);
        }

        sink.update_thread(child.id(), child.pc(), child.owner());
        self.next_pool.push_back(child);

        Ok(())
    }
}
