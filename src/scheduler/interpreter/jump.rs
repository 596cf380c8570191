//! `BOUNCE`/`BOUNCEZ`/`BOUNCEN`: resolve the B-operand to an address and
//! branch there.

use crate::error::PanicReason;
use crate::events::EventSink;
use crate::instruction::{AddressingMode, Instruction};
use crate::scheduler::Scheduler;
use crate::thread::Thread;

impl Scheduler {
    /// Resolves `mode`/`number` to an address, honoring the same four
    /// addressing rules `BOUNCE`'s B-operand and `ZOOP`'s spawn target use.
    pub(super) fn resolve_address(&self, thread: &Thread, mode: AddressingMode, number: u16) -> Result<usize, PanicReason> {
        match mode {
            AddressingMode::Immediate => Ok(number as usize),
            AddressingMode::Relative => Ok(thread.pc() + number as usize),
            AddressingMode::RegisterDirect => Ok(self.register_value(number, thread)? as usize),
            AddressingMode::RegisterIndirect => {
                let addr = self.register_value(number, thread)?;
                Ok(self.core.read_word(addr as usize) as usize)
            }
        }
    }

    /// Sets `thread.pc` to the B-operand's resolved address and re-queues
    /// the thread onto `next`.
    pub(super) fn jmp_template(&mut self, thread: &mut Thread, instr: &Instruction, sink: &mut impl EventSink) -> Result<(), PanicReason> {
        let target = self.resolve_address(thread, instr.b_mode(), instr.b_number())?;
        thread.set_pc(target % self.core.size());
        sink.update_thread(thread.id(), thread.pc(), thread.owner());
        self.next_pool.push_back(*thread);
        Ok(())
    }
}
