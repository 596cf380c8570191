//! `BOUNCED`: decrement A in place; branch to B unless it reached zero.

use crate::error::PanicReason;
use crate::events::EventSink;
use crate::instruction::{AddressingMode, Instruction};
use crate::scheduler::Scheduler;
use crate::thread::Thread;

use super::Flow;

impl Scheduler {
    /// A's `IMMEDIATE` mode is the one quirk here: it names an absolute
    /// address to decrement, not a literal to decrement in place (a literal
    /// has nowhere to write the decremented value back to).
    pub(super) fn bounced_template(&mut self, thread: &mut Thread, instr: &Instruction, sink: &mut impl EventSink) -> Result<Flow, PanicReason> {
        let current = if instr.a_mode() == AddressingMode::Immediate {
            self.core.read_word(instr.a_number() as usize)
        } else {
            self.get_a_int(instr, thread)?
        };

        let decremented = current.wrapping_sub(1);
        let owner = thread.owner();

        match instr.a_mode() {
            AddressingMode::Immediate => self.core.write_word(instr.a_number() as usize, decremented, owner, sink),
            AddressingMode::Relative => {
                let addr = thread.pc() + instr.a_number() as usize;
                self.core.write_word(addr, decremented, owner, sink);
            }
            AddressingMode::RegisterDirect => match instr.a_number() {
                0 => thread.set_xd(decremented),
                1 => thread.set_dx(decremented),
                _ => return Err(PanicReason::InvalidRegisterNumber),
            },
            AddressingMode::RegisterIndirect => {
                let addr = self.register_value(instr.a_number().into(), thread)?;
                self.core.write_word(addr as usize, decremented, owner, sink);
            }
        }

        if decremented != 0 {
            self.jmp_template(thread, instr, sink)?;
            Ok(Flow::Jumped)
        } else {
            Ok(Flow::Continue)
        }
    }
}
