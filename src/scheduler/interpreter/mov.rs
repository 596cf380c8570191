//! `YEET`/`YOINK`/`SUB`/`MUL`/`DIV`/`FITS`: read A and B, combine them, write
//! the result to B's location.

use crate::consts::{BYTE_MAX, WORD_MAX};
use crate::error::PanicReason;
use crate::events::EventSink;
use crate::instruction::{AddressingMode, Instruction};
use crate::player::PlayerId;
use crate::scheduler::Scheduler;
use crate::thread::Thread;

impl Scheduler {
    /// Applies `op(a, b)` and writes the result to B's location, honoring
    /// the byte-vs-word write width: a write through an `IMMEDIATE` A-mode
    /// into anything but a register is byte-wide, taking the top 8 bits of
    /// the result, and a word-wide write otherwise.
    pub(super) fn mov_template(
        &mut self,
        thread: &mut Thread,
        instr: &Instruction,
        op: impl FnOnce(u64, u64) -> u64,
        sink: &mut impl EventSink,
    ) -> Result<(), PanicReason> {
        let a = u64::from(self.get_a_int(instr, thread)?);

        // `get_b_int`'s `IMMEDIATE` case answers with the literal operand,
        // which names an address here, not a value — re-read the target to
        // get the word actually stored there.
        let mut b = if instr.b_mode() == AddressingMode::Immediate {
            u64::from(self.core.read_word(instr.b_number() as usize))
        } else {
            u64::from(self.get_b_int(instr, thread)?)
        };

        let byte_wide = instr.a_mode() == AddressingMode::Immediate && instr.b_mode() != AddressingMode::RegisterDirect;

        if byte_wide {
            b >>= 24;
        }

        let max = if byte_wide { u64::from(BYTE_MAX) } else { WORD_MAX };
        let result = op(a, b) % max;
        let owner = thread.owner();

        match instr.b_mode() {
            AddressingMode::Immediate => self.write_mov_result(instr.b_number() as usize, result, byte_wide, owner, sink),
            AddressingMode::Relative => {
                let addr = thread.pc() + instr.b_number() as usize;
                self.write_mov_result(addr, result, byte_wide, owner, sink);
            }
            AddressingMode::RegisterDirect => match instr.b_number() {
                0 => thread.set_xd(result as u32),
                1 => thread.set_dx(result as u32),
                _ => return Err(PanicReason::InvalidRegisterNumber),
            },
            AddressingMode::RegisterIndirect => {
                let addr = self.register_value(instr.b_number(), thread)?;
                self.write_mov_result(addr as usize, result, byte_wide, owner, sink);
            }
        }

        Ok(())
    }

    fn write_mov_result(&mut self, addr: usize, result: u64, byte_wide: bool, owner: PlayerId, sink: &mut impl EventSink) {
        if byte_wide {
            self.core.write(addr, result as u8, owner, sink);
        } else {
            self.core.write_word(addr, result as u32, owner, sink);
        }
    }
}
