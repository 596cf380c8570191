//! `YEB`: swap the 4-byte values at A's and B's locations.
//!
//! Unlike every other opcode, an `IMMEDIATE` operand here names an absolute
//! core address to read and write, not a literal — the same address the
//! operand's raw number already is for `BOUNCED`'s A-side.

use crate::error::PanicReason;
use crate::events::EventSink;
use crate::instruction::{AddressingMode, Instruction};
use crate::player::PlayerId;
use crate::scheduler::Scheduler;
use crate::thread::Thread;

/// Where a `YEB` operand's 4-byte value lives.
#[derive(Clone, Copy)]
enum Slot {
    Memory(usize),
    Register(u8),
}

impl Scheduler {
    fn yeb_slot(&self, mode: AddressingMode, number: u16, thread: &Thread) -> Result<Slot, PanicReason> {
        match mode {
            AddressingMode::Immediate => Ok(Slot::Memory(number as usize)),
            AddressingMode::Relative => Ok(Slot::Memory(thread.pc() + number as usize)),
            AddressingMode::RegisterDirect => match number {
                0 => Ok(Slot::Register(0)),
                1 => Ok(Slot::Register(1)),
                _ => Err(PanicReason::InvalidRegisterNumber),
            },
            AddressingMode::RegisterIndirect => {
                let addr = self.register_value(number, thread)?;
                Ok(Slot::Memory(addr as usize))
            }
        }
    }

    fn yeb_read(&self, slot: Slot, thread: &Thread) -> u32 {
        match slot {
            Slot::Memory(addr) => self.core.read_word(addr),
            Slot::Register(0) => thread.xd(),
            Slot::Register(_) => thread.dx(),
        }
    }

    fn yeb_write(&mut self, slot: Slot, value: u32, thread: &mut Thread, owner: PlayerId, sink: &mut impl EventSink) {
        match slot {
            Slot::Memory(addr) => self.core.write_word(addr, value, owner, sink),
            Slot::Register(0) => thread.set_xd(value),
            Slot::Register(_) => thread.set_dx(value),
        }
    }

    pub(super) fn yeb_template(&mut self, thread: &mut Thread, instr: &Instruction, sink: &mut impl EventSink) -> Result<(), PanicReason> {
        let a_slot = self.yeb_slot(instr.a_mode(), instr.a_number().into(), thread)?;
        let b_slot = self.yeb_slot(instr.b_mode(), instr.b_number(), thread)?;

        let a_val = self.yeb_read(a_slot, thread);
        let b_val = self.yeb_read(b_slot, thread);

        let owner = thread.owner();
        self.yeb_write(a_slot, b_val, thread, owner, sink);
        self.yeb_write(b_slot, a_val, thread, owner, sink);

        Ok(())
    }
}
