//! Resolving an operand's addressing mode to a value.

use crate::error::PanicReason;
use crate::instruction::{AddressingMode, Instruction};
use crate::scheduler::Scheduler;
use crate::thread::Thread;

impl Scheduler {
    /// Resolves the A-operand to its value.
    pub(super) fn get_a_int(&self, instr: &Instruction, thread: &Thread) -> Result<u32, PanicReason> {
        self.operand_int(instr.a_mode(), instr.a_number().into(), thread)
    }

    /// Resolves the B-operand to its value.
    pub(super) fn get_b_int(&self, instr: &Instruction, thread: &Thread) -> Result<u32, PanicReason> {
        self.operand_int(instr.b_mode(), instr.b_number(), thread)
    }

    fn operand_int(&self, mode: AddressingMode, number: u16, thread: &Thread) -> Result<u32, PanicReason> {
        match mode {
            AddressingMode::Immediate => Ok(number as u32),
            AddressingMode::Relative => Ok(self.core.read_word(thread.pc() + number as usize)),
            AddressingMode::RegisterDirect => self.register_value(number, thread),
            AddressingMode::RegisterIndirect => {
                let addr = self.register_value(number, thread)?;
                Ok(self.core.read_word(addr as usize))
            }
        }
    }

    /// Reads `XD` (number `0`) or `DX` (number `1`); any other number names
    /// neither register and is a fatal operand.
    pub(super) fn register_value(&self, number: u16, thread: &Thread) -> Result<u32, PanicReason> {
        match number {
            0 => Ok(thread.xd()),
            1 => Ok(thread.dx()),
            _ => Err(PanicReason::InvalidRegisterNumber),
        }
    }
}
