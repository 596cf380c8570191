//! Error taxonomy for the assembler, interpreter and scheduler.

use thiserror::Error;

/// Failures raised while assembling yeetcode source text into instructions.
///
/// Never causes a panic; always returned to the assembler's caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblyError {
    /// The mnemonic on this line doesn't name a known opcode.
    #[error("line {line}: unknown opcode {mnemonic:?}")]
    UnknownOpcode {
        /// 1-indexed source line.
        line: usize,
        /// The offending token.
        mnemonic: String,
    },
    /// The opcode was given the wrong number of operands.
    #[error("line {line}: {mnemonic} expects {expected} operand(s), got {found}")]
    BadOperandCount {
        /// 1-indexed source line.
        line: usize,
        /// The mnemonic the operand count mismatched against.
        mnemonic: String,
        /// Number of operands the opcode requires.
        expected: usize,
        /// Number of operands actually present.
        found: usize,
    },
    /// An operand literal couldn't be parsed as a number.
    #[error("line {line}: invalid literal {text:?}")]
    InvalidLiteral {
        /// 1-indexed source line.
        line: usize,
        /// The raw operand text that failed to parse.
        text: String,
    },
    /// A register operand named something other than `xd`/`dx`.
    #[error("line {line}: invalid register {text:?}")]
    InvalidRegister {
        /// 1-indexed source line.
        line: usize,
        /// The raw register token.
        text: String,
    },
    /// An operand's addressing-mode prefix was opened but never closed.
    #[error("line {line}: unterminated operand {text:?}")]
    UnterminatedOperand {
        /// 1-indexed source line.
        line: usize,
        /// The raw operand text.
        text: String,
    },
}

/// Faults raised during instruction execution.
///
/// Consumed internally by the scheduler to crash the offending thread and
/// emit a `runtime_event`; never propagated past [`crate::scheduler::Scheduler::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PanicReason {
    /// An operand's addressing-mode bits didn't name one of the four known modes.
    #[error("invalid addressing mode")]
    InvalidAddressingMode,
    /// A register operand selected neither `xd` nor `dx`.
    #[error("invalid register number")]
    InvalidRegisterNumber,
    /// `DIV`/`MOD`-family opcode divided by zero.
    #[error("divide by zero")]
    DivideByZero,
    /// `MOD`-family opcode took the modulus of zero.
    #[error("modulo by zero")]
    ModuloByZero,
    /// The decoded opcode nibble didn't name a known instruction.
    #[error("unknown opcode")]
    UnknownOpcode,
}

/// Preconditions the scheduler enforces on its own bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// [`crate::scheduler::Scheduler::kill_thread`] was asked to remove an id
    /// present in neither pool. Fatal to the host: a bug, not a retry.
    #[error("no thread with id {id} is scheduled")]
    ThreadNotFound {
        /// The thread id that couldn't be found.
        id: u64,
    },
}
