//! The 4-byte instruction encoding: opcode, addressing modes, and operands.

use crate::error::PanicReason;
use strum::{Display, EnumString};

/// The closed set of opcodes, encoded in the high nibble of byte 0.
///
/// A tagged sum type with a per-variant mnemonic rather than a class
/// hierarchy: the single dispatch switch in [`crate::scheduler`] is the
/// natural home for per-opcode semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum Opcode {
    /// write A into B's location
    #[strum(serialize = "YEET")]
    Yeet = 1,
    /// B <- B + A
    #[strum(serialize = "YOINK")]
    Yoink = 2,
    /// B <- B - A
    #[strum(serialize = "SUB", serialize = "KNIOY")]
    Sub = 3,
    /// B <- B * A
    #[strum(serialize = "MUL")]
    Mul = 4,
    /// B <- B / A; A = 0 crashes the thread
    #[strum(serialize = "DIV")]
    Div = 5,
    /// B <- B mod A; A = 0 crashes the thread
    #[strum(serialize = "FITS")]
    Fits = 6,
    /// PC <- B
    #[strum(serialize = "BOUNCE")]
    Bounce = 7,
    /// if A = 0: PC <- B
    #[strum(serialize = "BOUNCEZ")]
    Bouncez = 8,
    /// if A != 0: PC <- B
    #[strum(serialize = "BOUNCEN")]
    Bouncen = 9,
    /// decrement A in place; if result != 0: PC <- B
    #[strum(serialize = "BOUNCED")]
    Bounced = 10,
    /// spawn a child thread starting at B
    #[strum(serialize = "ZOOP")]
    Zoop = 11,
    /// exchange the values at A and B
    #[strum(serialize = "YEB")]
    Yeb = 12,
    /// no effect
    #[strum(serialize = "NOPE")]
    Nope = 14,
    /// invoke a syscall; arguments in XD/DX
    #[strum(serialize = "YEETCALL")]
    Yeetcall = 15,
}

impl Opcode {
    /// Number of operands this opcode's textual form takes: 0, 1 (B only), or 2.
    pub const fn arity(&self) -> usize {
        match self {
            Self::Nope | Self::Yeetcall => 0,
            Self::Bounce | Self::Zoop => 1,
            _ => 2,
        }
    }

    /// Recovers an opcode from its 4-bit nibble value.
    pub const fn from_nibble(value: u8) -> Result<Self, PanicReason> {
        match value {
            1 => Ok(Self::Yeet),
            2 => Ok(Self::Yoink),
            3 => Ok(Self::Sub),
            4 => Ok(Self::Mul),
            5 => Ok(Self::Div),
            6 => Ok(Self::Fits),
            7 => Ok(Self::Bounce),
            8 => Ok(Self::Bouncez),
            9 => Ok(Self::Bouncen),
            10 => Ok(Self::Bounced),
            11 => Ok(Self::Zoop),
            12 => Ok(Self::Yeb),
            14 => Ok(Self::Nope),
            15 => Ok(Self::Yeetcall),
            _ => Err(PanicReason::UnknownOpcode),
        }
    }
}

/// How an operand is resolved to a value or an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AddressingMode {
    /// operand is the literal `number`.
    Immediate = 0,
    /// operand is `(pc + number) mod size`, dereferenced as a word.
    Relative = 1,
    /// operand selects the `XD` or `DX` register by `number`.
    RegisterDirect = 2,
    /// operand is the word at the address held in the selected register.
    RegisterIndirect = 3,
}

impl AddressingMode {
    /// Recovers an addressing mode from its 2-bit value. Always succeeds:
    /// every 2-bit pattern names one of the four modes.
    pub const fn from_bits(value: u8) -> Self {
        match value & 0b11 {
            0 => Self::Immediate,
            1 => Self::Relative,
            2 => Self::RegisterDirect,
            _ => Self::RegisterIndirect,
        }
    }
}

/// A decoded 4-byte instruction: `(opcode:4, a_mode:2, b_mode:2, a_number:8, b_number:16)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    opcode: Opcode,
    a_mode: AddressingMode,
    b_mode: AddressingMode,
    a_number: u8,
    b_number: u16,
}

impl Instruction {
    /// Builds an instruction from its already-validated parts.
    pub const fn new(opcode: Opcode, a_mode: AddressingMode, a_number: u8, b_mode: AddressingMode, b_number: u16) -> Self {
        Self {
            opcode,
            a_mode,
            b_mode,
            a_number,
            b_number,
        }
    }

    /// The opcode.
    pub const fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// The A-operand's addressing mode.
    pub const fn a_mode(&self) -> AddressingMode {
        self.a_mode
    }

    /// The B-operand's addressing mode.
    pub const fn b_mode(&self) -> AddressingMode {
        self.b_mode
    }

    /// The raw 8-bit A-operand.
    pub const fn a_number(&self) -> u8 {
        self.a_number
    }

    /// The raw 16-bit B-operand.
    pub const fn b_number(&self) -> u16 {
        self.b_number
    }

    /// Encodes this instruction into its 4-byte wire format.
    pub const fn encode(&self) -> [u8; 4] {
        let head = ((self.opcode as u8) << 4) | ((self.a_mode as u8) << 2) | (self.b_mode as u8);
        let [b_hi, b_lo] = self.b_number.to_be_bytes();
        [head, self.a_number, b_hi, b_lo]
    }

    /// Decodes a 4-byte instruction from its wire format.
    ///
    /// Fails only when the opcode nibble names none of the fourteen defined
    /// opcodes; mode bits are always valid since every 2-bit pattern names a
    /// real [`AddressingMode`].
    pub fn decode(bytes: [u8; 4]) -> Result<Self, PanicReason> {
        let opcode = Opcode::from_nibble(bytes[0] >> 4)?;
        let a_mode = AddressingMode::from_bits(bytes[0] >> 2);
        let b_mode = AddressingMode::from_bits(bytes[0]);
        let a_number = bytes[1];
        let b_number = u16::from_be_bytes([bytes[2], bytes[3]]);

        Ok(Self::new(opcode, a_mode, a_number, b_mode, b_number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn encode_matches_documented_layout() {
        let instr = Instruction::new(Opcode::Yeet, AddressingMode::Relative, 0, AddressingMode::Relative, 4);
        assert_eq!(instr.encode(), [0x15, 0x00, 0x00, 0x04]);
    }

    #[test]
    fn decode_rejects_unknown_opcode() {
        assert!(Instruction::decode([0x00, 0, 0, 0]).is_err());
        assert!(Instruction::decode([0xD0, 0, 0, 0]).is_err());
    }

    #[test]
    fn sub_and_knioy_are_the_same_opcode() {
        use std::str::FromStr;
        assert_eq!(Opcode::from_str("SUB").unwrap(), Opcode::Sub);
        assert_eq!(Opcode::from_str("KNIOY").unwrap(), Opcode::Sub);
        assert_eq!(Opcode::from_str("sub").unwrap(), Opcode::Sub);
    }

    #[quickcheck]
    fn decode_encode_roundtrips(head: u8, a_number: u8, b_number: u16) -> bool {
        let opcode_nibble = head >> 4;
        match Opcode::from_nibble(opcode_nibble) {
            Ok(_) => {
                let bytes = [head, a_number, (b_number >> 8) as u8, b_number as u8];
                match Instruction::decode(bytes) {
                    Ok(instr) => instr.encode() == bytes,
                    Err(_) => false,
                }
            }
            Err(_) => true,
        }
    }
}
