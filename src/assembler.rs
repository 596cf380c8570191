//! Textual yeetcode: parses `OPCODE[ operand[, operand]]` lines into
//! instructions, and renders instructions back to that same textual form.

use std::collections::HashMap;
use std::str::FromStr;

use crate::consts::{DX_REGISTER, XD_REGISTER};
use crate::error::AssemblyError;
use crate::instruction::{AddressingMode, Instruction, Opcode};

/// One assembled line: either a decoded instruction, or a raw 32-bit word
/// spelled out as a hex literal (`0xDEADBEEF`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssembledLine {
    /// A parsed instruction.
    Instruction(Instruction),
    /// A raw 4-byte big-endian word, written verbatim.
    RawWord(u32),
}

impl AssembledLine {
    /// Encodes this line to its 4-byte wire form.
    pub const fn encode(&self) -> [u8; 4] {
        match self {
            Self::Instruction(instr) => instr.encode(),
            Self::RawWord(word) => word.to_be_bytes(),
        }
    }
}

/// The result of assembling a block of yeetcode source.
#[derive(Debug, Clone, Default)]
pub struct Program {
    /// Assembled lines, in source order, comments/blanks/labels elided.
    pub lines: Vec<AssembledLine>,
    /// Label name to the index (into `lines`) it was declared before.
    ///
    /// Reserved for a future symbolic pass; currently recorded only.
    pub labels: HashMap<String, usize>,
}

impl Program {
    /// Encodes every assembled line into a flat byte buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.lines.iter().flat_map(AssembledLine::encode).collect()
    }
}

/// Assembles a block of yeetcode source into a [`Program`].
pub fn assemble(source: &str) -> Result<Program, AssemblyError> {
    let mut program = Program::default();

    for (n, raw_line) in source.lines().enumerate() {
        let line_no = n + 1;
        let line = raw_line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(hex) = line.strip_prefix("0x").or_else(|| line.strip_prefix("0X")) {
            if hex.len() <= 8 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
                let word = u32::from_str_radix(hex, 16).map_err(|_| AssemblyError::InvalidLiteral {
                    line: line_no,
                    text: line.to_string(),
                })?;
                program.lines.push(AssembledLine::RawWord(word));
                continue;
            }
        }

        if let Some(label) = line.strip_suffix(':') {
            program.labels.insert(label.to_string(), program.lines.len());
            continue;
        }

        let instr = assemble_line(line, line_no)?;
        program.lines.push(AssembledLine::Instruction(instr));
    }

    Ok(program)
}

fn assemble_line(line: &str, line_no: usize) -> Result<Instruction, AssemblyError> {
    let mut parts = line.splitn(2, char::is_whitespace);
    let mnemonic = parts.next().unwrap_or_default();
    let rest = parts.next().unwrap_or("").trim();

    let opcode = Opcode::from_str(mnemonic).map_err(|_| AssemblyError::UnknownOpcode {
        line: line_no,
        mnemonic: mnemonic.to_string(),
    })?;

    let operands: Vec<&str> = if rest.is_empty() {
        Vec::new()
    } else {
        rest.splitn(2, ',').map(str::trim).collect()
    };

    let expected = opcode.arity();
    if operands.len() != expected {
        return Err(AssemblyError::BadOperandCount {
            line: line_no,
            mnemonic: mnemonic.to_string(),
            expected,
            found: operands.len(),
        });
    }

    let (a_mode, a_number, b_mode, b_number) = match expected {
        0 => (AddressingMode::Immediate, 0u8, AddressingMode::Immediate, 0u16),
        1 => {
            let (mode, value) = parse_operand(operands[0], line_no)?;
            (AddressingMode::Immediate, 0u8, mode, value as u16)
        }
        _ => {
            let (a_mode, a_value) = parse_operand(operands[0], line_no)?;
            let (b_mode, b_value) = parse_operand(operands[1], line_no)?;
            (a_mode, a_value as u8, b_mode, b_value as u16)
        }
    };

    Ok(Instruction::new(opcode, a_mode, a_number, b_mode, b_number))
}

const MODE_PREFIXES: [(char, AddressingMode); 4] = [
    ('$', AddressingMode::Immediate),
    ('#', AddressingMode::Relative),
    ('%', AddressingMode::RegisterDirect),
    ('[', AddressingMode::RegisterIndirect),
];

/// Parses one operand (`<mode-prefix><literal>`) into a mode and a raw value.
///
/// The value is widened to `i64` so a negative literal's two's-complement
/// truncation into the 8- or 16-bit field happens at the call site via `as`.
fn parse_operand(text: &str, line_no: usize) -> Result<(AddressingMode, i64), AssemblyError> {
    let mut chars = text.chars();
    let (mode, literal) = match chars.next() {
        Some(c) if MODE_PREFIXES.iter().any(|(prefix, _)| *prefix == c) => {
            let mode = MODE_PREFIXES.iter().find(|(prefix, _)| *prefix == c).unwrap().1;
            (mode, chars.as_str())
        }
        _ => (AddressingMode::Immediate, text),
    };

    let literal = literal.strip_suffix(']').unwrap_or(literal);

    if literal.is_empty() {
        return Err(AssemblyError::UnterminatedOperand {
            line: line_no,
            text: text.to_string(),
        });
    }

    match mode {
        AddressingMode::RegisterDirect | AddressingMode::RegisterIndirect => {
            let value = match literal.to_ascii_uppercase().as_str() {
                "XD" => i64::from(XD_REGISTER),
                "DX" => i64::from(DX_REGISTER),
                _ => {
                    return Err(AssemblyError::InvalidRegister {
                        line: line_no,
                        text: literal.to_string(),
                    })
                }
            };
            Ok((mode, value))
        }
        AddressingMode::Immediate | AddressingMode::Relative => {
            let value = parse_literal(literal).ok_or_else(|| AssemblyError::InvalidLiteral {
                line: line_no,
                text: literal.to_string(),
            })?;
            Ok((mode, value))
        }
    }
}

fn parse_literal(text: &str) -> Option<i64> {
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        return i64::from_str_radix(hex, 16).ok();
    }

    text.parse::<i64>().ok().or_else(|| i64::from_str_radix(text, 16).ok())
}

/// Renders an instruction back to its canonical textual form.
///
/// `disassemble(assemble(line))` reproduces an instruction with the same
/// opcode, modes, and operands, though not necessarily the same literal text
/// (register operands are always rendered by name, never by number).
pub fn disassemble(instr: &Instruction) -> String {
    let mnemonic = instr.opcode().to_string();

    match instr.opcode().arity() {
        0 => mnemonic,
        1 => format!("{mnemonic} {}", operand_text(instr.b_mode(), instr.b_number().into())),
        _ => format!(
            "{mnemonic} {}, {}",
            operand_text(instr.a_mode(), instr.a_number().into()),
            operand_text(instr.b_mode(), instr.b_number().into())
        ),
    }
}

fn operand_text(mode: AddressingMode, number: u32) -> String {
    match mode {
        AddressingMode::Immediate => format!("${number}"),
        AddressingMode::Relative => format!("#{number}"),
        AddressingMode::RegisterDirect => format!("%{}", register_name(number)),
        AddressingMode::RegisterIndirect => format!("[{}", register_name(number)),
    }
}

fn register_name(number: u32) -> &'static str {
    if number == u32::from(XD_REGISTER) {
        "XD"
    } else {
        "DX"
    }
}
