//! Arena-wide constants shared by the codec, interpreter and scheduler.

/* WORD AND BYTE TYPES */

/// Length of a word, in bytes.
pub const WORD_SIZE: usize = 4;

/// Length of an encoded instruction, in bytes.
pub const INSTRUCTION_WIDTH: usize = 4;

/// Exclusive upper bound of a 32-bit word (`2^32`).
pub const WORD_MAX: u64 = 1 << 32;

/// Exclusive upper bound of a byte-wide write (`2^8`).
pub const BYTE_MAX: u32 = 1 << 8;

/* REGISTERS */

/// Register id for `XD`.
pub const XD_REGISTER: u8 = 0;

/// Register id for `DX`.
pub const DX_REGISTER: u8 = 1;

/* DEFAULTS */

/// Default core size, in bytes, when a host doesn't override it.
pub const DEFAULT_CORE_SIZE: usize = 8192;

/// Default per-player process cap.
pub const DEFAULT_MAX_PROCESSES: usize = 10;

/// Default tick pacing budget, in seconds.
pub const DEFAULT_SECONDS_PER_TICK: f64 = 10.0;

/* SYSCALLS */

/// Four ASCII bytes ("teey") written back to `dx` when a syscall fails.
pub const SYSCALL_ERROR_WORD: u32 = u32::from_be_bytes(*b"teey");

/// Maximum `|pc_a - pc_b|` distance `YEETCALL 2` (locate nearest thread) will consider.
pub const LOCATE_NEAREST_MAX_DISTANCE: u32 = 256;

/// Maximum `|pc_a - pc_b|` distance `YEETCALL 3` (locate random thread) will consider.
pub const LOCATE_RANDOM_MAX_DISTANCE: u32 = 1024;
