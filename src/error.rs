//! Error types for every fallible boundary in the simulator.
//!
//! Shape and program-load errors are reported to the caller; arithmetic
//! corner cases and exceptional floating-point operations are not errors
//! at all (they produce defined bit patterns, see [`crate::mdu`] and
//! [`crate::fpu`]). Non-fatal faults encountered mid-cycle (unaligned or
//! out-of-window memory access, unknown opcodes) are logged by the CPU
//! rather than propagated; see [`crate::cpu`].

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BitVecError {
    #[error("bit-vector width mismatch: expected {expected}, got {actual}")]
    WidthMismatch { expected: u32, actual: u32 },
    #[error("value {value} does not fit in a {width}-bit vector")]
    OutOfRange { value: i64, width: u32 },
    #[error("invalid hex digit in {0:?}")]
    InvalidHex(String),
    #[error("hex string {0:?} has {1} digits, expected {2}")]
    WrongHexLength(String, usize, usize),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MemoryError {
    #[error("address 0x{addr:08x} is not aligned to {width}-byte width")]
    Misaligned { addr: u32, width: u32 },
    #[error("address 0x{addr:08x} is outside the memory window [0x{base:08x}, 0x{end:08x})")]
    OutOfBounds { addr: u32, base: u32, end: u32 },
    #[error("register address {0} is out of range (must be 0..32)")]
    InvalidRegister(u8),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read program file {path:?}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: expected 8 hex digits (optionally 0x-prefixed), got {text:?}")]
    BadLineLength { line: usize, text: String },
    #[error("line {line}: invalid hex digit in {text:?}")]
    BadHexDigit { line: usize, text: String },
    #[error("program does not fit in the instruction memory window starting at 0x{start:08x}")]
    OutOfWindow { start: u32 },
}
