//! A single-cycle RV32I simulator, extended with the RV32M integer
//! multiply/divide extension and a three-operation RV32F binary32
//! floating-point unit (add, sub, mul; round-to-nearest-even only).
//!
//! The crate is organized bottom-up: gate-level primitives
//! ([`adder`], [`shifter`], [`mdu`], [`fpu`]) sit under the
//! architectural state ([`register_file`], [`memory`]), which sits
//! under instruction handling ([`fields`], [`opcodes`], [`decode`],
//! [`control`]), which [`cpu`] wires into a running machine. [`loader`]
//! and [`trace`] are the program-entry and diagnostics layer the CLI
//! binary drives.

pub mod adder;
pub mod bitvec;
pub mod control;
pub mod cpu;
pub mod decode;
pub mod error;
pub mod fields;
pub mod fpu;
pub mod loader;
pub mod mdu;
pub mod memory;
pub mod opcodes;
pub mod register_file;
pub mod shifter;
pub mod trace;
