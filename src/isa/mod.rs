//! MIPS instruction set definitions and decoding.
//!
//! Covers the subset the pipeline model cares about: R-type arithmetic,
//! immediate arithmetic, loads, stores, and conditional branches. Words
//! outside that subset still decode (field extraction is total) and flow
//! through the pipeline with no register usage.

/// Opcode and function-code constants.
pub mod opcodes;

/// The decoded instruction record and its classification.
pub mod instruction;

/// Hex-word parsing.
pub mod decode;

/// Mnemonic rendering for traces and hazard descriptions.
pub mod disasm;

pub use instruction::{Instruction, InstructionClass};
