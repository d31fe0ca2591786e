//! Common types shared across the pipeline simulator.
//!
//! This module provides the error types surfaced by program validation
//! and decoding, plus the MIPS register naming table used by the
//! disassembler and hazard descriptions.

/// Error types for decoding and program validation.
pub mod error;

/// MIPS register index constants and ABI names.
pub mod reg;

pub use error::{DecodeError, ProgramError, ValidationError};
