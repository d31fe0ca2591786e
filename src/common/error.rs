//! Error types for instruction decoding and program validation.
//!
//! A run is either fully valid or rejected up front: `start()` surfaces
//! one of these errors and leaves no partial state behind. Stepping and
//! resetting a valid run never fail.

use thiserror::Error;

/// Failure to turn one textual word into an instruction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The word is not exactly 8 hexadecimal digits (an optional `0x`
    /// prefix is allowed) or does not parse as an unsigned 32-bit value.
    #[error("malformed hex word `{word}`: expected exactly 8 hexadecimal digits")]
    MalformedHex { word: String },
}

/// Failure to accept an instruction list at simulation start.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The submitted instruction list contains no words.
    #[error("instruction list is empty")]
    EmptyProgram,

    /// One element of the list failed to decode.
    #[error("instruction {index} is invalid: {source}")]
    BadWord {
        index: usize,
        #[source]
        source: DecodeError,
    },
}

/// Failure to read a program file from disk.
#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("failed to read program file `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
