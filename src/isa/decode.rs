//! Hex-word parsing.
//!
//! Accepts exactly 8 hexadecimal digits with an optional `0x`/`0X`
//! prefix. Anything else is rejected; a malformed word is never silently
//! replaced by a default instruction.

use crate::common::error::DecodeError;
use crate::isa::instruction::Instruction;

/// Parses one textual instruction word into an [`Instruction`].
pub fn parse_word(index: usize, text: &str) -> Result<Instruction, DecodeError> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.len() != 8 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(DecodeError::MalformedHex {
            word: text.to_string(),
        });
    }

    let word = u32::from_str_radix(digits, 16).map_err(|_| DecodeError::MalformedHex {
        word: text.to_string(),
    })?;

    Ok(Instruction::from_word(index, word))
}
