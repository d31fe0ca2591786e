//! Program-file loading.
//!
//! A program file is a plain text list of instruction words, whitespace
//! separated, with `#` and `//` comments stripped to end of line. The
//! loader only collects the word texts; whether each one decodes is the
//! controller's call at start.

use std::fs;

use crate::common::error::ProgramError;

/// Reads an instruction word list from a text file.
pub fn load_program(path: &str) -> Result<Vec<String>, ProgramError> {
    let text = fs::read_to_string(path).map_err(|source| ProgramError::Io {
        path: path.to_string(),
        source,
    })?;

    let mut words = Vec::new();
    for line in text.lines() {
        let line = line.split('#').next().unwrap_or("");
        let line = line.split("//").next().unwrap_or("");
        for token in line.split_whitespace() {
            words.push(token.to_string());
        }
    }
    Ok(words)
}
