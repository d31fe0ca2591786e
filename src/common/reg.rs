//! MIPS register indices and ABI names.
//!
//! Register 0 (`$zero`) is hardwired to zero. It can never carry a data
//! dependency, so the usage analyzer strips it from every read and write
//! set before hazard detection runs.

/// Index of the hardwired zero register.
pub const ZERO: u8 = 0;

/// ABI names for the 32 general-purpose registers, indexed by register number.
pub const NAMES: [&str; 32] = [
    "zero", "at", "v0", "v1", "a0", "a1", "a2", "a3", "t0", "t1", "t2", "t3", "t4", "t5", "t6",
    "t7", "s0", "s1", "s2", "s3", "s4", "s5", "s6", "s7", "t8", "t9", "k0", "k1", "gp", "sp",
    "fp", "ra",
];

/// Returns the `$`-prefixed ABI name for a register index.
///
/// Indices are masked to the architectural 0-31 range, matching the
/// 5-bit register fields of the instruction word.
pub fn name(index: u8) -> String {
    format!("${}", NAMES[(index & 0x1f) as usize])
}
