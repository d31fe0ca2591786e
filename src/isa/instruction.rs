//! The decoded instruction record.
//!
//! An `Instruction` is immutable once decoded: it is created from the
//! submitted word list at simulation start and never mutated afterwards.
//! All field extraction is total; only the textual hex parse can fail.

use serde::Serialize;

use crate::isa::opcodes;

/// Coarse classification driving register usage and hazard timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InstructionClass {
    /// R-type register arithmetic (opcode 0).
    Arithmetic,
    /// I-type arithmetic with an immediate operand (`addi` .. `lui`).
    ImmArithmetic,
    /// Memory load (`lb` .. `lwr`).
    Load,
    /// Memory store (`sb` .. `sw`).
    Store,
    /// Conditional branch (`beq`, `bne`).
    Branch,
    /// Anything else. Flows through the pipeline with no register usage.
    Other,
}

/// One decoded 32-bit MIPS instruction word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instruction {
    /// Program-order index, 0-based.
    pub index: usize,
    /// Normalized word text: 8 lowercase hex digits, no prefix.
    pub raw_hex: String,
    /// The raw 32-bit word.
    pub word: u32,
    /// Bits 31..26.
    pub opcode: u8,
    /// Bits 25..21.
    pub rs: u8,
    /// Bits 20..16.
    pub rt: u8,
    /// Bits 15..11.
    pub rd: u8,
    /// Bits 10..6.
    pub shamt: u8,
    /// Bits 5..0.
    pub funct: u8,
    /// Bits 15..0, interpretation depends on class.
    pub immediate: u16,
}

impl Instruction {
    /// Extracts all fields from a raw word. Total.
    pub fn from_word(index: usize, word: u32) -> Self {
        Self {
            index,
            raw_hex: format!("{:08x}", word),
            word,
            opcode: ((word >> 26) & 0x3f) as u8,
            rs: ((word >> 21) & 0x1f) as u8,
            rt: ((word >> 16) & 0x1f) as u8,
            rd: ((word >> 11) & 0x1f) as u8,
            shamt: ((word >> 6) & 0x1f) as u8,
            funct: (word & 0x3f) as u8,
            immediate: (word & 0xffff) as u16,
        }
    }

    pub fn class(&self) -> InstructionClass {
        if self.opcode == opcodes::OP_RTYPE {
            InstructionClass::Arithmetic
        } else if opcodes::is_imm_arith_opcode(self.opcode) {
            InstructionClass::ImmArithmetic
        } else if opcodes::is_load_opcode(self.opcode) {
            InstructionClass::Load
        } else if opcodes::is_store_opcode(self.opcode) {
            InstructionClass::Store
        } else if opcodes::is_branch_opcode(self.opcode) {
            InstructionClass::Branch
        } else {
            InstructionClass::Other
        }
    }

    pub fn is_load(&self) -> bool {
        self.class() == InstructionClass::Load
    }

    pub fn is_store(&self) -> bool {
        self.class() == InstructionClass::Store
    }

    pub fn is_branch(&self) -> bool {
        self.class() == InstructionClass::Branch
    }

    /// The all-zero word, `sll $zero, $zero, 0`.
    pub fn is_nop(&self) -> bool {
        self.word == 0
    }

    /// Immediate with the class-appropriate extension applied.
    ///
    /// Loads, stores, branches, and the `addi`/`slti` family sign-extend;
    /// the logical immediates (`andi`, `ori`, `xori`) and `lui`
    /// zero-extend.
    pub fn imm_value(&self) -> i32 {
        let zero_extended = matches!(
            self.opcode,
            opcodes::OP_ANDI | opcodes::OP_ORI | opcodes::OP_XORI | opcodes::OP_LUI
        );
        if zero_extended {
            i32::from(self.immediate)
        } else {
            i32::from(self.immediate as i16)
        }
    }
}
