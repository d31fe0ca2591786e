//! Tests for hex-word parsing, field extraction, and disassembly.

use mips_pipeline_sim::common::error::DecodeError;
use mips_pipeline_sim::isa::decode;
use mips_pipeline_sim::isa::disasm;
use mips_pipeline_sim::isa::{Instruction, InstructionClass};

/// Encodes an R-type instruction word from its fields.
fn encode_rtype(rs: u8, rt: u8, rd: u8, shamt: u8, funct: u8) -> u32 {
    (u32::from(rs) << 21)
        | (u32::from(rt) << 16)
        | (u32::from(rd) << 11)
        | (u32::from(shamt) << 6)
        | u32::from(funct)
}

/// Encodes an I-type instruction word from its fields.
fn encode_itype(opcode: u8, rs: u8, rt: u8, imm: u16) -> u32 {
    (u32::from(opcode) << 26) | (u32::from(rs) << 21) | (u32::from(rt) << 16) | u32::from(imm)
}

/// Tests field extraction for a load word.
#[test]
fn test_decode_lw_fields() {
    let inst = decode::parse_word(0, "0x8e110000").unwrap();
    assert_eq!(inst.opcode, 0x23, "lw opcode");
    assert_eq!(inst.rs, 16, "base register should be $s0");
    assert_eq!(inst.rt, 17, "destination should be $s1");
    assert_eq!(inst.immediate, 0, "offset should be 0");
    assert_eq!(inst.class(), InstructionClass::Load);
    assert!(inst.is_load(), "lw should classify as a load");
}

/// Tests field extraction for an R-type add word.
#[test]
fn test_decode_add_fields() {
    let inst = decode::parse_word(0, "0x00640820").unwrap();
    assert_eq!(inst.opcode, 0x00, "R-type opcode");
    assert_eq!(inst.rs, 3, "first source should be $v1");
    assert_eq!(inst.rt, 4, "second source should be $a0");
    assert_eq!(inst.rd, 1, "destination should be $at");
    assert_eq!(inst.funct, 0x20, "add function code");
    assert_eq!(inst.class(), InstructionClass::Arithmetic);
}

/// Tests field extraction for a store word.
#[test]
fn test_decode_sw_fields() {
    let inst = decode::parse_word(0, "0xae120004").unwrap();
    assert_eq!(inst.opcode, 0x2b, "sw opcode");
    assert_eq!(inst.rs, 16, "base register should be $s0");
    assert_eq!(inst.rt, 18, "stored register should be $s2");
    assert_eq!(inst.immediate, 4, "offset should be 4");
    assert_eq!(inst.class(), InstructionClass::Store);
    assert!(inst.is_store(), "sw should classify as a store");
}

/// Tests field extraction for a branch word.
#[test]
fn test_decode_beq_fields() {
    let inst = decode::parse_word(0, "0x10800001").unwrap();
    assert_eq!(inst.opcode, 0x04, "beq opcode");
    assert_eq!(inst.rs, 4, "first compare operand should be $a0");
    assert_eq!(inst.rt, 0, "second compare operand should be $zero");
    assert_eq!(inst.imm_value(), 1, "branch offset should be 1");
    assert_eq!(inst.class(), InstructionClass::Branch);
    assert!(inst.is_branch(), "beq should classify as a branch");
}

/// Tests that all accepted spellings of a word decode identically.
#[test]
fn test_decode_prefix_forms() {
    let plain = decode::parse_word(0, "8e110000").unwrap();
    let lower = decode::parse_word(0, "0x8e110000").unwrap();
    let upper = decode::parse_word(0, "0X8E110000").unwrap();
    let padded = decode::parse_word(0, "  0x8e110000  ").unwrap();

    assert_eq!(plain.word, 0x8e110000, "bare digits should parse");
    assert_eq!(lower.word, plain.word, "0x prefix should parse");
    assert_eq!(upper.word, plain.word, "0X prefix and uppercase digits should parse");
    assert_eq!(padded.word, plain.word, "surrounding whitespace should be ignored");
}

/// Tests that the stored hex text is normalized to lowercase without prefix.
#[test]
fn test_decode_normalizes_raw_hex() {
    let inst = decode::parse_word(0, "0X8E110000").unwrap();
    assert_eq!(inst.raw_hex, "8e110000", "raw_hex should be normalized");
}

/// Tests rejection of a word with non-hex digits.
#[test]
fn test_decode_rejects_non_hex() {
    let err = decode::parse_word(0, "0xZZZZZZZZ").unwrap_err();
    assert_eq!(
        err,
        DecodeError::MalformedHex {
            word: "0xZZZZZZZZ".to_string()
        },
        "non-hex digits should be rejected with the original text"
    );
}

/// Tests rejection of words that are not exactly 8 digits.
#[test]
fn test_decode_rejects_wrong_length() {
    assert!(
        decode::parse_word(0, "0x1234567").is_err(),
        "7 digits should be rejected"
    );
    assert!(
        decode::parse_word(0, "0x123456789").is_err(),
        "9 digits should be rejected"
    );
    assert!(decode::parse_word(0, "").is_err(), "empty text should be rejected");
    assert!(decode::parse_word(0, "0x").is_err(), "bare prefix should be rejected");
}

/// Tests that the all-zero word is recognized as nop.
#[test]
fn test_decode_nop() {
    let inst = decode::parse_word(0, "0x00000000").unwrap();
    assert!(inst.is_nop(), "all-zero word should be nop");
    assert_eq!(disasm::render(&inst), "nop", "nop should render as nop");
}

/// Tests sign extension of memory and arithmetic immediates.
#[test]
fn test_decode_sign_extends_immediate() {
    let lw = Instruction::from_word(0, encode_itype(0x23, 16, 17, 0xfffc));
    assert_eq!(lw.imm_value(), -4, "load offset should sign-extend");

    let addi = Instruction::from_word(0, encode_itype(0x08, 8, 9, 0x8000));
    assert_eq!(addi.imm_value(), -32768, "addi immediate should sign-extend");
}

/// Tests zero extension of logical immediates.
#[test]
fn test_decode_zero_extends_logical_immediate() {
    let andi = Instruction::from_word(0, encode_itype(0x0c, 8, 9, 0x8000));
    assert_eq!(andi.imm_value(), 32768, "andi immediate should zero-extend");

    let ori = Instruction::from_word(0, encode_itype(0x0d, 8, 9, 0xffff));
    assert_eq!(ori.imm_value(), 65535, "ori immediate should zero-extend");
}

/// Tests that immediate arithmetic classifies separately from R-type.
#[test]
fn test_decode_imm_arithmetic_class() {
    let addi = Instruction::from_word(0, encode_itype(0x08, 16, 8, 4));
    assert_eq!(addi.class(), InstructionClass::ImmArithmetic);

    let lui = Instruction::from_word(0, encode_itype(0x0f, 0, 8, 0x1234));
    assert_eq!(lui.class(), InstructionClass::ImmArithmetic);
}

/// Tests that unmodeled words decode without failing and classify as Other.
#[test]
fn test_decode_unknown_word_is_other() {
    let inst = Instruction::from_word(0, 0xfc00_0000);
    assert_eq!(inst.class(), InstructionClass::Other);
    assert_eq!(
        disasm::render(&inst),
        ".word 0xfc000000",
        "unknown words should render as raw data"
    );
}

/// Tests the rendered text of common instructions.
#[test]
fn test_disasm_renders_mnemonics() {
    let lw = decode::parse_word(0, "0x8e110000").unwrap();
    assert_eq!(disasm::render(&lw), "lw $s1, 0($s0)");

    let sw = decode::parse_word(0, "0xae120004").unwrap();
    assert_eq!(disasm::render(&sw), "sw $s2, 4($s0)");

    let add = decode::parse_word(0, "0x00640820").unwrap();
    assert_eq!(disasm::render(&add), "add $at, $v1, $a0");

    let beq = decode::parse_word(0, "0x10800001").unwrap();
    assert_eq!(disasm::render(&beq), "beq $a0, $zero, 1");

    let or = decode::parse_word(0, "0x02108025").unwrap();
    assert_eq!(disasm::render(&or), "or $s0, $s0, $s0");
}

/// Tests rendering of shifts, jumps, and lui.
#[test]
fn test_disasm_renders_special_forms() {
    let sll = Instruction::from_word(0, encode_rtype(0, 9, 8, 2, 0x00));
    assert_eq!(disasm::render(&sll), "sll $t0, $t1, 2");

    let jr = Instruction::from_word(0, encode_rtype(31, 0, 0, 0, 0x08));
    assert_eq!(disasm::render(&jr), "jr $ra");

    let lui = Instruction::from_word(0, encode_itype(0x0f, 0, 8, 0x1234));
    assert_eq!(disasm::render(&lui), "lui $t0, 0x1234");

    let j = Instruction::from_word(0, (0x02 << 26) | 0x100);
    assert_eq!(disasm::render(&j), "j 0x100");
}

/// Tests that negative load offsets render with their sign.
#[test]
fn test_disasm_renders_negative_offset() {
    let lw = Instruction::from_word(0, encode_itype(0x23, 29, 8, 0xfffc));
    assert_eq!(disasm::render(&lw), "lw $t0, -4($sp)");
}
