//! MIPS opcode and function-code constants.

pub const OP_RTYPE: u8 = 0x00;
pub const OP_J: u8 = 0x02;
pub const OP_JAL: u8 = 0x03;
pub const OP_BEQ: u8 = 0x04;
pub const OP_BNE: u8 = 0x05;

pub const OP_ADDI: u8 = 0x08;
pub const OP_ADDIU: u8 = 0x09;
pub const OP_SLTI: u8 = 0x0a;
pub const OP_SLTIU: u8 = 0x0b;
pub const OP_ANDI: u8 = 0x0c;
pub const OP_ORI: u8 = 0x0d;
pub const OP_XORI: u8 = 0x0e;
pub const OP_LUI: u8 = 0x0f;

pub const OP_LB: u8 = 0x20;
pub const OP_LH: u8 = 0x21;
pub const OP_LWL: u8 = 0x22;
pub const OP_LW: u8 = 0x23;
pub const OP_LBU: u8 = 0x24;
pub const OP_LHU: u8 = 0x25;
pub const OP_LWR: u8 = 0x26;

pub const OP_SB: u8 = 0x28;
pub const OP_SH: u8 = 0x29;
pub const OP_SWL: u8 = 0x2a;
pub const OP_SW: u8 = 0x2b;

pub const FUNCT_SLL: u8 = 0x00;
pub const FUNCT_SRL: u8 = 0x02;
pub const FUNCT_SRA: u8 = 0x03;
pub const FUNCT_JR: u8 = 0x08;
pub const FUNCT_ADD: u8 = 0x20;
pub const FUNCT_ADDU: u8 = 0x21;
pub const FUNCT_SUB: u8 = 0x22;
pub const FUNCT_SUBU: u8 = 0x23;
pub const FUNCT_AND: u8 = 0x24;
pub const FUNCT_OR: u8 = 0x25;
pub const FUNCT_XOR: u8 = 0x26;
pub const FUNCT_NOR: u8 = 0x27;
pub const FUNCT_SLT: u8 = 0x2a;
pub const FUNCT_SLTU: u8 = 0x2b;

/// Inclusive load opcode range (`lb` through `lwr`).
pub fn is_load_opcode(op: u8) -> bool {
    (OP_LB..=OP_LWR).contains(&op)
}

/// Inclusive store opcode range (`sb` through `sw`).
pub fn is_store_opcode(op: u8) -> bool {
    (OP_SB..=OP_SW).contains(&op)
}

/// Conditional branch opcodes (`beq`, `bne`).
pub fn is_branch_opcode(op: u8) -> bool {
    op == OP_BEQ || op == OP_BNE
}

/// Immediate-arithmetic opcode range (`addi` through `lui`).
pub fn is_imm_arith_opcode(op: u8) -> bool {
    (OP_ADDI..=OP_LUI).contains(&op)
}
