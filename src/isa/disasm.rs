//! Minimal MIPS disassembler.
//!
//! Renders the mnemonic forms used in trace output, the pipeline
//! timeline, and hazard descriptions. Words outside the modeled subset
//! render as `.word 0x…` rather than failing.

use crate::common::reg;
use crate::isa::instruction::{Instruction, InstructionClass};
use crate::isa::opcodes::*;

/// Renders one instruction as assembly text.
pub fn render(inst: &Instruction) -> String {
    if inst.is_nop() {
        return "nop".to_string();
    }

    match inst.class() {
        InstructionClass::Arithmetic => render_rtype(inst),
        InstructionClass::ImmArithmetic => render_imm(inst),
        InstructionClass::Load | InstructionClass::Store => format!(
            "{} {}, {}({})",
            mem_mnemonic(inst.opcode),
            reg::name(inst.rt),
            inst.imm_value(),
            reg::name(inst.rs)
        ),
        InstructionClass::Branch => format!(
            "{} {}, {}, {}",
            if inst.opcode == OP_BEQ { "beq" } else { "bne" },
            reg::name(inst.rs),
            reg::name(inst.rt),
            inst.imm_value()
        ),
        InstructionClass::Other => match inst.opcode {
            OP_J => format!("j 0x{:x}", inst.word & 0x03ff_ffff),
            OP_JAL => format!("jal 0x{:x}", inst.word & 0x03ff_ffff),
            _ => format!(".word 0x{:08x}", inst.word),
        },
    }
}

fn render_rtype(inst: &Instruction) -> String {
    match inst.funct {
        FUNCT_SLL | FUNCT_SRL | FUNCT_SRA => {
            let m = match inst.funct {
                FUNCT_SLL => "sll",
                FUNCT_SRL => "srl",
                _ => "sra",
            };
            format!(
                "{} {}, {}, {}",
                m,
                reg::name(inst.rd),
                reg::name(inst.rt),
                inst.shamt
            )
        }
        FUNCT_JR => format!("jr {}", reg::name(inst.rs)),
        _ => {
            let m = match inst.funct {
                FUNCT_ADD => "add",
                FUNCT_ADDU => "addu",
                FUNCT_SUB => "sub",
                FUNCT_SUBU => "subu",
                FUNCT_AND => "and",
                FUNCT_OR => "or",
                FUNCT_XOR => "xor",
                FUNCT_NOR => "nor",
                FUNCT_SLT => "slt",
                FUNCT_SLTU => "sltu",
                _ => return format!(".word 0x{:08x}", inst.word),
            };
            format!(
                "{} {}, {}, {}",
                m,
                reg::name(inst.rd),
                reg::name(inst.rs),
                reg::name(inst.rt)
            )
        }
    }
}

fn render_imm(inst: &Instruction) -> String {
    let m = match inst.opcode {
        OP_ADDI => "addi",
        OP_ADDIU => "addiu",
        OP_SLTI => "slti",
        OP_SLTIU => "sltiu",
        OP_ANDI => "andi",
        OP_ORI => "ori",
        OP_XORI => "xori",
        OP_LUI => "lui",
        _ => return format!(".word 0x{:08x}", inst.word),
    };
    if inst.opcode == OP_LUI {
        format!("{} {}, 0x{:x}", m, reg::name(inst.rt), inst.immediate)
    } else {
        format!(
            "{} {}, {}, {}",
            m,
            reg::name(inst.rt),
            reg::name(inst.rs),
            inst.imm_value()
        )
    }
}

fn mem_mnemonic(opcode: u8) -> &'static str {
    match opcode {
        OP_LB => "lb",
        OP_LH => "lh",
        OP_LWL => "lwl",
        OP_LW => "lw",
        OP_LBU => "lbu",
        OP_LHU => "lhu",
        OP_LWR => "lwr",
        OP_SB => "sb",
        OP_SH => "sh",
        OP_SWL => "swl",
        _ => "sw",
    }
}
