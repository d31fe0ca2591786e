//! Register usage analysis.
//!
//! Derives the read and write sets per instruction, with the hardwired
//! zero register stripped from both. These sets are the sole input the
//! hazard detector needs beyond stage occupancy.

use std::fmt;

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use crate::common::reg;
use crate::isa::instruction::{Instruction, InstructionClass};

/// A set of register indices, backed by a 32-bit mask.
///
/// Iteration order is ascending register index, which keeps every
/// serialized form and description deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegSet(u32);

impl RegSet {
    pub const EMPTY: RegSet = RegSet(0);

    pub fn insert(&mut self, index: u8) {
        self.0 |= 1 << (index & 0x1f);
    }

    pub fn remove(&mut self, index: u8) {
        self.0 &= !(1 << (index & 0x1f));
    }

    pub fn contains(&self, index: u8) -> bool {
        self.0 & (1 << (index & 0x1f)) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn intersection(&self, other: RegSet) -> RegSet {
        RegSet(self.0 & other.0)
    }

    /// Ascending register indices present in the set.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        let bits = self.0;
        (0u8..32).filter(move |i| bits & (1 << i) != 0)
    }
}

impl fmt::Display for RegSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.iter().map(reg::name).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

impl Serialize for RegSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for index in self.iter() {
            seq.serialize_element(&index)?;
        }
        seq.end()
    }
}

/// Source and destination registers of one instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegisterUsage {
    pub reads: RegSet,
    pub writes: RegSet,
    pub is_load: bool,
    pub opcode: u8,
}

/// Derives the register usage of one instruction. Pure.
///
/// Stores and branches never write a register. Register 0 is excluded
/// from both sets unconditionally, so writes to `$zero` (the canonical
/// `nop` included) vanish here and can never participate in a hazard.
pub fn analyze(inst: &Instruction) -> RegisterUsage {
    let mut reads = RegSet::EMPTY;
    let mut writes = RegSet::EMPTY;

    match inst.class() {
        InstructionClass::Arithmetic => {
            reads.insert(inst.rs);
            reads.insert(inst.rt);
            writes.insert(inst.rd);
        }
        InstructionClass::ImmArithmetic => {
            reads.insert(inst.rs);
            writes.insert(inst.rt);
        }
        InstructionClass::Load => {
            reads.insert(inst.rs);
            writes.insert(inst.rt);
        }
        InstructionClass::Store | InstructionClass::Branch => {
            reads.insert(inst.rs);
            reads.insert(inst.rt);
        }
        InstructionClass::Other => {}
    }

    reads.remove(reg::ZERO);
    writes.remove(reg::ZERO);

    RegisterUsage {
        reads,
        writes,
        is_load: inst.is_load(),
        opcode: inst.opcode,
    }
}
