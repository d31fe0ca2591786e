//! Per-cycle snapshot types.
//!
//! A [`CycleSnapshot`] is the complete externally observable state at one
//! cycle. Snapshots are immutable once produced and are appended to an
//! ordered history; replaying a fixed instruction sequence reproduces the
//! same snapshot sequence byte for byte. All maps are `BTreeMap` so that
//! serialization order is stable.

use std::collections::BTreeMap;

use serde::Serialize;

/// The five pipeline stages, in flow order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Stage {
    If = 0,
    Id = 1,
    Ex = 2,
    Mem = 3,
    Wb = 4,
}

impl Stage {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::If => "IF",
            Stage::Id => "ID",
            Stage::Ex => "EX",
            Stage::Mem => "MEM",
            Stage::Wb => "WB",
        }
    }

    pub fn from_index(index: usize) -> Option<Stage> {
        match index {
            0 => Some(Stage::If),
            1 => Some(Stage::Id),
            2 => Some(Stage::Ex),
            3 => Some(Stage::Mem),
            4 => Some(Stage::Wb),
            _ => None,
        }
    }
}

/// Hazard classification for the instruction sitting in ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HazardKind {
    /// No conflicting in-flight instruction.
    None,
    /// Read-after-write: an operand is written by an older in-flight
    /// instruction.
    Raw,
    /// Write-after-write: the destination is also written by an older
    /// in-flight instruction. Informational, never stalls.
    Waw,
}

/// The hazard analysis result for one consumer instruction at one cycle.
///
/// Computed fresh every cycle from the current stage occupancy; a record
/// persists only through the snapshot history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HazardRecord {
    pub kind: HazardKind,
    /// Conflicted register indices, ascending, deduplicated.
    pub registers: Vec<u8>,
    /// Registers this consumer writes that an older in-flight
    /// instruction also writes. Carried whatever the classification, so
    /// a write-write overlap stays visible when RAW wins the verdict.
    pub waw_registers: Vec<u8>,
    /// Human-readable summary naming the instructions involved.
    pub description: String,
    /// Whether the bypass network covers every conflict without stalling.
    pub can_forward: bool,
    /// Stall cycles still required as of this cycle. Zero when forwarded
    /// or when the register file supplies the value in time.
    pub stall_cycles: u32,
}

impl HazardRecord {
    /// The record emitted when the ID instruction has no conflicts.
    pub fn clear() -> Self {
        Self {
            kind: HazardKind::None,
            registers: Vec::new(),
            waw_registers: Vec::new(),
            description: "no hazard".to_string(),
            can_forward: false,
            stall_cycles: 0,
        }
    }
}

/// One active bypass: a value moving from the producer's result stage to
/// the consumer's need stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ForwardingPath {
    /// Producer instruction index.
    pub from: usize,
    /// Consumer instruction index.
    pub to: usize,
    /// Stage that computes the value: EX for arithmetic, MEM for loads.
    pub from_stage: Stage,
    /// Stage that consumes the value: EX for operands, MEM for store data.
    pub to_stage: Stage,
    /// The register carrying the dependency.
    pub register: u8,
}

/// The externally observable state at one cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleSnapshot {
    /// Cycle number, starting at 1.
    pub cycle: u64,
    /// Instruction index to occupied stage, in-flight instructions only.
    pub stages: BTreeMap<usize, Stage>,
    /// Fresh hazard analysis for the instruction in ID, keyed by its index.
    pub hazards: BTreeMap<usize, HazardRecord>,
    /// Bypasses resolving this cycle, keyed by consumer index.
    pub forwardings: BTreeMap<usize, Vec<ForwardingPath>>,
    /// Cumulative stall cycles charged through this cycle, per instruction.
    pub stalls: BTreeMap<usize, u32>,
}
