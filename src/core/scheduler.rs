//! The per-cycle stage state machine.
//!
//! Each instruction moves through `NotIssued -> IF -> ID -> EX -> MEM ->
//! WB -> Retired`. One advance call is one cycle: instructions are
//! processed oldest first, every stage holds at most one instruction,
//! and an instruction held in ID by a non-forwardable RAW conflict
//! blocks everything younger behind it. Only hazard stalls are charged
//! to the stall counters; an instruction waiting in IF behind a stalled
//! ID is visible through the stage map alone.
//!
//! Cycle numbering starts at 1 with the first instruction in IF. The
//! run terminates when the youngest instruction occupies WB: nothing is
//! left to simulate beyond that cycle, so the terminal snapshot shows
//! the final write-back rather than an empty pipeline.

use std::collections::BTreeMap;

use crate::core::hazards;
use crate::core::snapshot::{CycleSnapshot, Stage};
use crate::core::usage::RegisterUsage;
use crate::isa::instruction::Instruction;

/// Lifecycle position of one instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstrState {
    NotIssued,
    InStage(Stage),
    Retired,
}

/// The pipeline occupancy state machine for one run.
#[derive(Debug, Clone)]
pub struct Scheduler {
    forwarding: bool,
    cycle: u64,
    next_issue: usize,
    states: Vec<InstrState>,
    stall_totals: Vec<u32>,
}

impl Scheduler {
    /// Creates the cycle-1 state: the first instruction in IF, the rest
    /// not yet issued.
    pub fn new(count: usize, forwarding: bool) -> Self {
        let mut states = vec![InstrState::NotIssued; count];
        let mut next_issue = 0;
        if let Some(first) = states.first_mut() {
            *first = InstrState::InStage(Stage::If);
            next_issue = 1;
        }
        Self {
            forwarding,
            cycle: 1,
            next_issue,
            states,
            stall_totals: vec![0; count],
        }
    }

    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn forwarding(&self) -> bool {
        self.forwarding
    }

    pub fn states(&self) -> &[InstrState] {
        &self.states
    }

    /// Cumulative hazard-stall cycles charged per instruction.
    pub fn stall_totals(&self) -> &[u32] {
        &self.stall_totals
    }

    /// Per-instruction stage, `None` when not in flight.
    pub fn stage_view(&self) -> Vec<Option<Stage>> {
        self.states
            .iter()
            .map(|state| match state {
                InstrState::InStage(stage) => Some(*stage),
                _ => None,
            })
            .collect()
    }

    /// Index of the instruction occupying a stage, if any.
    pub fn occupant(&self, stage: Stage) -> Option<usize> {
        self.states
            .iter()
            .position(|state| *state == InstrState::InStage(stage))
    }

    /// True once the youngest instruction has reached WB or beyond.
    /// In-order flow guarantees everything older has already retired.
    pub fn is_finished(&self) -> bool {
        match self.states.last() {
            Some(InstrState::Retired) | Some(InstrState::InStage(Stage::Wb)) => true,
            Some(_) => false,
            None => true,
        }
    }

    /// Advances every instruction by one cycle.
    ///
    /// The hazard verdict is taken on the occupancy as it stands at the
    /// start of the cycle; transitions then run oldest to youngest so
    /// each stage is vacated before its successor arrives. A no-op once
    /// the run is finished.
    pub fn advance(&mut self, instructions: &[Instruction], usage: &[RegisterUsage]) {
        if self.is_finished() {
            return;
        }

        let analysis =
            hazards::analyze_cycle(instructions, usage, &self.stage_view(), self.forwarding);
        let held = analysis.id_stall;

        if let Some(i) = self.occupant(Stage::Wb) {
            self.states[i] = InstrState::Retired;
        }
        if let Some(i) = self.occupant(Stage::Mem) {
            self.states[i] = InstrState::InStage(Stage::Wb);
        }
        if let Some(i) = self.occupant(Stage::Ex) {
            self.states[i] = InstrState::InStage(Stage::Mem);
        }

        let id_occupant = self.occupant(Stage::Id);
        if let Some(i) = id_occupant {
            if held {
                self.stall_totals[i] += 1;
            } else {
                self.states[i] = InstrState::InStage(Stage::Ex);
            }
        }
        let id_free = id_occupant.is_none() || !held;

        let if_occupant = self.occupant(Stage::If);
        if let Some(i) = if_occupant {
            if id_free {
                self.states[i] = InstrState::InStage(Stage::Id);
            }
        }
        let if_free = if_occupant.is_none() || id_free;

        if if_free && self.next_issue < self.states.len() {
            self.states[self.next_issue] = InstrState::InStage(Stage::If);
            self.next_issue += 1;
        }

        self.cycle += 1;
    }

    /// Assembles the immutable snapshot of the current cycle, with the
    /// hazard analysis recomputed on the occupancy as it now stands.
    pub fn snapshot(&self, instructions: &[Instruction], usage: &[RegisterUsage]) -> CycleSnapshot {
        let analysis =
            hazards::analyze_cycle(instructions, usage, &self.stage_view(), self.forwarding);

        let mut stages = BTreeMap::new();
        for (index, state) in self.states.iter().enumerate() {
            if let InstrState::InStage(stage) = state {
                stages.insert(index, *stage);
            }
        }

        let mut stalls = BTreeMap::new();
        for (index, &total) in self.stall_totals.iter().enumerate() {
            if total > 0 {
                stalls.insert(index, total);
            }
        }

        CycleSnapshot {
            cycle: self.cycle,
            stages,
            hazards: analysis.hazards,
            forwardings: analysis.forwardings,
            stalls,
        }
    }
}
