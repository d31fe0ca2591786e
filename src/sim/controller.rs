//! The simulation controller.
//!
//! Owns the run: the decoded instruction list, the scheduler, and the
//! append-only snapshot history. The history outlives any consumer of
//! the read-only view and empties only on an explicit reset, so a front
//! end can detach and reattach without losing cycles. All stepping is
//! synchronous and single-threaded; callers that share a controller
//! serialize access themselves.

use std::collections::BTreeMap;

use crate::common::error::ValidationError;
use crate::config::Config;
use crate::core::scheduler::{InstrState, Scheduler};
use crate::core::snapshot::{CycleSnapshot, ForwardingPath, HazardKind, HazardRecord, Stage};
use crate::core::usage::{self, RegisterUsage};
use crate::isa::decode;
use crate::isa::instruction::Instruction;
use crate::stats::SimStats;

/// One validated simulation run.
///
/// Created whole by `start()` and never partially valid: validation
/// failures leave the controller without a run.
#[derive(Debug, Clone)]
pub struct SimulationRun {
    words: Vec<String>,
    instructions: Vec<Instruction>,
    usage: Vec<RegisterUsage>,
    scheduler: Scheduler,
    history: Vec<CycleSnapshot>,
    max_cycles: u64,
    seen_raw: Vec<bool>,
    seen_waw: Vec<bool>,
}

/// Orchestrates cycle advancement and owns the snapshot history.
#[derive(Debug)]
pub struct SimulationController {
    forwarding: bool,
    max_cycle_cap: u64,
    run: Option<SimulationRun>,
    stats: SimStats,
}

impl SimulationController {
    pub fn new(config: &Config) -> Self {
        Self {
            forwarding: config.pipeline.forwarding,
            max_cycle_cap: config.run.max_cycle_cap,
            run: None,
            stats: SimStats::default(),
        }
    }

    /// Validates a word list and begins a new run at cycle 1.
    ///
    /// Any previous run is discarded first. Fails on an empty list or on
    /// any word that does not decode; on failure the controller is left
    /// with no run at all.
    pub fn start(&mut self, words: &[String]) -> Result<(), ValidationError> {
        self.reset();

        if words.is_empty() {
            return Err(ValidationError::EmptyProgram);
        }

        let mut instructions = Vec::with_capacity(words.len());
        for (index, word) in words.iter().enumerate() {
            let inst = decode::parse_word(index, word)
                .map_err(|source| ValidationError::BadWord { index, source })?;
            instructions.push(inst);
        }
        let usage: Vec<RegisterUsage> = instructions.iter().map(usage::analyze).collect();

        let scheduler = Scheduler::new(instructions.len(), self.forwarding);
        let max_cycles = probe_run_length(&scheduler, &instructions, &usage, self.max_cycle_cap);

        let count = instructions.len();
        let mut run = SimulationRun {
            words: words.to_vec(),
            instructions,
            usage,
            scheduler,
            history: Vec::new(),
            max_cycles,
            seen_raw: vec![false; count],
            seen_waw: vec![false; count],
        };

        let first = run.scheduler.snapshot(&run.instructions, &run.usage);
        account_snapshot(&mut self.stats, &mut run, &first);
        run.history.push(first);
        update_progress(&mut self.stats, &run);

        self.run = Some(run);
        Ok(())
    }

    /// Advances exactly one cycle and returns the new snapshot.
    ///
    /// A no-op returning the terminal snapshot once the run is finished,
    /// and `None` before any run has started.
    pub fn step(&mut self) -> Option<&CycleSnapshot> {
        let run = self.run.as_mut()?;
        if !run.scheduler.is_finished() {
            run.scheduler.advance(&run.instructions, &run.usage);
            let snap = run.scheduler.snapshot(&run.instructions, &run.usage);
            account_snapshot(&mut self.stats, run, &snap);
            run.history.push(snap);
            update_progress(&mut self.stats, run);
        }
        run.history.last()
    }

    /// Steps until the run finishes, bounded by the configured cycle cap.
    pub fn run_to_completion(&mut self) -> Option<&CycleSnapshot> {
        while self.is_running() && self.current_cycle() < self.max_cycle_cap {
            self.step();
        }
        self.snapshot()
    }

    /// Drops the run and its history, returning to the pre-start state.
    pub fn reset(&mut self) {
        self.run = None;
        self.stats = SimStats::default();
    }

    pub fn is_running(&self) -> bool {
        match &self.run {
            Some(run) => !run.scheduler.is_finished(),
            None => false,
        }
    }

    pub fn is_finished(&self) -> bool {
        match &self.run {
            Some(run) => run.scheduler.is_finished(),
            None => false,
        }
    }

    /// Current cycle number, 0 before a run starts.
    pub fn current_cycle(&self) -> u64 {
        self.run.as_ref().map_or(0, |run| run.scheduler.cycle())
    }

    /// Total cycles this run will take, computed exactly at start.
    pub fn max_cycles(&self) -> u64 {
        self.run.as_ref().map_or(0, |run| run.max_cycles)
    }

    /// The word list as submitted, original spelling preserved.
    pub fn instructions(&self) -> &[String] {
        self.run.as_ref().map_or(&[], |run| &run.words)
    }

    pub fn decoded(&self) -> &[Instruction] {
        self.run.as_ref().map_or(&[], |run| &run.instructions)
    }

    pub fn register_usage(&self) -> &[RegisterUsage] {
        self.run.as_ref().map_or(&[], |run| &run.usage)
    }

    /// Instruction index to current stage, in-flight instructions only.
    pub fn instruction_stages(&self) -> BTreeMap<usize, Stage> {
        let mut stages = BTreeMap::new();
        if let Some(run) = &self.run {
            for (index, state) in run.scheduler.states().iter().enumerate() {
                if let InstrState::InStage(stage) = state {
                    stages.insert(index, *stage);
                }
            }
        }
        stages
    }

    pub fn snapshot(&self) -> Option<&CycleSnapshot> {
        self.run.as_ref().and_then(|run| run.history.last())
    }

    /// The full append-only snapshot history, cycle 1 onward.
    pub fn history(&self) -> &[CycleSnapshot] {
        self.run.as_ref().map_or(&[], |run| &run.history)
    }

    /// Total stall cycles charged per instruction over the whole run so
    /// far. Instructions with no stalls are absent.
    pub fn cumulative_stalls(&self) -> BTreeMap<usize, u32> {
        let mut totals = BTreeMap::new();
        if let Some(run) = &self.run {
            for (index, &total) in run.scheduler.stall_totals().iter().enumerate() {
                if total > 0 {
                    totals.insert(index, total);
                }
            }
        }
        totals
    }

    /// Every bypass taken over the run so far, keyed by consumer.
    pub fn cumulative_forwardings(&self) -> BTreeMap<usize, Vec<ForwardingPath>> {
        let mut merged: BTreeMap<usize, Vec<ForwardingPath>> = BTreeMap::new();
        for snap in self.history() {
            for (consumer, paths) in &snap.forwardings {
                merged.entry(*consumer).or_default().extend(paths.iter().copied());
            }
        }
        merged
    }

    /// The latest non-clear hazard verdict per instruction, i.e. how each
    /// hazard ultimately resolved.
    pub fn cumulative_hazards(&self) -> BTreeMap<usize, HazardRecord> {
        let mut latest = BTreeMap::new();
        for snap in self.history() {
            for (consumer, record) in &snap.hazards {
                if record.kind != HazardKind::None {
                    latest.insert(*consumer, record.clone());
                }
            }
        }
        latest
    }

    pub fn stats(&self) -> &SimStats {
        &self.stats
    }
}

/// Replays a copy of the freshly built scheduler to completion to learn
/// the exact run length. The copy shares the real hazard logic, so the
/// prediction cannot drift from the actual run.
fn probe_run_length(
    scheduler: &Scheduler,
    instructions: &[Instruction],
    usage: &[RegisterUsage],
    cap: u64,
) -> u64 {
    let mut probe = scheduler.clone();
    while !probe.is_finished() && probe.cycle() < cap {
        probe.advance(instructions, usage);
    }
    probe.cycle()
}

fn account_snapshot(stats: &mut SimStats, run: &mut SimulationRun, snap: &CycleSnapshot) {
    for (consumer, record) in &snap.hazards {
        if record.kind == HazardKind::Raw && !run.seen_raw[*consumer] {
            run.seen_raw[*consumer] = true;
            stats.raw_hazards += 1;
        }
        // The overlap set, not the verdict: a consumer classified RAW can
        // still rewrite an in-flight destination.
        if !record.waw_registers.is_empty() && !run.seen_waw[*consumer] {
            run.seen_waw[*consumer] = true;
            stats.waw_hazards += 1;
        }
    }
    stats.forwards_taken += snap
        .forwardings
        .values()
        .map(|paths| paths.len() as u64)
        .sum::<u64>();
}

fn update_progress(stats: &mut SimStats, run: &SimulationRun) {
    stats.cycles = run.scheduler.cycle();
    stats.stall_cycles = run
        .scheduler
        .stall_totals()
        .iter()
        .map(|&n| u64::from(n))
        .sum();

    let mut retired = run
        .scheduler
        .states()
        .iter()
        .filter(|state| **state == InstrState::Retired)
        .count() as u64;
    if run.scheduler.is_finished() {
        if let Some(InstrState::InStage(Stage::Wb)) = run.scheduler.states().last() {
            retired += 1;
        }
    }
    stats.instructions_retired = retired;
}
