//! Data hazard detection and stall arithmetic.
//!
//! Each cycle the detector examines the instruction occupying ID (the
//! consumer) against every older instruction still in flight. A RAW
//! conflict exists when an older writer targets one of the consumer's
//! operand registers; per register the source is the most recently
//! issued writer, since that is the value the consumer will actually
//! observe. WAW overlaps are reported for visualization, alongside the
//! RAW verdict when both apply, but never stall and never forward.
//!
//! Stall counts fall out of stage timing. The producer's result exists
//! at the end of its result stage (EX for arithmetic, MEM for loads);
//! the consumer needs the value entering its need stage (EX for
//! operands and branch compares, MEM for store data). With the bypass
//! network the value crosses one pipeline register; without it the
//! value takes the long way through the register file.

use std::collections::BTreeMap;

use crate::common::reg;
use crate::core::forwarding;
use crate::core::snapshot::{ForwardingPath, HazardKind, HazardRecord, Stage};
use crate::core::usage::RegisterUsage;
use crate::isa::disasm;
use crate::isa::instruction::{Instruction, InstructionClass};

/// One read-after-write conflict between the ID consumer and an older
/// in-flight producer.
#[derive(Debug, Clone, Copy)]
pub struct RawConflict {
    pub register: u8,
    pub producer: usize,
    pub producer_stage: Stage,
    /// Stage that computes the producer's value.
    pub result_stage: Stage,
    /// Stage where the consumer first needs the value.
    pub need_stage: Stage,
    /// Stall cycles required as of this cycle.
    pub stall_cycles: u32,
}

/// Hazard analysis output for one cycle of stage occupancy.
#[derive(Debug, Clone, Default)]
pub struct CycleAnalysis {
    pub hazards: BTreeMap<usize, HazardRecord>,
    pub forwardings: BTreeMap<usize, Vec<ForwardingPath>>,
    /// Whether the ID instruction must hold for this cycle.
    pub id_stall: bool,
}

/// Registers an instruction reads, each paired with the stage that first
/// consumes it. Store data is not needed until MEM; every other operand
/// is needed entering EX. The zero register never appears, and a
/// register read twice keeps its earliest need.
pub fn read_needs(inst: &Instruction) -> Vec<(u8, Stage)> {
    let mut needs = Vec::new();
    match inst.class() {
        InstructionClass::Arithmetic | InstructionClass::Branch => {
            push_need(&mut needs, inst.rs, Stage::Ex);
            push_need(&mut needs, inst.rt, Stage::Ex);
        }
        InstructionClass::ImmArithmetic | InstructionClass::Load => {
            push_need(&mut needs, inst.rs, Stage::Ex);
        }
        InstructionClass::Store => {
            push_need(&mut needs, inst.rs, Stage::Ex);
            push_need(&mut needs, inst.rt, Stage::Mem);
        }
        InstructionClass::Other => {}
    }
    needs
}

fn push_need(needs: &mut Vec<(u8, Stage)>, register: u8, stage: Stage) {
    if register == reg::ZERO {
        return;
    }
    if needs.iter().any(|(seen, _)| *seen == register) {
        return;
    }
    needs.push((register, stage));
}

/// Stage whose completion produces the instruction's result.
pub fn result_stage(usage: &RegisterUsage) -> Stage {
    if usage.is_load {
        Stage::Mem
    } else {
        Stage::Ex
    }
}

/// Stall cycles with the bypass network present.
///
/// A result computed at the end of cycle `c` crosses one pipeline
/// register and is usable by a stage executing in cycle `c + 1` or
/// later. The consumer reaches its need stage one cycle after leaving
/// ID per intervening stage; whatever gap remains is spent stalled.
pub fn stall_cycles_forwarded(producer_stage: Stage, result: Stage, need: Stage) -> u32 {
    let ready = result.index() as i64 - producer_stage.index() as i64 + 1;
    let needed = need.index() as i64 - Stage::Id.index() as i64;
    (ready - needed).max(0) as u32
}

/// Stall cycles with no bypass network.
///
/// All operands come from the register file, read in the consumer's
/// final ID cycle. The file is written in the producer's WB cycle and a
/// same-cycle read observes the new value (write-first port), so the
/// consumer holds in ID until the producer reaches WB.
pub fn stall_cycles_plain(producer_stage: Stage) -> u32 {
    (Stage::Wb.index() - producer_stage.index()) as u32
}

/// Finds every RAW conflict for the consumer in ID.
pub fn detect_raw(
    consumer: usize,
    instructions: &[Instruction],
    usage: &[RegisterUsage],
    stages: &[Option<Stage>],
    forwarding_enabled: bool,
) -> Vec<RawConflict> {
    let mut conflicts = Vec::new();
    for (register, need_stage) in read_needs(&instructions[consumer]) {
        for producer in (0..consumer).rev() {
            let stage = match stages[producer] {
                Some(stage) => stage,
                None => continue,
            };
            if !usage[producer].writes.contains(register) {
                continue;
            }
            let result = result_stage(&usage[producer]);
            let stall_cycles = if forwarding_enabled {
                stall_cycles_forwarded(stage, result, need_stage)
            } else {
                stall_cycles_plain(stage)
            };
            conflicts.push(RawConflict {
                register,
                producer,
                producer_stage: stage,
                result_stage: result,
                need_stage,
                stall_cycles,
            });
            break;
        }
    }
    conflicts
}

/// Finds write-after-write overlaps between the ID consumer and older
/// in-flight writers. One entry per register, most recent writer wins.
pub fn detect_waw(
    consumer: usize,
    usage: &[RegisterUsage],
    stages: &[Option<Stage>],
) -> Vec<(u8, usize)> {
    let mut overlaps = Vec::new();
    for register in usage[consumer].writes.iter() {
        for producer in (0..consumer).rev() {
            if stages[producer].is_none() {
                continue;
            }
            if usage[producer].writes.contains(register) {
                overlaps.push((register, producer));
                break;
            }
        }
    }
    overlaps
}

/// Runs hazard analysis for one cycle of stage occupancy.
///
/// A record is emitted for the instruction occupying ID, if any. RAW
/// classification takes priority over WAW when both apply, since RAW is
/// the case that affects timing; the write-write overlap still lands in
/// the record's `waw_registers` so it is never lost to the verdict. With
/// no conflict at all a clear record is emitted so every decoded
/// consumer carries a fresh verdict.
pub fn analyze_cycle(
    instructions: &[Instruction],
    usage: &[RegisterUsage],
    stages: &[Option<Stage>],
    forwarding_enabled: bool,
) -> CycleAnalysis {
    let mut analysis = CycleAnalysis::default();
    let consumer = match stages.iter().position(|s| *s == Some(Stage::Id)) {
        Some(index) => index,
        None => return analysis,
    };

    let raw = detect_raw(consumer, instructions, usage, stages, forwarding_enabled);
    let waw = detect_waw(consumer, usage, stages);
    let record = if raw.is_empty() {
        if waw.is_empty() {
            HazardRecord::clear()
        } else {
            waw_record(instructions, &waw)
        }
    } else {
        let record = raw_record(instructions, &raw, &waw, forwarding_enabled);
        if record.can_forward {
            analysis
                .forwardings
                .insert(consumer, forwarding::paths_for(consumer, &raw));
        }
        analysis.id_stall = record.stall_cycles > 0;
        record
    };
    analysis.hazards.insert(consumer, record);
    analysis
}

fn raw_record(
    instructions: &[Instruction],
    conflicts: &[RawConflict],
    overlaps: &[(u8, usize)],
    forwarding_enabled: bool,
) -> HazardRecord {
    let stall_cycles = conflicts.iter().map(|c| c.stall_cycles).max().unwrap_or(0);
    let can_forward = forwarding::is_resolvable(conflicts, forwarding_enabled);

    let mut registers: Vec<u8> = conflicts.iter().map(|c| c.register).collect();
    registers.sort_unstable();
    registers.dedup();

    let sources: Vec<String> = conflicts
        .iter()
        .map(|c| {
            format!(
                "{} from #{} ({})",
                reg::name(c.register),
                c.producer,
                disasm::render(&instructions[c.producer])
            )
        })
        .collect();
    let resolution = if can_forward {
        "resolved by forwarding".to_string()
    } else if stall_cycles > 0 {
        format!(
            "requires {} stall {}",
            stall_cycles,
            if stall_cycles == 1 { "cycle" } else { "cycles" }
        )
    } else {
        "resolved at write-back".to_string()
    };
    let mut description = format!("RAW: {}; {}", sources.join(", "), resolution);
    if !overlaps.is_empty() {
        description.push_str(&format!(
            "; WAW: {}",
            waw_sources(instructions, overlaps).join(", ")
        ));
    }

    HazardRecord {
        kind: HazardKind::Raw,
        registers,
        waw_registers: overlap_registers(overlaps),
        description,
        can_forward,
        stall_cycles,
    }
}

fn waw_record(instructions: &[Instruction], overlaps: &[(u8, usize)]) -> HazardRecord {
    let registers = overlap_registers(overlaps);

    HazardRecord {
        kind: HazardKind::Waw,
        registers: registers.clone(),
        waw_registers: registers,
        description: format!("WAW: {}", waw_sources(instructions, overlaps).join(", ")),
        can_forward: false,
        stall_cycles: 0,
    }
}

fn overlap_registers(overlaps: &[(u8, usize)]) -> Vec<u8> {
    let mut registers: Vec<u8> = overlaps.iter().map(|(r, _)| *r).collect();
    registers.sort_unstable();
    registers.dedup();
    registers
}

fn waw_sources(instructions: &[Instruction], overlaps: &[(u8, usize)]) -> Vec<String> {
    overlaps
        .iter()
        .map(|(register, producer)| {
            format!(
                "{} also written by #{} ({})",
                reg::name(*register),
                producer,
                disasm::render(&instructions[*producer])
            )
        })
        .collect()
}
