//! MIPS Pipeline Simulator CLI.
//!
//! The main executable for the simulator. It handles command-line argument
//! parsing, program loading, and the main simulation loop.
//!
//! # Usage
//!
//! The simulator can run in two modes:
//! 1. **Demo Mode**: Without `--file`, runs the bundled demonstration program.
//! 2. **File Mode**: Loads a hex word list from a text file and simulates it.

use clap::Parser;
use serde::Serialize;
use std::{fs, process};

extern crate mips_pipeline_sim;

use mips_pipeline_sim::common::reg;
use mips_pipeline_sim::config::Config;
use mips_pipeline_sim::core::{CycleSnapshot, Stage};
use mips_pipeline_sim::isa::disasm;
use mips_pipeline_sim::sim::program;
use mips_pipeline_sim::sim::SimulationController;

/// Command-line arguments for the MIPS pipeline simulator.
///
/// Without `--file`, the bundled demo program runs; with it, a text file of
/// hex instruction words (one or more per line, `#` comments) is simulated.
#[derive(Parser, Debug)]
#[command(author, version, about = "MIPS 5-Stage Pipeline Simulator")]
struct Args {
    #[arg(short, long, default_value = "configs/default.toml")]
    config: String,

    #[arg(short, long)]
    file: Option<String>,

    #[arg(long)]
    json: bool,

    #[arg(short, long)]
    quiet: bool,
}

/// The bundled demonstration program: a short sequence exercising a load,
/// a store, a RAW dependency, and a branch.
const DEFAULT_PROGRAM: [&str; 6] = [
    "0x02108025", // or   $s0, $s0, $s0
    "0x8e110000", // lw   $s1, 0($s0)
    "0xae120004", // sw   $s2, 4($s0)
    "0x00640820", // add  $at, $v1, $a0
    "0x10800001", // beq  $a0, $zero, 1
    "0x00000000", // nop
];

/// Machine-readable run report emitted by `--json`.
#[derive(Serialize)]
struct Report<'a> {
    instructions: &'a [String],
    forwarding: bool,
    max_cycles: u64,
    history: &'a [CycleSnapshot],
}

/// Main entry point for the MIPS pipeline simulator.
///
/// # Behavior
///
/// 1. **Configuration**: Parses command-line arguments and loads the TOML
///    configuration file. A missing file falls back to defaults.
/// 2. **Program**: Reads the hex word list from `--file`, or uses the
///    bundled demo program.
/// 3. **Validation**: Starts the controller, which rejects empty programs
///    and malformed words before any cycle runs.
/// 4. **Simulation Loop**: Steps the pipeline cycle-by-cycle until the
///    program drains or the configured cycle cap is hit.
/// 5. **Report**: Emits the snapshot history as JSON, or renders the
///    per-cycle stage table and hazard report, then prints statistics.
fn main() {
    let args = Args::parse();

    let config: Config = match fs::read_to_string(&args.config) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: bad config file {}: {}", args.config, e);
                process::exit(1);
            }
        },
        Err(_) => Config::default(),
    };

    let words: Vec<String> = match args.file {
        Some(ref path) => match program::load_program(path) {
            Ok(words) => words,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        None => DEFAULT_PROGRAM.iter().map(|w| w.to_string()).collect(),
    };

    let mut controller = SimulationController::new(&config);
    if let Err(e) = controller.start(&words) {
        eprintln!("Error: invalid program: {}", e);
        process::exit(1);
    }

    if !args.quiet && !args.json {
        println!("Global Configuration");
        println!("--------------------");
        println!("General:");
        println!("  Trace Pipeline:     {}", config.general.trace_pipeline);
        println!("Pipeline:");
        println!(
            "  Forwarding:         {}",
            if config.pipeline.forwarding {
                "Enabled"
            } else {
                "Disabled"
            }
        );
        println!("Run:");
        println!("  Max Cycle Cap:      {}", config.run.max_cycle_cap);
        println!("  Instructions:       {}", words.len());
        println!("  Predicted Cycles:   {}", controller.max_cycles());
        println!("--------------------");
        match args.file {
            Some(ref path) => println!("[*] Simulating {}", path),
            None => println!("[*] Simulating bundled demo program"),
        }
    }

    if config.general.trace_pipeline {
        if let Some(snap) = controller.snapshot() {
            eprintln!("{}", trace_line(snap));
        }
    }

    while controller.is_running() && controller.current_cycle() < config.run.max_cycle_cap {
        if controller.step().is_none() {
            break;
        }
        if config.general.trace_pipeline {
            if let Some(snap) = controller.snapshot() {
                eprintln!("{}", trace_line(snap));
            }
        }
    }

    if args.json {
        let report = Report {
            instructions: controller.instructions(),
            forwarding: config.pipeline.forwarding,
            max_cycles: controller.max_cycles(),
            history: controller.history(),
        };
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: report serialization failed: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    if !args.quiet {
        print_timeline(&controller);
        print_hazard_report(&controller);
    }

    controller.stats().print();
}

/// One trace line in pipeline flow order, fetch on the left.
fn trace_line(snap: &CycleSnapshot) -> String {
    let occupant = |stage: Stage| -> String {
        snap.stages
            .iter()
            .find(|(_, s)| **s == stage)
            .map(|(i, _)| format!("#{}", i))
            .unwrap_or_else(|| "-".to_string())
    };
    format!(
        "cycle {:>4} | IF:{} -> ID:{} -> EX:{} -> MEM:{} -> WB:{}",
        snap.cycle,
        occupant(Stage::If),
        occupant(Stage::Id),
        occupant(Stage::Ex),
        occupant(Stage::Mem),
        occupant(Stage::Wb)
    )
}

/// Renders the instruction/cycle stage table from the recorded history.
fn print_timeline(controller: &SimulationController) {
    let history = controller.history();
    let decoded = controller.decoded();
    if history.is_empty() || decoded.is_empty() {
        return;
    }

    let labels: Vec<String> = decoded
        .iter()
        .map(|inst| format!("#{} {}", inst.index, disasm::render(inst)))
        .collect();
    let label_width = labels.iter().map(|l| l.len()).max().unwrap_or(0) + 2;

    println!("\nPipeline Timeline");
    println!("-----------------");
    print!("{:<width$}", "", width = label_width);
    for snap in history {
        print!(" {:>4}", snap.cycle);
    }
    println!();

    for (inst, label) in decoded.iter().zip(&labels) {
        print!("{:<width$}", label, width = label_width);
        for snap in history {
            match snap.stages.get(&inst.index) {
                Some(stage) => print!(" {:>4}", stage.name()),
                None => print!(" {:>4}", "."),
            }
        }
        println!();
    }
}

/// Renders the per-instruction hazard, forwarding, and stall summary.
fn print_hazard_report(controller: &SimulationController) {
    let hazards = controller.cumulative_hazards();
    let forwardings = controller.cumulative_forwardings();
    let stalls = controller.cumulative_stalls();
    if hazards.is_empty() && forwardings.is_empty() && stalls.is_empty() {
        return;
    }

    println!("\nHazard Report");
    println!("-------------");
    for (index, record) in &hazards {
        println!("  #{}: {}", index, record.description);
        if let Some(paths) = forwardings.get(index) {
            for path in paths {
                println!(
                    "       path: {} -> {} {} (from #{})",
                    path.from_stage.name(),
                    path.to_stage.name(),
                    reg::name(path.register),
                    path.from
                );
            }
        }
        if let Some(count) = stalls.get(index) {
            println!("       stalled: {} cycle(s)", count);
        }
    }
}
