//! MIPS 5-Stage Pipeline Simulator Library.
//!
//! This crate implements a cycle-by-cycle simulator for the classic MIPS
//! 5-stage pipeline. It models instruction flow, data hazard detection,
//! forwarding paths, and stall insertion, producing a full per-cycle record
//! of every run.
//!
//! # Architecture
//!
//! * **Pipeline**: 5-stage in-order (Fetch, Decode, Execute, Memory, Writeback).
//! * **Hazards**: RAW detection with stall computation, WAW reporting.
//! * **Forwarding**: EX/MEM result bypass into EX and MEM consumers, toggleable.
//!
//! # Modules
//!
//! * `common`: Shared types, constants, and error handling.
//! * `config`: Configuration loading and parsing.
//! * `core`: Pipeline scheduling and hazard analysis.
//! * `isa`: Instruction Set Architecture definitions.
//! * `sim`: Simulation controller and program loading.
//! * `stats`: Run statistics collection.

/// Shared types, constants, error handling, and register definitions.
///
/// Provides fundamental data structures and error types used throughout
/// the simulator, including register naming and common constants.
pub mod common;

/// Configuration system for pipeline and run settings.
///
/// Loads and parses TOML configuration files to customize simulator behavior,
/// including the forwarding toggle and run cycle cap.
pub mod config;

/// Pipeline core: scheduling, hazard analysis, and snapshot production.
///
/// Implements the 5-stage in-order pipeline occupancy model, RAW/WAW hazard
/// detection, forwarding path resolution, and per-cycle state capture.
pub mod core;

/// Instruction Set Architecture definitions and decoders.
///
/// Implements MIPS instruction word decoding, operand field extraction,
/// instruction classification, and disassembly for display.
pub mod isa;

/// Simulation controller and program loading.
///
/// Handles parsing hex program files, validating input, and driving the
/// pipeline scheduler cycle by cycle while recording history.
pub mod sim;

/// Run statistics collection and reporting.
///
/// Tracks cycle counts, hazard occurrences, stall totals, and forwarding
/// activity during simulation execution.
pub mod stats;
