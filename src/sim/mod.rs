//! Simulation orchestration.
//!
//! The controller owns the run and its snapshot history and is the sole
//! interface a front end consumes; the program loader turns text files
//! into word lists for it.

/// Program-file loading.
pub mod program;

/// The simulation controller: start, step, run, reset.
pub mod controller;

pub use controller::SimulationController;
