//! Pipeline simulation core.
//!
//! The decoder output flows through register usage analysis into hazard
//! detection; hazards feed the forwarding resolver and the stage
//! scheduler; the scheduler's per-cycle output is packaged into
//! immutable snapshots.

/// Register usage analysis and register sets.
pub mod usage;

/// Data hazard detection and stall arithmetic.
pub mod hazards;

/// Forwarding path resolution.
pub mod forwarding;

/// The per-cycle stage state machine.
pub mod scheduler;

/// Immutable per-cycle snapshot types.
pub mod snapshot;

pub use scheduler::{InstrState, Scheduler};
pub use snapshot::{CycleSnapshot, ForwardingPath, HazardKind, HazardRecord, Stage};
pub use usage::{RegSet, RegisterUsage};
