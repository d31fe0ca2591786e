//! Forwarding resolution.
//!
//! Turns forwardable RAW conflicts into the concrete bypass paths the
//! snapshot exposes. A conflict set resolves without stalling exactly
//! when every member needs zero stall cycles; WAW overlaps never
//! produce a path because no instruction consumes the overwritten
//! value.
//!
//! Path endpoints name the logical stage pair: the producer's result
//! stage (EX for arithmetic, MEM for loads) and the consumer's need
//! stage (EX for operands, MEM for store data). A value never moves
//! backward in stage order.

use crate::core::hazards::RawConflict;
use crate::core::snapshot::ForwardingPath;

/// Whether the bypass network covers every conflict without stalling.
pub fn is_resolvable(conflicts: &[RawConflict], forwarding_enabled: bool) -> bool {
    forwarding_enabled
        && !conflicts.is_empty()
        && conflicts.iter().all(|c| c.stall_cycles == 0)
}

/// Builds the bypass paths for a consumer whose conflicts all resolve
/// without stalling. One path per conflicted register, ordered by
/// register index.
pub fn paths_for(consumer: usize, conflicts: &[RawConflict]) -> Vec<ForwardingPath> {
    let mut paths: Vec<ForwardingPath> = conflicts
        .iter()
        .map(|c| ForwardingPath {
            from: c.producer,
            to: consumer,
            from_stage: c.result_stage,
            to_stage: c.need_stage,
            register: c.register,
        })
        .collect();
    paths.sort_by_key(|p| p.register);
    paths
}
