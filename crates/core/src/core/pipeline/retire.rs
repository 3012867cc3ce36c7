//! Retire Stage: in-order state update from the ROB head.
//!
//! Every ready entry at the head leaves the ROB this cycle; there is no
//! per-cycle retirement limit. Retiring an instruction that wrote a register
//! frees the mapping it superseded, since no younger instruction can still
//! name it. Base registers are never freed.

use tracing::trace;

use crate::common::error::SimError;
use crate::core::state::SimState;
use crate::stats::SimStats;

/// Executes the retire stage. Returns the number of instructions retired.
pub fn retire_stage(state: &mut SimState, stats: &mut SimStats) -> Result<usize, SimError> {
    let mut retired = 0;

    while state.rob.peek_head().is_some_and(|head| head.ready) {
        let entry = state.rob.retire_head()?;
        if let Some(prev) = entry.prev {
            if !prev.is_architectural() {
                state.prf.release(prev)?;
            }
        }
        trace!(
            cycle = state.cycle,
            seq = entry.seq.0,
            dest = ?entry.dest,
            freed = ?entry.prev,
            "SU"
        );
        stats.record_retire(entry.seq, state.cycle);
        retired += 1;
    }

    Ok(retired)
}
