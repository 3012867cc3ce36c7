//! Execute Stage: completes every operation bound to a functional unit.
//!
//! All units have single-cycle latency, so everything fired last cycle
//! completes now. Completion makes the destination register ready (waking any
//! dependent entries for this cycle's schedule stage), marks the ROB entry
//! ready by its identity tag and frees both the unit and the RS slot.

use tracing::trace;

use crate::common::error::SimError;
use crate::core::state::SimState;
use crate::isa::FuClass;
use crate::stats::SimStats;

/// Executes the execute stage. Returns the number of operations completed.
pub fn execute_stage(state: &mut SimState, stats: &mut SimStats) -> Result<usize, SimError> {
    let mut completed = 0;

    for class in FuClass::ALL {
        for tag in state.scoreboard.drain(class) {
            if let Some(dest) = tag.dest {
                state.prf.mark_ready(dest)?;
            }
            state.rob.complete(tag.dest, tag.seq)?;
            trace!(cycle = state.cycle, seq = tag.seq.0, %class, dest = ?tag.dest, "EX");
            stats.record_writeback(tag.seq, state.cycle);
            completed += 1;
        }
    }

    let released = state.rs.release_fired();
    if released != completed {
        return Err(SimError::Invariant {
            cycle: state.cycle,
            detail: format!("{completed} completions but {released} fired RS entries released"),
        });
    }
    Ok(completed)
}
