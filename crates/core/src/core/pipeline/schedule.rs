//! Schedule Stage: binds ready reservation-station entries to functional units.
//!
//! Entries are considered oldest first. An entry fires when all of its source
//! operands are ready and an idle unit of its class exists. A class running out
//! of units only skips entries of that class; younger entries of other classes
//! can still fire. Operand readiness is read from the register file, so a value
//! produced by this cycle's execute stage is already visible.

use tracing::trace;

use crate::common::error::SimError;
use crate::core::rs::RsEntry;
use crate::core::scoreboard::IssueTag;
use crate::core::state::SimState;
use crate::stats::SimStats;

fn operands_ready(state: &SimState, entry: &RsEntry) -> Result<bool, SimError> {
    for operand in entry.src {
        if let Some(reg) = operand.reg() {
            if !state.prf.is_ready(reg)? {
                return Ok(false);
            }
        }
    }
    Ok(true)
}

/// Executes the schedule stage. Returns the number of instructions fired.
pub fn schedule_stage(state: &mut SimState, stats: &mut SimStats) -> Result<usize, SimError> {
    let mut candidates = Vec::new();
    for (slot, entry) in state.rs.iter_in_order() {
        if !entry.fired && operands_ready(state, entry)? {
            candidates.push((slot, entry.fu, IssueTag {
                dest: entry.dest,
                seq: entry.seq,
            }));
        }
    }

    let mut fired = 0;
    for (slot, fu, tag) in candidates {
        let Some(unit) = state.scoreboard.bind(fu, tag)? else {
            continue;
        };
        state.rs.mark_fired(slot)?;
        trace!(cycle = state.cycle, seq = tag.seq.0, %fu, unit, dest = ?tag.dest, "SCHED");
        stats.record_fire(tag.seq, fu, state.cycle);
        fired += 1;
    }
    Ok(fired)
}
