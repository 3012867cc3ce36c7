//! Dispatch Stage: admission, register renaming, RS/ROB allocation.
//!
//! Admits up to `width` instructions per cycle, strictly in program order. An
//! instruction is admitted only if an RS slot, a ROB slot and (when it writes a
//! register) a free pool register are all available; otherwise it is held back
//! and admission stops for the rest of the cycle, even if a younger instruction
//! would fit. Source operands are captured from the RAT *before* the
//! destination is remapped, so an instruction reading its own destination
//! (`r5 = r5 + 1`) depends on the previous producer, not on itself.

use tracing::trace;

use crate::common::error::SimError;
use crate::core::frontend::Frontend;
use crate::core::rs::{Operand, RsEntry};
use crate::core::state::SimState;
use crate::isa::{Instruction, InstructionSource};
use crate::stats::SimStats;

/// Resource that stopped admission in a cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchStall {
    /// Every RS slot is occupied.
    RsFull,
    /// The ROB is at capacity.
    RobFull,
    /// The instruction writes a register and the pool is empty.
    NoFreeRegister,
}

/// What dispatch did in one cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Instructions admitted.
    pub admitted: usize,
    /// Instructions newly taken from the source (admitted or held back).
    pub pulled: usize,
    /// Why admission stopped early, if it did.
    pub stall: Option<DispatchStall>,
}

/// First resource that would refuse `inst`, checked in RS, ROB, register order.
fn admission_blocker(state: &SimState, inst: &Instruction) -> Option<DispatchStall> {
    if state.rs.is_full() {
        Some(DispatchStall::RsFull)
    } else if state.rob.is_full() {
        Some(DispatchStall::RobFull)
    } else if inst.dest.is_some() && state.prf.first_free().is_none() {
        Some(DispatchStall::NoFreeRegister)
    } else {
        None
    }
}

/// Executes the dispatch stage.
pub fn dispatch_stage<S: InstructionSource>(
    state: &mut SimState,
    stats: &mut SimStats,
    frontend: &mut Frontend<S>,
    width: usize,
) -> Result<DispatchReport, SimError> {
    let mut report = DispatchReport::default();
    let pulled_before = frontend.pulled();

    for _ in 0..width {
        let Some(inst) = frontend.fetch() else {
            break;
        };

        if let Some(stall) = admission_blocker(state, &inst) {
            match stall {
                DispatchStall::RsFull => stats.stalls_rs_full += 1,
                DispatchStall::RobFull => stats.stalls_rob_full += 1,
                DispatchStall::NoFreeRegister => stats.stalls_no_preg += 1,
            }
            trace!(cycle = state.cycle, addr = inst.address, ?stall, "DS stall");
            frontend.hold(inst);
            report.stall = Some(stall);
            break;
        }

        admit(state, stats, &inst)?;
        report.admitted += 1;
    }

    report.pulled = usize::try_from(frontend.pulled() - pulled_before).unwrap_or(usize::MAX);
    Ok(report)
}

/// Renames `inst` and allocates its RS and ROB entries. Resources were checked by the caller.
fn admit(state: &mut SimState, stats: &mut SimStats, inst: &Instruction) -> Result<(), SimError> {
    let src = inst
        .src
        .map(|reg| reg.map_or(Operand::None, |r| Operand::from_mapping(state.rat.lookup(r))));

    let dest = inst
        .dest
        .map(|_| {
            state.prf.first_free().ok_or_else(|| SimError::CapacityExceeded {
                structure: "register pool",
                capacity: state.prf.pool_size(),
            })
        })
        .transpose()?;
    let prev = inst.dest.map(|arch| state.rat.lookup(arch));

    // Nothing is claimed or remapped until the ROB has accepted the entry.
    let seq = state.rob.allocate(dest, inst.dest, prev)?;
    if let (Some(arch), Some(phys)) = (inst.dest, dest) {
        state.prf.claim(phys)?;
        let _ = state.rat.remap(arch, phys);
    }

    let _ = state.rs.insert(RsEntry {
        valid: true,
        fu: inst.fu,
        dest,
        src,
        seq,
        fired: false,
    })?;

    trace!(
        cycle = state.cycle,
        seq = seq.0,
        addr = inst.address,
        fu = %inst.fu,
        ?dest,
        ?prev,
        ?src,
        "DS"
    );
    stats.record_dispatch(seq, inst, state.cycle);
    Ok(())
}
