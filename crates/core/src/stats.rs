//! Simulation statistics collection.
//!
//! This module tracks the throughput metrics exposed at teardown. It provides:
//! 1. **Cycle and throughput:** Total cycles, instructions dispatched, fired and
//!    retired, and the derived per-cycle averages.
//! 2. **Functional units:** Fired instructions per unit class.
//! 3. **Stalls:** Dispatch stall cycles broken down by the exhausted resource.
//! 4. **Timeline:** Optional per-instruction dispatch/fire/complete/retire cycles.
//!
//! Rendering is left to the caller; the record serializes with `serde`.

use serde::Serialize;

use crate::core::SeqNum;
use crate::isa::{FuClass, Instruction};

/// Cycle numbers at which one instruction passed each stage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InstTiming {
    /// Dispatch sequence number.
    pub seq: SeqNum,
    /// Instruction address.
    pub address: u32,
    /// Functional-unit class.
    pub fu: FuClass,
    /// Cycle the instruction was admitted.
    pub dispatch: u64,
    /// Cycle it was bound to a functional unit.
    pub fire: Option<u64>,
    /// Cycle its result was written back: the unit freed, the destination
    /// marked ready and the ROB entry completed. This is the cycle after
    /// `fire`, and the earliest cycle a dependent can fire.
    pub writeback: Option<u64>,
    /// Cycle it left the ROB.
    pub retire: Option<u64>,
}

/// Statistics collected over a run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SimStats {
    /// Total cycles elapsed.
    pub cycles: u64,
    /// Instructions admitted into the RS/ROB.
    pub instructions_dispatched: u64,
    /// Instructions bound to a functional unit.
    pub instructions_fired: u64,
    /// Instructions retired from the ROB head.
    pub instructions_retired: u64,

    /// Fired instructions per class, indexed by [`FuClass::index`].
    pub fired_by_class: [u64; 3],

    /// Cycles in which dispatch stopped for lack of an RS slot.
    pub stalls_rs_full: u64,
    /// Cycles in which dispatch stopped because the ROB was full.
    pub stalls_rob_full: u64,
    /// Cycles in which dispatch stopped for lack of a free pool register.
    pub stalls_no_preg: u64,

    /// Highest ROB occupancy observed at the end of a cycle.
    pub max_rob_occupancy: usize,

    /// Per-instruction timeline, indexed by sequence number minus one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Vec<InstTiming>>,
}

impl SimStats {
    /// Empty statistics, with timeline recording switched on or off.
    pub fn new(record_timeline: bool) -> Self {
        Self {
            timeline: record_timeline.then(Vec::new),
            ..Self::default()
        }
    }

    /// Average instructions fired per cycle (0 before the first cycle).
    pub fn avg_inst_fired(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.instructions_fired as f64 / self.cycles as f64
        }
    }

    /// Average instructions retired per cycle (0 before the first cycle).
    pub fn avg_inst_retired(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.instructions_retired as f64 / self.cycles as f64
        }
    }

    /// Fired instructions for one class.
    #[inline]
    pub fn fired(&self, class: FuClass) -> u64 {
        self.fired_by_class[class.index()]
    }

    /// Timeline entry for `seq`, if recorded.
    pub fn timing(&self, seq: SeqNum) -> Option<&InstTiming> {
        let index = usize::try_from(seq.0.checked_sub(1)?).ok()?;
        self.timeline.as_ref()?.get(index)
    }

    pub(crate) fn record_dispatch(&mut self, seq: SeqNum, inst: &Instruction, cycle: u64) {
        self.instructions_dispatched += 1;
        if let Some(timeline) = self.timeline.as_mut() {
            timeline.push(InstTiming {
                seq,
                address: inst.address,
                fu: inst.fu,
                dispatch: cycle,
                fire: None,
                writeback: None,
                retire: None,
            });
        }
    }

    pub(crate) fn record_fire(&mut self, seq: SeqNum, class: FuClass, cycle: u64) {
        self.instructions_fired += 1;
        self.fired_by_class[class.index()] += 1;
        if let Some(timing) = self.timing_mut(seq) {
            timing.fire = Some(cycle);
        }
    }

    pub(crate) fn record_writeback(&mut self, seq: SeqNum, cycle: u64) {
        if let Some(timing) = self.timing_mut(seq) {
            timing.writeback = Some(cycle);
        }
    }

    pub(crate) fn record_retire(&mut self, seq: SeqNum, cycle: u64) {
        self.instructions_retired += 1;
        if let Some(timing) = self.timing_mut(seq) {
            timing.retire = Some(cycle);
        }
    }

    fn timing_mut(&mut self, seq: SeqNum) -> Option<&mut InstTiming> {
        let index = usize::try_from(seq.0.checked_sub(1)?).ok()?;
        self.timeline.as_mut()?.get_mut(index)
    }
}
