//! Simulator: owns the machine, the frontend and the statistics side by side.
//!
//! Each call to [`Simulator::tick`] runs one cycle with the stages in the fixed
//! order retire, execute, schedule, dispatch. The run ends at the end of the
//! first cycle in which the source is exhausted and the ROB is empty.

use tracing::{debug, info};

use crate::common::error::SimError;
use crate::config::Config;
use crate::core::Frontend;
use crate::core::pipeline::{dispatch_stage, execute_stage, retire_stage, schedule_stage};
use crate::core::state::SimState;
use crate::isa::InstructionSource;
use crate::stats::{InstTiming, SimStats};

/// Top-level simulator for one configuration and one instruction source.
#[derive(Debug)]
pub struct Simulator<S> {
    state: SimState,
    frontend: Frontend<S>,
    stats: SimStats,
    width: usize,
    max_cycles: Option<u64>,
    check_invariants: bool,
}

impl<S: InstructionSource> Simulator<S> {
    /// Validates `config` and builds a machine in its reset state.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] if any resource count is zero.
    pub fn new(config: &Config, source: S) -> Result<Self, SimError> {
        config.validate()?;
        info!(
            k0 = config.units.k0,
            k1 = config.units.k1,
            k2 = config.units.k2,
            width = config.pipeline.width,
            rob = config.pipeline.rob_size,
            rs = config.pipeline.rs_capacity(),
            pool = config.pipeline.preg_pool,
            "simulator configured"
        );
        Ok(Self {
            state: SimState::new(config),
            frontend: Frontend::new(source),
            stats: SimStats::new(config.general.record_timeline),
            width: config.pipeline.width,
            max_cycles: config.general.max_cycles,
            check_invariants: config.general.check_invariants,
        })
    }

    /// Advances the machine by one clock cycle.
    ///
    /// # Errors
    ///
    /// Any [`SimError`] raised by a stage is fatal. [`SimError::CycleLimit`]
    /// is returned instead of starting a cycle past the configured limit, and
    /// [`SimError::Deadlock`] when a cycle makes no progress while work remains.
    pub fn tick(&mut self) -> Result<(), SimError> {
        if let Some(limit) = self.max_cycles {
            if self.state.cycle >= limit {
                return Err(SimError::CycleLimit { limit });
            }
        }
        self.state.cycle += 1;
        self.stats.cycles = self.state.cycle;

        let retired = retire_stage(&mut self.state, &mut self.stats)?;
        let completed = execute_stage(&mut self.state, &mut self.stats)?;
        let fired = schedule_stage(&mut self.state, &mut self.stats)?;
        let dispatch = dispatch_stage(
            &mut self.state,
            &mut self.stats,
            &mut self.frontend,
            self.width,
        )?;

        let occupancy = self.state.rob.len();
        self.stats.max_rob_occupancy = self.stats.max_rob_occupancy.max(occupancy);

        debug!(
            cycle = self.state.cycle,
            retired,
            completed,
            fired,
            admitted = dispatch.admitted,
            stall = ?dispatch.stall,
            rob = occupancy,
            rs = self.state.rs.len(),
            free_pregs = self.state.prf.free_count(),
            "cycle"
        );

        if self.check_invariants {
            self.state.check()?;
        }

        let progressed = retired + completed + fired + dispatch.admitted + dispatch.pulled > 0;
        if !progressed && !self.is_finished() {
            return Err(SimError::Deadlock {
                cycle: self.state.cycle,
                rob_occupancy: occupancy,
                free_pregs: self.state.prf.free_count(),
            });
        }
        Ok(())
    }

    /// True once the source is exhausted and every admitted instruction has retired.
    pub fn is_finished(&self) -> bool {
        self.frontend.is_exhausted() && self.state.rob.is_empty()
    }

    /// Ticks until [`Simulator::is_finished`].
    ///
    /// # Errors
    ///
    /// Returns the first error raised by [`Simulator::tick`].
    pub fn run(&mut self) -> Result<&SimStats, SimError> {
        while !self.is_finished() {
            self.tick()?;
        }
        Ok(&self.stats)
    }

    /// Statistics gathered so far.
    #[inline]
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Per-instruction timeline, if recording was enabled.
    pub fn timeline(&self) -> Option<&[InstTiming]> {
        self.stats.timeline.as_deref()
    }

    /// Read-only view of the machine.
    #[inline]
    pub const fn state(&self) -> &SimState {
        &self.state
    }

    /// Cross-checks the machine structures now.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn check_invariants(&self) -> Result<(), SimError> {
        self.state.check()
    }

    /// Ends the run and hands back the final statistics.
    pub fn finish(self) -> SimStats {
        info!(
            cycles = self.stats.cycles,
            dispatched = self.stats.instructions_dispatched,
            fired = self.stats.instructions_fired,
            retired = self.stats.instructions_retired,
            finished = self.is_finished(),
            "simulation complete"
        );
        self.stats
    }
}
