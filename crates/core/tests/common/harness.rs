use procsim_core::core::SeqNum;
use procsim_core::isa::Instruction;
use procsim_core::stats::InstTiming;
use procsim_core::{Config, SimError, SimStats, Simulator};

pub struct TestContext {
    pub sim: Simulator<std::vec::IntoIter<Instruction>>,
}

impl TestContext {
    pub fn new(config: &Config, trace: Vec<Instruction>) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();

        let sim = Simulator::new(config, trace.into_iter()).expect("valid configuration");
        Self { sim }
    }

    /// Runs to completion and returns the final statistics.
    pub fn run(mut self) -> SimStats {
        let _ = self.sim.run().expect("simulation completes");
        self.sim.finish()
    }

    /// Runs to completion, expecting a fatal error.
    pub fn run_err(mut self) -> SimError {
        self.sim.run().expect_err("simulation should fail")
    }

    /// Ticks one cycle at a time, calling `check` after each, until finished.
    pub fn run_with(
        mut self,
        mut check: impl FnMut(&Simulator<std::vec::IntoIter<Instruction>>),
    ) -> SimStats {
        while !self.sim.is_finished() {
            self.sim.tick().expect("cycle succeeds");
            check(&self.sim);
        }
        self.sim.finish()
    }
}

/// Timeline entry for the `n`th dispatched instruction (1-based).
pub fn timing(stats: &SimStats, n: u64) -> &InstTiming {
    stats.timing(SeqNum(n)).expect("timeline recorded")
}
