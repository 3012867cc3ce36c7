//! Final report rendering: text sections or JSON.

use std::fmt;

use procsim_core::isa::FuClass;
use procsim_core::stats::InstTiming;
use procsim_core::{Config, SimStats};
use serde::Serialize;

/// Settings and statistics of one run.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    /// Machine the trace ran on.
    pub config: &'a Config,
    /// Final statistics.
    pub stats: &'a SimStats,
}

impl Report<'_> {
    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { config, stats } = self;
        let rule = "----------------------------------------------------------";

        writeln!(f, "==========================================================")?;
        writeln!(f, "OUT-OF-ORDER CORE SIMULATION")?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "PROCESSOR SETTINGS")?;
        writeln!(f, "  dispatch_width         {}", config.pipeline.width)?;
        writeln!(f, "  rob_entries            {}", config.pipeline.rob_size)?;
        writeln!(f, "  rs_entries             {}", config.pipeline.rs_capacity())?;
        writeln!(f, "  preg_pool              {}", config.pipeline.preg_pool)?;
        for class in FuClass::ALL {
            writeln!(f, "  units.{class}               {}", config.units.count(class))?;
        }
        writeln!(f, "{rule}")?;

        writeln!(f, "SUMMARY")?;
        writeln!(f, "  sim_cycles             {}", stats.cycles)?;
        writeln!(f, "  sim_insts              {}", stats.instructions_retired)?;
        writeln!(f, "  avg_inst_fired         {:.6}", stats.avg_inst_fired())?;
        writeln!(f, "  avg_inst_retired       {:.6}", stats.avg_inst_retired())?;
        writeln!(f, "{rule}")?;

        writeln!(f, "CORE BREAKDOWN")?;
        let fired = stats.instructions_fired.max(1) as f64;
        for class in FuClass::ALL {
            let n = stats.fired(class);
            writeln!(
                f,
                "  fired.{class}               {n} ({:.2}%)",
                n as f64 / fired * 100.0
            )?;
        }
        writeln!(f, "  max_rob_occupancy      {}", stats.max_rob_occupancy)?;
        writeln!(f, "{rule}")?;

        let cycles = stats.cycles.max(1) as f64;
        writeln!(f, "DISPATCH STALLS")?;
        for (name, count) in [
            ("rs_full", stats.stalls_rs_full),
            ("rob_full", stats.stalls_rob_full),
            ("no_free_preg", stats.stalls_no_preg),
        ] {
            writeln!(
                f,
                "  {name:<22} {count} ({:.2}%)",
                count as f64 / cycles * 100.0
            )?;
        }
        writeln!(f, "==========================================================")
    }
}

/// Per-instruction stage cycles as a fixed-width table.
#[derive(Debug)]
pub struct TimelineTable<'a>(pub &'a [InstTiming]);

impl fmt::Display for TimelineTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cell = |c: Option<u64>| c.map_or_else(|| "-".to_owned(), |c| c.to_string());
        writeln!(
            f,
            "{:>8} {:>10} {:>4} {:>8} {:>8} {:>8} {:>8}",
            "seq", "address", "fu", "dispatch", "fire", "writeback", "retire"
        )?;
        for t in self.0 {
            writeln!(
                f,
                "{:>8} {:>10} {:>4} {:>8} {:>8} {:>8} {:>8}",
                t.seq.0,
                format!("{:#x}", t.address),
                t.fu.to_string(),
                t.dispatch,
                cell(t.fire),
                cell(t.writeback),
                cell(t.retire)
            )?;
        }
        Ok(())
    }
}
