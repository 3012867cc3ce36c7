//! Machine state aggregate.
//!
//! Every structure the stages read or write lives here, owned by the driver and
//! lent to one stage at a time. Keeping it in one value (instead of globals)
//! lets several simulations coexist and lets tests build and inspect a machine
//! directly.

use std::collections::HashSet;

use crate::common::error::SimError;
use crate::common::reg::{ARCH_REG_COUNT, PhysReg};
use crate::config::Config;
use crate::core::prf::PhysRegFile;
use crate::core::rat::RegisterAliasTable;
use crate::core::rob::Rob;
use crate::core::rs::{Operand, ReservationStations};
use crate::core::scoreboard::Scoreboard;

/// Physical register file, RAT, RS pool, ROB and scoreboard for one machine.
#[derive(Debug)]
pub struct SimState {
    /// Physical register file.
    pub prf: PhysRegFile,
    /// Register alias table.
    pub rat: RegisterAliasTable,
    /// Reservation stations.
    pub rs: ReservationStations,
    /// Reorder buffer.
    pub rob: Rob,
    /// Functional units.
    pub scoreboard: Scoreboard,
    /// Current cycle (1-based once the first tick starts).
    pub cycle: u64,
}

impl SimState {
    /// Reset state for a validated configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            prf: PhysRegFile::new(config.pipeline.preg_pool),
            rat: RegisterAliasTable::new(),
            rs: ReservationStations::new(config.pipeline.rs_capacity()),
            rob: Rob::new(config.pipeline.rob_size),
            scoreboard: Scoreboard::new(&config.units),
            cycle: 0,
        }
    }

    /// Cross-checks the structures against each other.
    ///
    /// Meant to run at a cycle boundary. Verifies:
    /// - base registers are never free;
    /// - every RS entry has a ROB entry with the same sequence number and destination;
    /// - ROB sequence numbers increase from head to tail;
    /// - a pool register is in use exactly when the RAT or an in-flight ROB
    ///   entry (as destination or superseded mapping) refers to it;
    /// - no two in-flight instructions share a destination register;
    /// - fired entries had ready operands, and no entry reads a free register;
    /// - busy functional units match fired RS entries one to one.
    pub fn check(&self) -> Result<(), SimError> {
        let fail = |detail: String| SimError::Invariant {
            cycle: self.cycle,
            detail,
        };

        for index in 0..ARCH_REG_COUNT {
            if self.prf.is_free(PhysReg(index))? {
                return Err(fail(format!("base register p{index} marked free")));
            }
        }

        let mut last_seq = None;
        let mut dests = HashSet::new();
        let mut claimed: HashSet<PhysReg> = self.rat.iter().map(|(_, reg)| reg).collect();
        for entry in self.rob.iter() {
            if last_seq.is_some_and(|last| entry.seq <= last) {
                return Err(fail(format!("ROB order broken at #{}", entry.seq)));
            }
            last_seq = Some(entry.seq);
            if let Some(dest) = entry.dest {
                if !dests.insert(dest) {
                    return Err(fail(format!("{dest} is the destination of two entries")));
                }
                let _ = claimed.insert(dest);
            }
            if let Some(prev) = entry.prev {
                let _ = claimed.insert(prev);
            }
        }

        for index in ARCH_REG_COUNT..self.prf.len() {
            let reg = PhysReg(index);
            let in_use = !self.prf.is_free(reg)?;
            if in_use != claimed.contains(&reg) {
                return Err(fail(format!(
                    "{reg} in_use={in_use} but referenced={}",
                    claimed.contains(&reg)
                )));
            }
        }

        let mut fired = 0;
        for (_, entry) in self.rs.iter_in_order() {
            if !self
                .rob
                .iter()
                .any(|rob| rob.seq == entry.seq && rob.dest == entry.dest)
            {
                return Err(fail(format!("RS entry #{} has no ROB entry", entry.seq)));
            }
            for operand in entry.src {
                let Some(reg) = operand.reg() else { continue };
                if matches!(operand, Operand::Renamed(_)) && self.prf.is_free(reg)? {
                    return Err(fail(format!("#{} reads free register {reg}", entry.seq)));
                }
                if entry.fired && !self.prf.is_ready(reg)? {
                    return Err(SimError::UnreadyOperand {
                        seq: entry.seq,
                        reg,
                    });
                }
            }
            if entry.fired {
                fired += 1;
            }
        }

        let busy = self.scoreboard.busy_count();
        if busy != fired {
            return Err(fail(format!(
                "{busy} busy functional units but {fired} fired RS entries"
            )));
        }
        Ok(())
    }
}
