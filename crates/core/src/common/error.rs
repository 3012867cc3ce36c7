//! Error definitions for the simulator.
//!
//! This module separates the two failure families of the core:
//! 1. **Configuration errors:** Rejected at setup, before any cycle executes.
//! 2. **Simulation errors:** Broken structural invariants detected while ticking.
//!    These are contract violations, not bad input, and the run cannot continue
//!    once one is raised because every statistic after it would be wrong.

use thiserror::Error;

use super::reg::PhysReg;
use crate::core::SeqNum;

/// Invalid configuration or trace-level value.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A capacity, width, or unit count was zero.
    #[error("`{field}` must be greater than zero")]
    NonPositive {
        /// Dotted path of the offending field.
        field: &'static str,
    },

    /// Functional-unit op code outside the known classes.
    #[error("unknown functional unit op code {0}")]
    UnknownOpCode(i32),

    /// Register number outside `[0, 32)` (and not the `-1` "absent" marker).
    #[error("architectural register {0} out of range")]
    InvalidRegister(i32),

    /// Malformed JSON configuration.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Fatal simulation failure.
#[derive(Debug, Error)]
pub enum SimError {
    /// Setup rejected the configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An entry reached a functional unit with a source still pending.
    #[error("instruction #{seq} fired with unready operand {reg}")]
    UnreadyOperand {
        /// Sequence number of the offending entry.
        seq: SeqNum,
        /// The pending source register.
        reg: PhysReg,
    },

    /// Retirement was attempted on a head that has not completed.
    #[error("attempted to retire instruction #{seq} before it completed")]
    RetireNotReady {
        /// Sequence number at the ROB head.
        seq: SeqNum,
    },

    /// A removal was attempted on an empty structure.
    #[error("{structure} occupancy underflow")]
    OccupancyUnderflow {
        /// Name of the structure.
        structure: &'static str,
    },

    /// An insertion was attempted on a full structure.
    #[error("{structure} overflow (capacity {capacity})")]
    CapacityExceeded {
        /// Name of the structure.
        structure: &'static str,
        /// Its configured capacity.
        capacity: usize,
    },

    /// A completing functional unit's identity tag did not match exactly one ROB entry.
    #[error("completion tag ({dest:?}, #{seq}) matched {matches} ROB entries")]
    TagCollision {
        /// Destination recorded in the tag.
        dest: Option<PhysReg>,
        /// Sequence number recorded in the tag.
        seq: SeqNum,
        /// How many in-flight ROB entries carried that tag.
        matches: usize,
    },

    /// Physical register index outside the file.
    #[error("physical register {index} out of range (file size {len})")]
    RegisterOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of physical registers.
        len: usize,
    },

    /// Slot index outside a fixed-capacity structure.
    #[error("{structure} slot {index} out of range (capacity {len})")]
    SlotOutOfRange {
        /// Name of the structure.
        structure: &'static str,
        /// The requested slot.
        index: usize,
        /// Its capacity.
        len: usize,
    },

    /// The same sequence number was dispatched twice.
    #[error("sequence number #{0} dispatched twice")]
    DuplicateSequence(SeqNum),

    /// A reservation station entry was bound to a unit twice, or while empty.
    #[error("RS slot {slot} fired twice or while empty")]
    DoubleFire {
        /// The slot index.
        slot: usize,
    },

    /// Something tried to release an architectural base register.
    #[error("architectural base register {0} cannot be freed")]
    FreeArchitectural(PhysReg),

    /// Allocation handed out a register that was not free.
    #[error("physical register {0} allocated while in use")]
    DoubleAllocation(PhysReg),

    /// A structural cross-check failed.
    #[error("invariant violated at cycle {cycle}: {detail}")]
    Invariant {
        /// Cycle at which the check ran.
        cycle: u64,
        /// What was inconsistent.
        detail: String,
    },

    /// The sequence-number counter ran out.
    #[error("sequence number space exhausted")]
    SequenceOverflow,

    /// A full cycle passed without any state change while work remained.
    #[error(
        "no progress at cycle {cycle}: {rob_occupancy} in flight, {free_pregs} free pool registers"
    )]
    Deadlock {
        /// The stuck cycle.
        cycle: u64,
        /// ROB occupancy at that point.
        rob_occupancy: usize,
        /// Free renaming-pool registers at that point.
        free_pregs: usize,
    },

    /// The run exceeded `general.max_cycles`.
    #[error("cycle limit of {limit} reached before the trace drained")]
    CycleLimit {
        /// The configured limit.
        limit: u64,
    },
}
