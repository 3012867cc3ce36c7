//! Cycle-level out-of-order processor simulator library.
//!
//! This crate models a Tomasulo-style superscalar core driven by an instruction
//! trace, with the following:
//! 1. **Core:** Register renaming (PRF and RAT), reservation stations, a
//!    reorder buffer and per-class functional units.
//! 2. **Pipeline:** Retire, execute, schedule and dispatch stages run once per
//!    cycle in that order.
//! 3. **ISA:** Trace instruction records and the source they are pulled from.
//! 4. **Simulation:** Configuration, the cycle driver and statistics collection.
//!
//! The library does no I/O; trace parsing and reporting live in the CLI.

/// Common types (register identifiers, errors).
pub mod common;
/// Simulator configuration (defaults, validation, JSON loading).
pub mod config;
/// Machine structures and pipeline stages.
pub mod core;
/// Trace instructions, functional-unit classes and instruction sources.
pub mod isa;
/// Cycle driver.
pub mod sim;
/// Simulation statistics collection.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Fatal simulation error.
pub use crate::common::SimError;
/// Cycle driver; construct with `Simulator::new`.
pub use crate::sim::Simulator;
/// Final statistics record.
pub use crate::stats::SimStats;
