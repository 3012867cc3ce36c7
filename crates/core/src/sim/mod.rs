//! Simulation driver.
//!
//! Owns the machine state, the instruction frontend and the statistics, and
//! advances them one cycle at a time.

/// Cycle driver and teardown.
pub mod simulator;

pub use simulator::Simulator;
