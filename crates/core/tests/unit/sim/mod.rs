//! # Simulation Tests


/// Randomized properties over arbitrary traces.
pub mod properties;

/// Hand-traced cycle-by-cycle scenarios.
pub mod scenarios;
