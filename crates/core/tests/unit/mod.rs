//! # Unit Components
//!
//! Tests grouped by the part of the simulator they exercise.

/// Configuration defaults, JSON loading and validation.
pub mod config;

/// Cycle-level behavior of the whole machine.
///
/// This module includes hand-traced scenarios, fatal-error paths and
/// randomized properties over arbitrary traces and configurations.
pub mod sim;

/// Statistics record and its derived metrics.
pub mod stats;
