//! Common types shared by every part of the simulator.
//!
//! 1. **Register Types:** Architectural and physical register indices.
//! 2. **Error Handling:** Configuration and fatal simulation errors.

/// Error types for setup and simulation.
pub mod error;

/// Architectural and physical register index types.
pub mod reg;

pub use error::{ConfigError, SimError};
pub use reg::{ARCH_REG_COUNT, ArchReg, PhysReg};
