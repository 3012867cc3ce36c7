//! Instruction model consumed by the core.
//!
//! 1. **Functional-unit classes:** The three execution resource kinds.
//! 2. **Instruction:** The decoded, immutable record handed to dispatch.
//! 3. **Source:** The pull interface dispatch reads the trace through.

/// Functional-unit class definitions.
pub mod fu;

/// Decoded instruction record.
pub mod instruction;

/// Pull interface for instruction streams.
pub mod source;

pub use fu::FuClass;
pub use instruction::Instruction;
pub use source::InstructionSource;
