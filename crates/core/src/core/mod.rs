//! Out-of-order core model.
//!
//! This module contains the machine structures and the stages that move
//! instructions through them:
//! 1. **Register state:** Physical register file and register alias table.
//! 2. **Buffers:** Reservation stations and the reorder buffer.
//! 3. **Functional units:** Per-class scoreboard with identity tags.
//! 4. **Frontend:** Lookahead over the instruction source.
//! 5. **Pipeline:** Retire, execute, schedule and dispatch stages.

/// Instruction frontend with one-instruction lookahead.
pub mod frontend;

/// Per-cycle pipeline stages.
pub mod pipeline;

/// Physical register file.
pub mod prf;

/// Register alias table.
pub mod rat;

/// Reorder buffer and sequence numbers.
pub mod rob;

/// Reservation station pool.
pub mod rs;

/// Functional-unit scoreboard.
pub mod scoreboard;

/// Aggregate machine state.
pub mod state;

pub use self::frontend::Frontend;
pub use self::rob::SeqNum;
pub use self::state::SimState;
