//! Per-cycle pipeline stages.
//!
//! The driver runs them in this fixed order every cycle, so resources freed by
//! an earlier stage are visible to a later one within the same cycle:
//! 1. **Retire:** Drains ready entries from the ROB head and reclaims registers.
//! 2. **Execute:** Completes every busy functional unit and wakes dependents.
//! 3. **Schedule:** Binds ready RS entries to idle functional units, oldest first.
//! 4. **Dispatch:** Renames and admits new instructions in program order.

/// Dispatch/rename stage.
pub mod dispatch;

/// Execution-completion stage.
pub mod execute;

/// Retirement (state update) stage.
pub mod retire;

/// Scheduling (fire) stage.
pub mod schedule;

pub use dispatch::{DispatchReport, DispatchStall, dispatch_stage};
pub use execute::execute_stage;
pub use retire::retire_stage;
pub use schedule::schedule_stage;
