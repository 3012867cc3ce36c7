//! Instruction frontend: the dispatcher's window onto the trace.
//!
//! Dispatch has to look at an instruction before it knows whether the machine
//! can take it (a destination needs a free register, a no-destination
//! instruction does not). An instruction that was pulled but not admitted is
//! held here and offered again first next cycle, so nothing is dropped or
//! reordered.

use tracing::debug;

use crate::isa::{Instruction, InstructionSource};

/// Pull-side state for one instruction source.
#[derive(Debug)]
pub struct Frontend<S> {
    source: S,
    pending: Option<Instruction>,
    exhausted: bool,
    pulled: u64,
}

impl<S: InstructionSource> Frontend<S> {
    /// Wraps a source.
    pub const fn new(source: S) -> Self {
        Self {
            source,
            pending: None,
            exhausted: false,
            pulled: 0,
        }
    }

    /// Next instruction in program order: the held-back one first, then the source.
    ///
    /// Once the source reports end of trace it is never polled again.
    pub fn fetch(&mut self) -> Option<Instruction> {
        if let Some(inst) = self.pending.take() {
            return Some(inst);
        }
        if self.exhausted {
            return None;
        }
        match self.source.next_instruction() {
            Some(inst) => {
                self.pulled += 1;
                Some(inst)
            }
            None => {
                debug!(pulled = self.pulled, "instruction source exhausted");
                self.exhausted = true;
                None
            }
        }
    }

    /// Holds `inst` back to be returned by the next call to [`Frontend::fetch`].
    pub fn hold(&mut self, inst: Instruction) {
        debug_assert!(self.pending.is_none());
        self.pending = Some(inst);
    }

    /// True once the source has signalled end of trace and nothing is held back.
    #[inline]
    pub const fn is_exhausted(&self) -> bool {
        self.exhausted && self.pending.is_none()
    }

    /// Instructions taken from the source so far.
    #[inline]
    pub const fn pulled(&self) -> u64 {
        self.pulled
    }
}
