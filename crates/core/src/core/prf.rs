//! Physical Register File (PRF).
//!
//! Tracks a ready bit and a free bit for every physical register. The file is
//! split in two regions:
//! 1. **Base registers** `[0, 32)`: hold committed architectural values. They are
//!    always ready at reset and are never allocated or freed.
//! 2. **Renaming pool** `[32, 32 + N)`: start free and cold (not ready), become
//!    busy on allocation, ready on completion, and free again when the
//!    instruction that superseded them retires.

use crate::common::error::SimError;
use crate::common::reg::{ARCH_REG_COUNT, PhysReg};

#[derive(Clone, Copy, Debug, Default)]
struct PhysRegState {
    ready: bool,
    free: bool,
}

/// Physical register file with per-register ready/free state.
#[derive(Debug)]
pub struct PhysRegFile {
    regs: Vec<PhysRegState>,
}

impl PhysRegFile {
    /// Creates a file with the 32 base registers plus `pool` renaming registers.
    pub fn new(pool: usize) -> Self {
        let mut regs = Vec::with_capacity(ARCH_REG_COUNT + pool);
        regs.resize(
            ARCH_REG_COUNT,
            PhysRegState {
                ready: true,
                free: false,
            },
        );
        regs.resize(
            ARCH_REG_COUNT + pool,
            PhysRegState {
                ready: false,
                free: true,
            },
        );
        Self { regs }
    }

    /// Total number of physical registers.
    #[inline]
    pub fn len(&self) -> usize {
        self.regs.len()
    }

    /// Always false; the base registers are always present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.regs.is_empty()
    }

    /// Number of renaming-pool registers.
    #[inline]
    pub fn pool_size(&self) -> usize {
        self.regs.len() - ARCH_REG_COUNT
    }

    /// Number of pool registers currently free.
    pub fn free_count(&self) -> usize {
        self.regs[ARCH_REG_COUNT..].iter().filter(|r| r.free).count()
    }

    /// Lowest-numbered free pool register, without claiming it.
    pub fn first_free(&self) -> Option<PhysReg> {
        self.regs[ARCH_REG_COUNT..]
            .iter()
            .position(|r| r.free)
            .map(|i| PhysReg(ARCH_REG_COUNT + i))
    }

    /// Claims the lowest-numbered free pool register: not free, not ready.
    ///
    /// Returns `Ok(None)` when the pool is exhausted.
    pub fn allocate(&mut self) -> Result<Option<PhysReg>, SimError> {
        let Some(reg) = self.first_free() else {
            return Ok(None);
        };
        self.claim(reg)?;
        Ok(Some(reg))
    }

    /// Claims a specific free register: not free, not ready.
    pub fn claim(&mut self, reg: PhysReg) -> Result<(), SimError> {
        let state = self.slot_mut(reg)?;
        if !state.free {
            return Err(SimError::DoubleAllocation(reg));
        }
        state.free = false;
        state.ready = false;
        Ok(())
    }

    /// Sets a register's ready bit (its producer completed).
    pub fn mark_ready(&mut self, reg: PhysReg) -> Result<(), SimError> {
        self.slot_mut(reg)?.ready = true;
        Ok(())
    }

    /// Returns a pool register to the free list.
    pub fn release(&mut self, reg: PhysReg) -> Result<(), SimError> {
        if reg.is_architectural() {
            return Err(SimError::FreeArchitectural(reg));
        }
        self.slot_mut(reg)?.free = true;
        Ok(())
    }

    /// Whether `reg` holds a produced value.
    pub fn is_ready(&self, reg: PhysReg) -> Result<bool, SimError> {
        Ok(self.slot(reg)?.ready)
    }

    /// Whether `reg` is on the free list.
    pub fn is_free(&self, reg: PhysReg) -> Result<bool, SimError> {
        Ok(self.slot(reg)?.free)
    }

    /// Overwrites a register's bits with no checks, for corrupting state in tests.
    #[cfg(test)]
    pub(crate) fn force(&mut self, reg: PhysReg, ready: bool, free: bool) {
        self.regs[reg.0] = PhysRegState { ready, free };
    }

    fn slot(&self, reg: PhysReg) -> Result<&PhysRegState, SimError> {
        let len = self.regs.len();
        self.regs.get(reg.0).ok_or(SimError::RegisterOutOfRange {
            index: reg.0,
            len,
        })
    }

    fn slot_mut(&mut self, reg: PhysReg) -> Result<&mut PhysRegState, SimError> {
        let len = self.regs.len();
        self.regs.get_mut(reg.0).ok_or(SimError::RegisterOutOfRange {
            index: reg.0,
            len,
        })
    }
}
