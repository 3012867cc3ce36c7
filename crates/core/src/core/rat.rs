//! Register Alias Table (RAT).
//!
//! Maps each architectural register to the physical register holding its
//! youngest value. At reset every architectural register maps to its own base
//! register.

use crate::common::reg::{ARCH_REG_COUNT, ArchReg, PhysReg};

/// Architectural-to-physical register mapping.
#[derive(Debug, Clone)]
pub struct RegisterAliasTable {
    map: [PhysReg; ARCH_REG_COUNT],
}

impl Default for RegisterAliasTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterAliasTable {
    /// Identity mapping onto the base registers.
    pub fn new() -> Self {
        Self {
            map: std::array::from_fn(PhysReg),
        }
    }

    /// Current mapping of `reg`.
    #[inline]
    pub fn lookup(&self, reg: ArchReg) -> PhysReg {
        self.map[reg.index()]
    }

    /// Points `reg` at `phys` and returns the superseded mapping.
    #[inline]
    pub fn remap(&mut self, reg: ArchReg, phys: PhysReg) -> PhysReg {
        std::mem::replace(&mut self.map[reg.index()], phys)
    }

    /// Iterates `(architectural, physical)` pairs in register order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, PhysReg)> + '_ {
        self.map.iter().copied().enumerate()
    }
}
