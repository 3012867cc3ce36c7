//! Register index types.
//!
//! Architectural and physical register indices live in separate newtypes so a
//! stage cannot hand an architectural number to the physical register file (or
//! the reverse) by accident. Physical indices `[0, 32)` alias the architectural
//! base registers; everything above that is the renaming pool.

use std::fmt;

use serde::Serialize;

use super::error::ConfigError;

/// Number of architectural registers (and of physical base registers).
pub const ARCH_REG_COUNT: usize = 32;

/// Architectural register index in `[0, 32)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ArchReg(u8);

impl ArchReg {
    /// Creates an architectural register, or `None` if `index` is out of range.
    pub const fn new(index: usize) -> Option<Self> {
        if index < ARCH_REG_COUNT {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// Returns the register number.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<i32> for ArchReg {
    type Error = ConfigError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(Self::new)
            .ok_or(ConfigError::InvalidRegister(value))
    }
}

impl fmt::Display for ArchReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// Physical register index.
///
/// Indices below [`ARCH_REG_COUNT`] are the architectural base registers and are
/// never allocated or freed; the rest belong to the renaming pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PhysReg(pub usize);

impl PhysReg {
    /// True for the architectural base registers `[0, 32)`.
    #[inline]
    pub const fn is_architectural(self) -> bool {
        self.0 < ARCH_REG_COUNT
    }
}

impl fmt::Display for PhysReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}
