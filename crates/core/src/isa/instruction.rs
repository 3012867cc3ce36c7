//! Decoded instruction record.

use serde::Serialize;

use super::fu::FuClass;
use crate::common::reg::ArchReg;

/// One decoded instruction from the trace.
///
/// Produced by the trace reader and never mutated afterwards. The address is
/// carried for reporting only; nothing in the core depends on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Instruction {
    /// Instruction address.
    pub address: u32,
    /// Functional-unit class.
    pub fu: FuClass,
    /// Up to two source registers.
    pub src: [Option<ArchReg>; 2],
    /// Destination register, if the instruction writes one.
    pub dest: Option<ArchReg>,
}

impl Instruction {
    /// Instruction with no register operands.
    pub const fn new(address: u32, fu: FuClass) -> Self {
        Self {
            address,
            fu,
            src: [None, None],
            dest: None,
        }
    }

    /// Sets the destination register.
    #[must_use]
    pub const fn with_dest(mut self, dest: ArchReg) -> Self {
        self.dest = Some(dest);
        self
    }

    /// Sets both source registers.
    #[must_use]
    pub const fn with_src(mut self, src1: Option<ArchReg>, src2: Option<ArchReg>) -> Self {
        self.src = [src1, src2];
        self
    }

    /// Builds an instruction from raw trace fields, where `-1` marks an absent register.
    ///
    /// # Errors
    ///
    /// Fails on an unknown op code or a register number outside `[-1, 32)`.
    pub fn from_raw(
        address: u32,
        op_code: i32,
        dest: i32,
        src1: i32,
        src2: i32,
    ) -> Result<Self, crate::common::error::ConfigError> {
        let reg = |value: i32| {
            if value == -1 {
                Ok(None)
            } else {
                ArchReg::try_from(value).map(Some)
            }
        };
        Ok(Self {
            address,
            fu: FuClass::try_from(op_code)?,
            src: [reg(src1)?, reg(src2)?],
            dest: reg(dest)?,
        })
    }
}
