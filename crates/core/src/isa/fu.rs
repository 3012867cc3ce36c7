//! Functional-unit classes.

use std::fmt;

use serde::Serialize;

use crate::common::error::ConfigError;

/// Class of functional unit an instruction executes on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum FuClass {
    /// Class 0 (op code 0).
    K0,
    /// Class 1 (op codes 1 and -1).
    K1,
    /// Class 2 (op code 2).
    K2,
}

impl FuClass {
    /// Every class, in scan order.
    pub const ALL: [Self; 3] = [Self::K0, Self::K1, Self::K2];

    /// Dense index for per-class arrays.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::K0 => 0,
            Self::K1 => 1,
            Self::K2 => 2,
        }
    }
}

impl TryFrom<i32> for FuClass {
    type Error = ConfigError;

    /// Maps a trace op code to its class. `-1` shares class 1.
    fn try_from(op_code: i32) -> Result<Self, Self::Error> {
        match op_code {
            0 => Ok(Self::K0),
            1 | -1 => Ok(Self::K1),
            2 => Ok(Self::K2),
            other => Err(ConfigError::UnknownOpCode(other)),
        }
    }
}

impl fmt::Display for FuClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "k{}", self.index())
    }
}
