//! Configuration system for the simulator.
//!
//! This module defines the configuration structures used to size the machine.
//! It provides:
//! 1. **Defaults:** Baseline machine parameters (unit counts, widths, capacities).
//! 2. **Structures:** Hierarchical config for general, functional-unit, and pipeline settings.
//! 3. **Validation:** Rejection of zero-sized resources before the first cycle.
//!
//! Configuration is usually deserialized from JSON; every field is optional and
//! falls back to the values in `defaults`.

use serde::{Deserialize, Serialize};

use crate::common::error::ConfigError;
use crate::isa::FuClass;

/// Default configuration constants for the simulator.
mod defaults {
    /// Class 0 functional units.
    pub const K0_UNITS: usize = 3;

    /// Class 1 functional units.
    pub const K1_UNITS: usize = 2;

    /// Class 2 functional units.
    pub const K2_UNITS: usize = 1;

    /// Instructions admitted per cycle.
    pub const DISPATCH_WIDTH: usize = 4;

    /// Reorder buffer entries.
    pub const ROB_SIZE: usize = 12;

    /// Renaming-pool registers (on top of the 32 architectural base registers).
    pub const PREG_POOL: usize = 32;
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use procsim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.pipeline.width, 4);
/// assert_eq!(config.pipeline.rs_capacity(), 12);
/// assert!(config.validate().is_ok());
/// ```
///
/// Deserializing from JSON, with omitted fields taking defaults:
///
/// ```
/// use procsim_core::config::Config;
///
/// let json = r#"{
///     "units": { "k0": 1, "k1": 1, "k2": 1 },
///     "pipeline": { "width": 1, "rob_size": 2, "preg_pool": 4 }
/// }"#;
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.units.k2, 1);
/// assert_eq!(config.pipeline.rob_size, 2);
/// assert_eq!(config.pipeline.rs_size, None);
/// assert!(!config.general.record_timeline);
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Run-control settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Functional units per class.
    #[serde(default)]
    pub units: FuUnitsConfig,
    /// Dispatch and buffer sizing.
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Parses a JSON document. Does not validate; see [`Config::validate`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or mistyped fields
    /// (including negative counts, which do not fit the unsigned fields).
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Rejects any zero-sized resource.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositive`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("units.k0", self.units.k0),
            ("units.k1", self.units.k1),
            ("units.k2", self.units.k2),
            ("pipeline.width", self.pipeline.width),
            ("pipeline.rob_size", self.pipeline.rob_size),
            ("pipeline.rs_size", self.pipeline.rs_capacity()),
            ("pipeline.preg_pool", self.pipeline.preg_pool),
        ];
        for (field, value) in fields {
            if value == 0 {
                return Err(ConfigError::NonPositive { field });
            }
        }
        if self.general.max_cycles == Some(0) {
            return Err(ConfigError::NonPositive {
                field: "general.max_cycles",
            });
        }
        Ok(())
    }
}

/// Run-control settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Record dispatch/fire/complete/retire cycles for every instruction.
    #[serde(default)]
    pub record_timeline: bool,

    /// Abort with an error once this many cycles have elapsed.
    #[serde(default)]
    pub max_cycles: Option<u64>,

    /// Run the full structural cross-check after every cycle.
    #[serde(default)]
    pub check_invariants: bool,
}

/// Number of functional units of each class.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FuUnitsConfig {
    /// Class 0 units.
    #[serde(default = "FuUnitsConfig::default_k0")]
    pub k0: usize,
    /// Class 1 units.
    #[serde(default = "FuUnitsConfig::default_k1")]
    pub k1: usize,
    /// Class 2 units.
    #[serde(default = "FuUnitsConfig::default_k2")]
    pub k2: usize,
}

impl FuUnitsConfig {
    fn default_k0() -> usize {
        defaults::K0_UNITS
    }

    fn default_k1() -> usize {
        defaults::K1_UNITS
    }

    fn default_k2() -> usize {
        defaults::K2_UNITS
    }

    /// Same unit count for every class.
    pub const fn uniform(count: usize) -> Self {
        Self {
            k0: count,
            k1: count,
            k2: count,
        }
    }

    /// Unit count for one class.
    pub const fn count(&self, class: FuClass) -> usize {
        match class {
            FuClass::K0 => self.k0,
            FuClass::K1 => self.k1,
            FuClass::K2 => self.k2,
        }
    }
}

impl Default for FuUnitsConfig {
    fn default() -> Self {
        Self {
            k0: defaults::K0_UNITS,
            k1: defaults::K1_UNITS,
            k2: defaults::K2_UNITS,
        }
    }
}

/// Dispatch width and buffer capacities.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    /// Instructions admitted per cycle.
    #[serde(default = "PipelineConfig::default_width")]
    pub width: usize,

    /// Reorder buffer entries.
    #[serde(default = "PipelineConfig::default_rob_size")]
    pub rob_size: usize,

    /// Reservation station slots; `None` sizes the pool like the ROB.
    #[serde(default)]
    pub rs_size: Option<usize>,

    /// Renaming-pool registers.
    #[serde(default = "PipelineConfig::default_preg_pool")]
    pub preg_pool: usize,
}

impl PipelineConfig {
    fn default_width() -> usize {
        defaults::DISPATCH_WIDTH
    }

    fn default_rob_size() -> usize {
        defaults::ROB_SIZE
    }

    fn default_preg_pool() -> usize {
        defaults::PREG_POOL
    }

    /// Effective reservation station capacity.
    #[inline]
    pub fn rs_capacity(&self) -> usize {
        self.rs_size.unwrap_or(self.rob_size)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            width: defaults::DISPATCH_WIDTH,
            rob_size: defaults::ROB_SIZE,
            rs_size: None,
            preg_pool: defaults::PREG_POOL,
        }
    }
}
