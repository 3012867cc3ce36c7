//! Functional-unit scoreboard.
//!
//! Tracks, for every functional unit of every class, whether it is busy and
//! which operation it holds. RS and ROB slots are recycled, so the operation is
//! identified by its identity tag `(destination, sequence number)` rather than
//! by a slot index; completion uses the same tag to find the ROB entry.

use crate::common::error::SimError;
use crate::common::reg::PhysReg;
use crate::config::FuUnitsConfig;
use crate::core::rob::SeqNum;
use crate::isa::FuClass;

/// Identity of an operation bound to a functional unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IssueTag {
    /// Destination physical register, if any.
    pub dest: Option<PhysReg>,
    /// Dispatch sequence number.
    pub seq: SeqNum,
}

/// One functional unit.
#[derive(Clone, Copy, Debug, Default)]
pub struct FuSlot {
    /// Holding an operation this cycle.
    pub busy: bool,
    /// The held operation.
    pub tag: Option<IssueTag>,
}

/// Per-class functional-unit state.
#[derive(Debug)]
pub struct Scoreboard {
    units: [Vec<FuSlot>; 3],
}

impl Scoreboard {
    /// Creates an idle scoreboard sized by `config`.
    pub fn new(config: &FuUnitsConfig) -> Self {
        Self {
            units: FuClass::ALL.map(|class| vec![FuSlot::default(); config.count(class)]),
        }
    }

    /// Units of one class.
    #[inline]
    pub fn units(&self, class: FuClass) -> &[FuSlot] {
        &self.units[class.index()]
    }

    /// Busy units across all classes.
    pub fn busy_count(&self) -> usize {
        self.units.iter().flatten().filter(|u| u.busy).count()
    }

    /// Binds `tag` to the first idle unit of `class` (linear search).
    ///
    /// Returns the unit index, or `Ok(None)` if every unit of the class is busy.
    pub fn bind(&mut self, class: FuClass, tag: IssueTag) -> Result<Option<usize>, SimError> {
        let matches = self
            .units
            .iter()
            .flatten()
            .filter(|u| u.busy && u.tag.is_some_and(|t| t.seq == tag.seq))
            .count();
        if matches != 0 {
            return Err(SimError::TagCollision {
                dest: tag.dest,
                seq: tag.seq,
                matches,
            });
        }

        let Some((index, unit)) = self.units[class.index()]
            .iter_mut()
            .enumerate()
            .find(|(_, u)| !u.busy)
        else {
            return Ok(None);
        };
        unit.busy = true;
        unit.tag = Some(tag);
        Ok(Some(index))
    }

    /// Frees every busy unit of `class` and returns the tags they held, in unit order.
    pub fn drain(&mut self, class: FuClass) -> Vec<IssueTag> {
        self.units[class.index()]
            .iter_mut()
            .filter(|u| u.busy)
            .filter_map(|u| {
                u.busy = false;
                u.tag.take()
            })
            .collect()
    }
}
