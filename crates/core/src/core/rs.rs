//! Reservation Stations (RS).
//!
//! A fixed-capacity slot arena holding dispatched operations until their
//! functional unit completes. Slots are reused in any order, so a side index
//! keyed by sequence number keeps the oldest-first scan order the scheduler
//! relies on without ever re-sorting the arena.

use std::collections::BTreeMap;

use crate::common::error::SimError;
use crate::common::reg::PhysReg;
use crate::core::rob::SeqNum;
use crate::isa::FuClass;

/// Source operand reference captured at rename time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Operand {
    /// The instruction has no such source.
    #[default]
    None,
    /// Mapped to an architectural base register (value already committed).
    Committed(PhysReg),
    /// Mapped to a renaming-pool register; ready once its producer completes.
    Renamed(PhysReg),
}

impl Operand {
    /// Classifies a RAT mapping.
    pub const fn from_mapping(reg: PhysReg) -> Self {
        if reg.is_architectural() {
            Self::Committed(reg)
        } else {
            Self::Renamed(reg)
        }
    }

    /// The physical register read, if any.
    pub const fn reg(self) -> Option<PhysReg> {
        match self {
            Self::None => None,
            Self::Committed(reg) | Self::Renamed(reg) => Some(reg),
        }
    }
}

/// One reservation station slot.
#[derive(Clone, Debug)]
pub struct RsEntry {
    /// Slot is occupied.
    pub valid: bool,
    /// Functional-unit class the operation needs.
    pub fu: FuClass,
    /// Destination physical register.
    pub dest: Option<PhysReg>,
    /// Source operands.
    pub src: [Operand; 2],
    /// Dispatch sequence number.
    pub seq: SeqNum,
    /// Bound to a functional unit.
    pub fired: bool,
}

impl Default for RsEntry {
    fn default() -> Self {
        Self {
            valid: false,
            fu: FuClass::K0,
            dest: None,
            src: [Operand::None; 2],
            seq: SeqNum::default(),
            fired: false,
        }
    }
}

/// Reservation station pool.
#[derive(Debug)]
pub struct ReservationStations {
    slots: Vec<RsEntry>,
    /// Valid slots keyed by sequence number.
    order: BTreeMap<SeqNum, usize>,
}

impl ReservationStations {
    /// Creates an empty pool with `capacity` slots.
    pub fn new(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, RsEntry::default);
        Self {
            slots,
            order: BTreeMap::new(),
        }
    }

    /// Number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of valid entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when no slot is occupied.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// True when every slot is occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.order.len() == self.slots.len()
    }

    /// Places a new entry in the first invalid slot and returns the slot index.
    pub fn insert(&mut self, entry: RsEntry) -> Result<usize, SimError> {
        let slot = self
            .slots
            .iter()
            .position(|s| !s.valid)
            .ok_or(SimError::CapacityExceeded {
                structure: "RS",
                capacity: self.slots.len(),
            })?;
        let seq = entry.seq;
        if self.order.contains_key(&seq) {
            return Err(SimError::DuplicateSequence(seq));
        }
        self.slots[slot] = RsEntry {
            valid: true,
            fired: false,
            ..entry
        };
        let _ = self.order.insert(seq, slot);
        Ok(slot)
    }

    /// Slot contents, bounds-checked.
    pub fn get(&self, slot: usize) -> Result<&RsEntry, SimError> {
        self.slots.get(slot).ok_or(SimError::SlotOutOfRange {
            structure: "RS",
            index: slot,
            len: self.slots.len(),
        })
    }

    /// Valid entries, oldest first, with their slot indices.
    pub fn iter_in_order(&self) -> impl Iterator<Item = (usize, &RsEntry)> + '_ {
        self.order.values().map(|&slot| (slot, &self.slots[slot]))
    }

    /// Records that the entry in `slot` was bound to a functional unit.
    pub fn mark_fired(&mut self, slot: usize) -> Result<(), SimError> {
        let len = self.slots.len();
        let entry = self
            .slots
            .get_mut(slot)
            .ok_or(SimError::SlotOutOfRange {
                structure: "RS",
                index: slot,
                len,
            })?;
        if !entry.valid || entry.fired {
            return Err(SimError::DoubleFire { slot });
        }
        entry.fired = true;
        Ok(())
    }

    /// Frees every slot whose operation has fired. Returns how many were freed.
    pub fn release_fired(&mut self) -> usize {
        let slots = &mut self.slots;
        let before = self.order.len();
        self.order.retain(|_, &mut slot| {
            let entry = &mut slots[slot];
            if entry.fired {
                entry.valid = false;
                false
            } else {
                true
            }
        });
        before - self.order.len()
    }
}
