//! Reorder Buffer (ROB) for in-order retirement.
//!
//! The ROB is a circular buffer that tracks in-flight instructions from dispatch
//! through retirement. It provides:
//! 1. **Allocation:** Issues a fresh sequence number and appends at the tail.
//! 2. **Completion:** Marks the entry matching a functional unit's identity tag ready.
//! 3. **In-order Retirement:** Pops from the head only, and only once ready.
//! 4. **Reclaim Bookkeeping:** Remembers the mapping each entry superseded so
//!    retirement can free it.

use std::fmt;

use serde::Serialize;

use crate::common::error::SimError;
use crate::common::reg::{ArchReg, PhysReg};

/// Dispatch-order sequence number.
///
/// Strictly increasing, starting at 1, never reused. RS and ROB slots are
/// recycled, so the sequence number (paired with the destination) is what
/// identifies an in-flight operation across time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct SeqNum(pub u64);

impl fmt::Display for SeqNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single entry in the Reorder Buffer.
#[derive(Clone, Debug, Default)]
pub struct RobEntry {
    /// Sequence number shared with the entry's RS slot.
    pub seq: SeqNum,
    /// Physical register the instruction writes.
    pub dest: Option<PhysReg>,
    /// Architectural register the instruction writes.
    pub dest_arch: Option<ArchReg>,
    /// Mapping `dest_arch` had before this instruction; freed at retirement.
    pub prev: Option<PhysReg>,
    /// Execution finished; eligible to retire once at the head.
    pub ready: bool,
    /// Slot is occupied.
    pub valid: bool,
}

/// Reorder Buffer: circular buffer for in-order retirement.
#[derive(Debug)]
pub struct Rob {
    /// Fixed-size entry array.
    entries: Vec<RobEntry>,
    /// Index of the oldest entry (retirement point).
    head: usize,
    /// Index where the next entry will be allocated.
    tail: usize,
    /// Number of valid entries.
    count: usize,
    /// Next sequence number to hand out.
    next_seq: u64,
}

impl Rob {
    /// Creates a new ROB with the given capacity.
    pub fn new(capacity: usize) -> Self {
        let mut entries = Vec::with_capacity(capacity);
        entries.resize_with(capacity, RobEntry::default);
        Self {
            entries,
            head: 0,
            tail: 0,
            count: 0,
            next_seq: 1,
        }
    }

    /// Returns the ROB capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Returns the number of occupied entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if the ROB is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns true if the ROB is full.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.count == self.entries.len()
    }

    /// Creates a ROB whose next allocation receives `next_seq`.
    #[cfg(test)]
    pub(crate) fn with_next_seq(capacity: usize, next_seq: u64) -> Self {
        Self {
            next_seq,
            ..Self::new(capacity)
        }
    }

    /// Appends a not-ready entry at the tail and returns its sequence number.
    ///
    /// `u64::MAX` is never handed out: the allocation that would leave no
    /// successor fails with `SequenceOverflow` and the ROB is left unchanged.
    pub fn allocate(
        &mut self,
        dest: Option<PhysReg>,
        dest_arch: Option<ArchReg>,
        prev: Option<PhysReg>,
    ) -> Result<SeqNum, SimError> {
        if self.is_full() {
            return Err(SimError::CapacityExceeded {
                structure: "ROB",
                capacity: self.capacity(),
            });
        }

        let seq = SeqNum(self.next_seq);
        let next = self
            .next_seq
            .checked_add(1)
            .ok_or(SimError::SequenceOverflow)?;
        self.next_seq = next;

        self.entries[self.tail] = RobEntry {
            seq,
            dest,
            dest_arch,
            prev,
            ready: false,
            valid: true,
        };
        self.tail = (self.tail + 1) % self.entries.len();
        self.count += 1;
        Ok(seq)
    }

    /// Marks the entry whose `(dest, seq)` matches a completing unit's tag ready.
    ///
    /// Exactly one in-flight entry must match.
    pub fn complete(&mut self, dest: Option<PhysReg>, seq: SeqNum) -> Result<(), SimError> {
        let mut matched = None;
        let mut matches = 0;
        let mut idx = self.head;
        for _ in 0..self.count {
            let entry = &self.entries[idx];
            if entry.valid && entry.dest == dest && entry.seq == seq {
                matches += 1;
                matched = Some(idx);
            }
            idx = (idx + 1) % self.entries.len();
        }

        match matched {
            Some(idx) if matches == 1 => {
                self.entries[idx].ready = true;
                Ok(())
            }
            _ => Err(SimError::TagCollision { dest, seq, matches }),
        }
    }

    /// Returns a reference to the head entry (oldest), if the ROB is non-empty.
    pub fn peek_head(&self) -> Option<&RobEntry> {
        if self.count == 0 {
            None
        } else {
            Some(&self.entries[self.head])
        }
    }

    /// Removes the head entry. The head must be ready.
    pub fn retire_head(&mut self) -> Result<RobEntry, SimError> {
        if self.count == 0 {
            return Err(SimError::OccupancyUnderflow { structure: "ROB" });
        }

        let entry = &mut self.entries[self.head];
        if !entry.ready {
            return Err(SimError::RetireNotReady { seq: entry.seq });
        }

        entry.valid = false;
        let retired = entry.clone();
        self.head = (self.head + 1) % self.entries.len();
        self.count -= 1;
        Ok(retired)
    }

    /// Iterates valid entries from head (oldest) to tail.
    pub fn iter(&self) -> impl Iterator<Item = &RobEntry> + '_ {
        let len = self.entries.len();
        (0..self.count)
            .map(move |i| &self.entries[(self.head + i) % len])
            .filter(|entry| entry.valid)
    }
}
