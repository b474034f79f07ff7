//! Fixed-capacity record tables.
//!
//! A [`Table`] is a boxed slice allocated once at construction and a
//! `count` high-water mark. Slots below `count` may still be empty: the
//! record's validity flag, not its position, says whether it is live.

use std::marker::PhantomData;

use iwacad_core::{ArenaError, Record, TableId};

use crate::chain::ChainWalker;

/// Largest capacity whose slot indices all fit in an `i16`.
const MAX_TABLE_SLOTS: usize = i16::MAX as usize + 1;

/// A fixed-capacity table of `R` records addressed by `I` handles.
pub struct Table<I: TableId, R: Record> {
    /// Backing storage, reset to `R::default()` at creation and on clear.
    slots: Box<[R]>,
    /// High-water mark: one past the highest slot ever written.
    count: usize,
    _id: PhantomData<I>,
}

impl<I: TableId, R: Record> Table<I, R> {
    /// Create an empty table with `capacity` empty slots.
    ///
    /// Capacities above 32768 are clamped so every slot stays addressable
    /// by a 16-bit handle.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.min(MAX_TABLE_SLOTS);
        Self {
            slots: vec![R::default(); capacity].into_boxed_slice(),
            count: 0,
            _id: PhantomData,
        }
    }

    /// Total number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// High-water mark. Not the number of live records.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Number of live records below the high-water mark.
    pub fn live_count(&self) -> usize {
        self.slots[..self.count].iter().filter(|r| r.is_live()).count()
    }

    /// Whether the next append would fail.
    pub fn is_full(&self) -> bool {
        self.count == self.slots.len()
    }

    /// Slots remaining for appends.
    pub fn remaining(&self) -> usize {
        self.slots.len() - self.count
    }

    fn slot_of(&self, id: I) -> Option<usize> {
        id.slot().filter(|&slot| slot < self.count)
    }

    /// The record at `id`, live or not.
    ///
    /// Returns `None` for negative handles and for handles at or past the
    /// high-water mark, which covers everything outside the capacity.
    pub fn get(&self, id: I) -> Option<&R> {
        self.slot_of(id).map(|slot| &self.slots[slot])
    }

    /// Mutable access to the record at `id`. Same bounds as [`Table::get`].
    pub fn get_mut(&mut self, id: I) -> Option<&mut R> {
        self.slot_of(id).map(|slot| &mut self.slots[slot])
    }

    /// The record at `id` only if it is live.
    pub fn get_live(&self, id: I) -> Option<&R> {
        self.get(id).filter(|r| r.is_live())
    }

    /// Append a record at the high-water mark and mark it live.
    ///
    /// On [`ArenaError::CapacityExceeded`] the table is unchanged.
    pub fn alloc(&mut self, mut record: R) -> Result<I, ArenaError> {
        if self.is_full() {
            return Err(ArenaError::CapacityExceeded {
                table: I::KIND,
                capacity: self.capacity(),
            });
        }
        if !record.is_live() {
            record.set_live(true);
        }
        let id = Self::id_at(self.count);
        self.slots[self.count] = record;
        self.count += 1;
        Ok(id)
    }

    /// Write a record at an arbitrary slot, raising the high-water mark
    /// to cover it. Later stores to the same slot overwrite earlier ones.
    pub fn store(&mut self, id: I, record: R) -> Result<(), ArenaError> {
        let slot = id
            .slot()
            .filter(|&slot| slot < self.slots.len())
            .ok_or(ArenaError::OutOfRange {
                table: I::KIND,
                index: id.raw(),
                capacity: self.capacity(),
            })?;
        self.slots[slot] = record;
        self.count = self.count.max(slot + 1);
        Ok(())
    }

    /// Clear the validity flag at `id`, leaving a hole. Returns whether a
    /// live record was removed.
    pub fn remove(&mut self, id: I) -> bool {
        match self.get_mut(id) {
            Some(record) if record.is_live() => {
                record.set_live(false);
                true
            }
            _ => false,
        }
    }

    /// Empty every slot and reset the high-water mark.
    pub fn clear(&mut self) {
        self.slots.fill(R::default());
        self.count = 0;
    }

    /// Live records in slot order.
    pub fn iter_live(&self) -> impl Iterator<Item = (I, &R)> + '_ {
        self.slots[..self.count]
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_live())
            .map(|(slot, r)| (Self::id_at(slot), r))
    }

    /// Walk a chain of records starting at `start`, following `link`.
    pub fn walk(&self, start: I, link: fn(&R) -> I, max_steps: usize) -> ChainWalker<'_, I, R> {
        ChainWalker::new(self, start, link, max_steps)
    }

    /// Handles reachable from `start` through the stored `link` values,
    /// live or not.
    ///
    /// Unlike [`Table::walk`] this does not stop at cleared records, so it
    /// finds the real tail of a chain with holes in it. It stops at `-1`,
    /// at a handle outside the high-water mark, or after `max_steps`
    /// handles. Revisits are not detected; the step cap bounds a loop.
    pub fn links(
        &self,
        start: I,
        link: fn(&R) -> I,
        max_steps: usize,
    ) -> impl Iterator<Item = I> + '_ {
        std::iter::successors(self.get(start).map(|_| start), move |&id| {
            self.get(id).map(link).filter(|&next| self.get(next).is_some())
        })
        .take(max_steps)
    }

    fn id_at(slot: usize) -> I {
        // Slots are bounded by MAX_TABLE_SLOTS, so the cast is lossless.
        I::from_raw(slot as i16)
    }
}
