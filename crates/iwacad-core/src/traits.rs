//! Traits shared by every table in the arena.

use std::fmt;

use crate::error::TableKind;

/// A typed handle into one of the arena's tables.
///
/// Handles are plain 16-bit signed integers on disk. Negative values are
/// never a valid slot; `-1` is the conventional "none" sentinel.
pub trait TableId: Copy + Eq + fmt::Debug + fmt::Display {
    /// Which table this handle addresses.
    const KIND: TableKind;

    /// Wrap a raw on-disk index.
    fn from_raw(raw: i16) -> Self;

    /// The raw 16-bit index.
    fn raw(self) -> i16;

    /// The array slot this handle names, or `None` for negative indices.
    ///
    /// Does not check the upper bound; that depends on the table.
    fn slot(self) -> Option<usize> {
        usize::try_from(self.raw()).ok()
    }
}

/// A fixed-size record stored in an arena table.
///
/// Every record type carries a validity byte. `Default` is an empty
/// slot with every field zero, links included: the validity flag, not
/// the slot position or the link values, decides whether a record is
/// present.
pub trait Record: Copy + Default + fmt::Debug {
    /// Whether the slot holds a live record.
    fn is_live(&self) -> bool;

    /// Mark the record live or dead without touching its payload.
    fn set_live(&mut self, live: bool);
}
