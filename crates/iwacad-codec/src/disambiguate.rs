//! Recovery of record indices from legacy files.
//!
//! Some writers stored the index of a polygon or point record as a byte
//! offset from the start of its table rather than as a slot number. The
//! loader cannot tell which from the stream alone, so it tries a fixed
//! list of interpretations and keeps the first that lands inside the
//! table. The order matters: files written by [`CadWriter`](crate::CadWriter)
//! always resolve through [`IndexHypothesis::Direct`].

use crate::layout::RecordTag;

/// One way of reading a raw 16-bit record index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndexHypothesis {
    /// The value is the slot number.
    Direct,
    /// The value is a positive multiple of the record size.
    ByteOffset,
    /// The 16 bits are an unsigned slot number.
    Unsigned,
}

impl IndexHypothesis {
    /// Apply this interpretation, returning a slot below `capacity`.
    pub fn apply(self, raw: i16, record_size: usize, capacity: usize) -> Option<i16> {
        let slot = match self {
            Self::Direct => usize::try_from(raw).ok()?,
            Self::ByteOffset => {
                let offset = usize::try_from(raw).ok().filter(|&o| o > 0)?;
                if record_size == 0 || offset % record_size != 0 {
                    return None;
                }
                offset / record_size
            }
            Self::Unsigned => usize::from(raw as u16),
        };
        if slot < capacity {
            i16::try_from(slot).ok()
        } else {
            None
        }
    }
}

/// Interpretations tried for object records.
pub const OBJECT_HYPOTHESES: &[IndexHypothesis] = &[IndexHypothesis::Direct];

/// Interpretations tried for polygon and point records, in priority order.
pub const LEGACY_HYPOTHESES: &[IndexHypothesis] = &[
    IndexHypothesis::Direct,
    IndexHypothesis::ByteOffset,
    IndexHypothesis::Unsigned,
];

/// The interpretation list for a tag.
pub fn hypotheses_for(tag: RecordTag) -> &'static [IndexHypothesis] {
    match tag {
        RecordTag::Object => OBJECT_HYPOTHESES,
        RecordTag::Polygon | RecordTag::Point => LEGACY_HYPOTHESES,
    }
}

/// A raw index that resolved to a table slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolved {
    /// The slot the record is stored at.
    pub index: i16,
    /// The interpretation that produced it.
    pub via: IndexHypothesis,
}

/// Try each hypothesis in `order` and return the first in-range result.
///
/// `None` means the record cannot be placed and should be skipped.
pub fn resolve_index(
    raw: i16,
    record_size: usize,
    capacity: usize,
    order: &[IndexHypothesis],
) -> Option<Resolved> {
    order.iter().find_map(|&via| {
        via.apply(raw, record_size, capacity)
            .map(|index| Resolved { index, via })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{POINT_RECORD_SIZE, POLYGON_RECORD_SIZE};

    fn polygon(raw: i16) -> Option<Resolved> {
        resolve_index(raw, POLYGON_RECORD_SIZE, 1024, LEGACY_HYPOTHESES)
    }

    #[test]
    fn direct_wins_when_also_a_byte_offset() {
        // 28 is both slot 28 and byte offset 2 * 14.
        assert_eq!(
            polygon(28),
            Some(Resolved {
                index: 28,
                via: IndexHypothesis::Direct
            })
        );
    }

    #[test]
    fn byte_offset_recovers_large_values() {
        assert_eq!(
            polygon(14_000),
            Some(Resolved {
                index: 1000,
                via: IndexHypothesis::ByteOffset
            })
        );
        assert_eq!(
            resolve_index(32_736, POINT_RECORD_SIZE, 1024, LEGACY_HYPOTHESES),
            Some(Resolved {
                index: 1023,
                via: IndexHypothesis::ByteOffset
            })
        );
    }

    #[test]
    fn byte_offset_past_table_is_rejected() {
        // 14 * 1024 lands one slot past the end.
        assert_eq!(polygon(14 * 1024), None);
    }

    #[test]
    fn non_multiples_and_negatives_are_rejected() {
        assert_eq!(polygon(14_001), None);
        assert_eq!(polygon(-14), None);
        assert_eq!(polygon(i16::MIN), None);
        assert_eq!(polygon(-1), None);
    }

    #[test]
    fn objects_use_direct_only() {
        let order = hypotheses_for(RecordTag::Object);
        assert_eq!(resolve_index(255, 40, 256, order).map(|r| r.index), Some(255));
        assert_eq!(resolve_index(400, 40, 256, order), None);
        assert_eq!(resolve_index(-1, 40, 256, order), None);
    }

    #[test]
    fn unsigned_reads_the_raw_bits() {
        // 0xFFFF is in range here but has no i16 slot.
        assert_eq!(IndexHypothesis::Unsigned.apply(-1, 14, 65_536), None);
        assert_eq!(IndexHypothesis::Unsigned.apply(5, 14, 1024), Some(5));
        assert_eq!(IndexHypothesis::Unsigned.apply(-32_768, 14, 1024), None);
    }

    #[test]
    fn capacity_bounds_every_hypothesis() {
        assert_eq!(IndexHypothesis::Direct.apply(3, 14, 3), None);
        assert_eq!(IndexHypothesis::Direct.apply(2, 14, 3), Some(2));
        assert_eq!(IndexHypothesis::ByteOffset.apply(42, 14, 3), None);
        assert_eq!(IndexHypothesis::ByteOffset.apply(28, 14, 3), Some(2));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn resolved_index_is_always_in_range(raw in any::<i16>(), cap in 1usize..=1024) {
                if let Some(r) = resolve_index(raw, POLYGON_RECORD_SIZE, cap, LEGACY_HYPOTHESES) {
                    prop_assert!(r.index >= 0);
                    prop_assert!((r.index as usize) < cap);
                }
            }

            #[test]
            fn in_range_raw_always_resolves_directly(cap in 1usize..=1024, seed in any::<u16>()) {
                let raw = (seed as usize % cap) as i16;
                let r = resolve_index(raw, POINT_RECORD_SIZE, cap, LEGACY_HYPOTHESES);
                prop_assert_eq!(r, Some(Resolved { index: raw, via: IndexHypothesis::Direct }));
            }
        }
    }
}
