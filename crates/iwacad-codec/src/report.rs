//! Summaries returned by loads and saves.

use crate::disambiguate::IndexHypothesis;
use crate::layout::RecordTag;

/// How many record indices each hypothesis resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolutionTally {
    /// Resolved as a slot number.
    pub direct: usize,
    /// Resolved as a byte offset.
    pub byte_offset: usize,
    /// Resolved as an unsigned slot number.
    pub unsigned: usize,
}

impl ResolutionTally {
    pub(crate) fn record(&mut self, via: IndexHypothesis) {
        match via {
            IndexHypothesis::Direct => self.direct += 1,
            IndexHypothesis::ByteOffset => self.byte_offset += 1,
            IndexHypothesis::Unsigned => self.unsigned += 1,
        }
    }

    /// Whether any index needed a legacy interpretation.
    pub fn used_legacy(&self) -> bool {
        self.byte_offset + self.unsigned > 0
    }
}

/// A record that was read but not stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkippedRecord {
    /// Byte offset of the record's tag.
    pub offset: u64,
    /// The record's tag.
    pub tag: RecordTag,
    /// The index as stored in the file.
    pub raw_index: i16,
}

/// Outcome of a successful load.
///
/// A load can succeed and still skip records; check
/// [`LoadReport::is_clean`] before treating the file as fully read.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Object records stored.
    pub objects: usize,
    /// Polygon records stored.
    pub polygons: usize,
    /// Point records stored.
    pub points: usize,
    /// Which interpretation resolved each stored index.
    pub resolutions: ResolutionTally,
    /// Records dropped because no interpretation placed them in range.
    pub skipped: Vec<SkippedRecord>,
    /// Bytes consumed from the stream.
    pub bytes_read: u64,
}

impl LoadReport {
    /// Records stored across all tables.
    pub fn applied(&self) -> usize {
        self.objects + self.polygons + self.points
    }

    /// Records stored with the given tag.
    pub fn applied_for(&self, tag: RecordTag) -> usize {
        match tag {
            RecordTag::Object => self.objects,
            RecordTag::Polygon => self.polygons,
            RecordTag::Point => self.points,
        }
    }

    /// Whether every record in the stream was stored.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    pub(crate) fn record_applied(&mut self, tag: RecordTag, via: IndexHypothesis) {
        match tag {
            RecordTag::Object => self.objects += 1,
            RecordTag::Polygon => self.polygons += 1,
            RecordTag::Point => self.points += 1,
        }
        self.resolutions.record(via);
    }
}

/// Outcome of a successful save.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SaveReport {
    /// Object records written.
    pub objects: usize,
    /// Polygon records written.
    pub polygons: usize,
    /// Point records written.
    pub points: usize,
    /// Total bytes written.
    pub bytes_written: u64,
}

impl SaveReport {
    /// Records written across all tables.
    pub fn records(&self) -> usize {
        self.objects + self.polygons + self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_applied_updates_counts_and_tally() {
        let mut report = LoadReport::default();
        report.record_applied(RecordTag::Point, IndexHypothesis::Direct);
        report.record_applied(RecordTag::Point, IndexHypothesis::ByteOffset);
        report.record_applied(RecordTag::Object, IndexHypothesis::Direct);
        assert_eq!(report.points, 2);
        assert_eq!(report.applied(), 3);
        assert_eq!(report.applied_for(RecordTag::Polygon), 0);
        assert_eq!(report.resolutions.direct, 2);
        assert!(report.resolutions.used_legacy());
        assert!(report.is_clean());
    }
}
