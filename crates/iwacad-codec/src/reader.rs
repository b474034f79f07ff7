//! Tagged-record stream reader.
//!
//! [`CadReader`] decodes records one at a time from any `Read` source and
//! resolves each record's index against a set of table capacities.
//! [`load_into`] drives a reader and stores the records in an arena.

use std::io::{ErrorKind, Read};

use iwacad_arena::{ArenaConfig, GeometryArena};
use iwacad_core::{Object, ObjectId, Point, PointId, Polygon, PolygonId, Record, TableKind};
use tracing::{debug, info, warn};

use crate::disambiguate::{hypotheses_for, resolve_index, Resolved};
use crate::error::CodecError;
use crate::layout::{
    decode_object, decode_point, decode_polygon, RecordTag, OBJECT_RECORD_SIZE,
    POINT_RECORD_SIZE, POLYGON_RECORD_SIZE,
};
use crate::report::{LoadReport, SkippedRecord};

/// Records per tag whose resolution is logged at debug level.
const DEBUG_RECORDS_PER_TAG: usize = 5;

/// Bytes captured after an unknown tag for the error's hex dump.
const UNKNOWN_TAG_PEEK: usize = 16;

/// A decoded payload.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Payload {
    /// Tag `0`.
    Object(Object),
    /// Tag `1`.
    Polygon(Polygon),
    /// Tag `2`.
    Point(Point),
}

impl Payload {
    /// The tag this payload was read under.
    pub fn tag(&self) -> RecordTag {
        match self {
            Self::Object(_) => RecordTag::Object,
            Self::Polygon(_) => RecordTag::Polygon,
            Self::Point(_) => RecordTag::Point,
        }
    }
}

/// One record as read from the stream.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecodedRecord {
    /// Byte offset of the tag.
    pub offset: u64,
    /// The index as stored in the file.
    pub raw_index: i16,
    /// Where the record belongs, or `None` if no interpretation of
    /// `raw_index` is in range.
    pub resolved: Option<Resolved>,
    /// The payload, with its tag.
    pub payload: Payload,
}

impl DecodedRecord {
    /// The record's tag.
    pub fn tag(&self) -> RecordTag {
        self.payload.tag()
    }
}

/// Reads tagged records from a byte stream.
///
/// Generic over `R: Read` so tests can use `&[u8]` and production
/// code can use `BufReader<File>`.
pub struct CadReader<R: Read> {
    reader: R,
    capacities: ArenaConfig,
    offset: u64,
    records_read: u64,
}

impl<R: Read> CadReader<R> {
    /// A reader that resolves indices against the format's table limits.
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, &ArenaConfig::default())
    }

    /// A reader that resolves indices against custom capacities.
    pub fn with_config(reader: R, config: &ArenaConfig) -> Self {
        Self {
            reader,
            capacities: config.clone(),
            offset: 0,
            records_read: 0,
        }
    }

    /// A reader that resolves indices against an arena's capacities.
    pub fn for_arena(reader: R, arena: &GeometryArena) -> Self {
        let config = ArenaConfig {
            max_points: arena.capacity(TableKind::Point),
            max_polygons: arena.capacity(TableKind::Polygon),
            max_objects: arena.capacity(TableKind::Object),
        };
        Self::with_config(reader, &config)
    }

    /// Bytes consumed so far.
    pub fn bytes_read(&self) -> u64 {
        self.offset
    }

    /// Records decoded so far.
    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    /// Read the next record, or `None` at a clean end of stream.
    ///
    /// End of stream before a tag byte is clean; end of stream anywhere
    /// inside a record is [`CodecError::Truncated`].
    pub fn next_record(&mut self) -> Result<Option<DecodedRecord>, CodecError> {
        let start = self.offset;
        let mut tag_byte = [0u8; 1];
        if self.fill(&mut tag_byte)? == 0 {
            return Ok(None);
        }
        let Some(tag) = RecordTag::from_byte(tag_byte[0]) else {
            let mut peek = [0u8; UNKNOWN_TAG_PEEK];
            let n = self.fill(&mut peek)?;
            let err = CodecError::UnknownTag {
                offset: start,
                tag: tag_byte[0],
                following: peek[..n].to_vec(),
            };
            warn!(%err, "not a tagged-record stream");
            return Err(err);
        };

        let mut index = [0u8; 2];
        self.read_part(&mut index, start, "record index")?;
        let raw_index = i16::from_be_bytes(index);

        let payload = match tag {
            RecordTag::Object => {
                let mut buf = [0u8; OBJECT_RECORD_SIZE];
                self.read_part(&mut buf, start, "object payload")?;
                Payload::Object(decode_object(&buf))
            }
            RecordTag::Polygon => {
                let mut buf = [0u8; POLYGON_RECORD_SIZE];
                self.read_part(&mut buf, start, "polygon payload")?;
                Payload::Polygon(decode_polygon(&buf))
            }
            RecordTag::Point => {
                let mut buf = [0u8; POINT_RECORD_SIZE];
                self.read_part(&mut buf, start, "point payload")?;
                Payload::Point(decode_point(&buf))
            }
        };

        let capacity = self.capacities.capacity(tag.table());
        let resolved = resolve_index(raw_index, tag.payload_len(), capacity, hypotheses_for(tag));
        self.records_read += 1;
        Ok(Some(DecodedRecord {
            offset: start,
            raw_index,
            resolved,
            payload,
        }))
    }

    /// Convert into a record iterator.
    pub fn records(self) -> Records<R> {
        Records {
            reader: self,
            done: false,
        }
    }

    /// Read until `buf` is full or the stream ends; returns bytes read.
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize, CodecError> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(CodecError::Io(e)),
            }
        }
        self.offset += filled as u64;
        Ok(filled)
    }

    fn read_part(
        &mut self,
        buf: &mut [u8],
        record_offset: u64,
        what: &'static str,
    ) -> Result<(), CodecError> {
        let got = self.fill(buf)?;
        if got < buf.len() {
            return Err(CodecError::Truncated {
                offset: record_offset,
                what,
                expected: buf.len(),
                got,
            });
        }
        Ok(())
    }
}

/// Iterator adapter over decoded records. Stops after the first error.
pub struct Records<R: Read> {
    reader: CadReader<R>,
    done: bool,
}

impl<R: Read> Records<R> {
    /// Bytes consumed so far.
    pub fn bytes_read(&self) -> u64 {
        self.reader.bytes_read()
    }
}

impl<R: Read> Iterator for Records<R> {
    type Item = Result<DecodedRecord, CodecError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Decode a whole stream into `arena`.
///
/// The arena is not cleared first; later records overwrite earlier ones
/// at the same slot. On error, records already applied stay applied and
/// the arena should be cleared before reuse.
pub fn load_into<R: Read>(arena: &mut GeometryArena, reader: R) -> Result<LoadReport, CodecError> {
    let mut reader = CadReader::for_arena(reader, arena);
    let mut report = LoadReport::default();
    while let Some(record) = reader.next_record()? {
        apply(arena, record, &mut report);
    }
    report.bytes_read = reader.bytes_read();
    info!(
        objects = report.objects,
        polygons = report.polygons,
        points = report.points,
        skipped = report.skipped.len(),
        bytes = report.bytes_read,
        "geometry stream loaded"
    );
    Ok(report)
}

fn apply(arena: &mut GeometryArena, record: DecodedRecord, report: &mut LoadReport) {
    let tag = record.tag();
    let skip = SkippedRecord {
        offset: record.offset,
        tag,
        raw_index: record.raw_index,
    };
    let Some(resolved) = record.resolved else {
        warn!(
            offset = record.offset,
            table = %tag.table(),
            raw_index = record.raw_index,
            "record index out of range under every interpretation, skipping"
        );
        report.skipped.push(skip);
        return;
    };

    if report.applied_for(tag) < DEBUG_RECORDS_PER_TAG {
        debug!(
            offset = record.offset,
            table = %tag.table(),
            raw_index = record.raw_index,
            raw_hex = format_args!("{:#06x}", record.raw_index as u16),
            index = resolved.index,
            via = ?resolved.via,
            "record index resolved"
        );
    }

    let stored = match record.payload {
        Payload::Object(o) => arena.store_object(ObjectId(resolved.index), o),
        Payload::Polygon(p) => {
            if p.is_live() && !p.declares_valid_npoints() {
                warn!(
                    offset = record.offset,
                    index = resolved.index,
                    npoints = p.npoints,
                    "polygon declares a vertex count outside 2..=12"
                );
            }
            arena.store_polygon(PolygonId(resolved.index), p)
        }
        Payload::Point(p) => arena.store_point(PointId(resolved.index), p),
    };
    match stored {
        Ok(()) => report.record_applied(tag, resolved.via),
        Err(e) => {
            warn!(%e, offset = record.offset, "record could not be stored, skipping");
            report.skipped.push(skip);
        }
    }
}
