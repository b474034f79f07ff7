//! Fixed-size payload layouts.
//!
//! Every multi-byte field is big-endian. Payloads keep the alignment gaps
//! of the legacy in-memory structs; gap bytes are written as zero and
//! ignored on read.
//!
//! ```text
//! Object  (40): flags select parent:i16 brother:i16 child:i16 poly:i16 [6 pad] x:f64 y:f64 z:f64
//! Polygon (14): flags select next:i16 first:i16 anim:i16 both:i16 side color npoints [1 pad]
//! Point   (32): flags select next:i16 [4 pad] x:f64 y:f64 z:f64
//! ```

use iwacad_core::{Object, ObjectId, Point, PointId, Polygon, PolygonId, TableKind};

/// Encoded size of an object payload.
pub const OBJECT_RECORD_SIZE: usize = 40;

/// Encoded size of a polygon payload.
pub const POLYGON_RECORD_SIZE: usize = 14;

/// Encoded size of a point payload.
pub const POINT_RECORD_SIZE: usize = 32;

/// Size of the tag byte plus the big-endian index that precede a payload.
pub const RECORD_HEADER_SIZE: usize = 3;

/// The record tag byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RecordTag {
    /// Tag `0`.
    Object = 0,
    /// Tag `1`.
    Polygon = 1,
    /// Tag `2`.
    Point = 2,
}

impl RecordTag {
    /// Parse a tag byte. Anything but `0..=2` is not part of the format.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Object),
            1 => Some(Self::Polygon),
            2 => Some(Self::Point),
            _ => None,
        }
    }

    /// The tag byte as written to disk.
    pub fn byte(self) -> u8 {
        self as u8
    }

    /// The table records with this tag are stored in.
    pub fn table(self) -> TableKind {
        match self {
            Self::Object => TableKind::Object,
            Self::Polygon => TableKind::Polygon,
            Self::Point => TableKind::Point,
        }
    }

    /// Payload length following the index.
    pub fn payload_len(self) -> usize {
        match self {
            Self::Object => OBJECT_RECORD_SIZE,
            Self::Polygon => POLYGON_RECORD_SIZE,
            Self::Point => POINT_RECORD_SIZE,
        }
    }
}

// ── Field access ────────────────────────────────────────────────

fn put_i16(buf: &mut [u8], at: usize, v: i16) {
    buf[at..at + 2].copy_from_slice(&v.to_be_bytes());
}

fn put_f64(buf: &mut [u8], at: usize, v: f64) {
    buf[at..at + 8].copy_from_slice(&v.to_be_bytes());
}

fn get_i16(buf: &[u8], at: usize) -> i16 {
    i16::from_be_bytes([buf[at], buf[at + 1]])
}

fn get_f64(buf: &[u8], at: usize) -> f64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&buf[at..at + 8]);
    // Bit pattern only: NaN payloads and infinities pass through unchanged.
    f64::from_be_bytes(bytes)
}

// ── Object ──────────────────────────────────────────────────────

/// Encode an object payload.
pub fn encode_object(o: &Object) -> [u8; OBJECT_RECORD_SIZE] {
    let mut buf = [0u8; OBJECT_RECORD_SIZE];
    buf[0] = o.flags;
    buf[1] = o.select_flag;
    put_i16(&mut buf, 2, o.parent_object.0);
    put_i16(&mut buf, 4, o.next_brother.0);
    put_i16(&mut buf, 6, o.child_object.0);
    put_i16(&mut buf, 8, o.first_polygon.0);
    put_f64(&mut buf, 16, o.offset_x);
    put_f64(&mut buf, 24, o.offset_y);
    put_f64(&mut buf, 32, o.offset_z);
    buf
}

/// Decode an object payload.
pub fn decode_object(buf: &[u8; OBJECT_RECORD_SIZE]) -> Object {
    Object {
        flags: buf[0],
        select_flag: buf[1],
        parent_object: ObjectId(get_i16(buf, 2)),
        next_brother: ObjectId(get_i16(buf, 4)),
        child_object: ObjectId(get_i16(buf, 6)),
        first_polygon: PolygonId(get_i16(buf, 8)),
        offset_x: get_f64(buf, 16),
        offset_y: get_f64(buf, 24),
        offset_z: get_f64(buf, 32),
    }
}

// ── Polygon ─────────────────────────────────────────────────────

/// Encode a polygon payload.
pub fn encode_polygon(p: &Polygon) -> [u8; POLYGON_RECORD_SIZE] {
    let mut buf = [0u8; POLYGON_RECORD_SIZE];
    buf[0] = p.flags;
    buf[1] = p.select_flag;
    put_i16(&mut buf, 2, p.next_polygon.0);
    put_i16(&mut buf, 4, p.first_point.0);
    put_i16(&mut buf, 6, p.animation);
    put_i16(&mut buf, 8, p.both.0);
    buf[10] = p.side;
    buf[11] = p.color;
    buf[12] = p.npoints;
    buf
}

/// Decode a polygon payload.
pub fn decode_polygon(buf: &[u8; POLYGON_RECORD_SIZE]) -> Polygon {
    Polygon {
        flags: buf[0],
        select_flag: buf[1],
        next_polygon: PolygonId(get_i16(buf, 2)),
        first_point: PointId(get_i16(buf, 4)),
        animation: get_i16(buf, 6),
        both: PolygonId(get_i16(buf, 8)),
        side: buf[10],
        color: buf[11],
        npoints: buf[12],
    }
}

// ── Point ───────────────────────────────────────────────────────

/// Encode a point payload.
pub fn encode_point(p: &Point) -> [u8; POINT_RECORD_SIZE] {
    let mut buf = [0u8; POINT_RECORD_SIZE];
    buf[0] = p.flags;
    buf[1] = p.select_flag;
    put_i16(&mut buf, 2, p.next_point.0);
    put_f64(&mut buf, 8, p.x);
    put_f64(&mut buf, 16, p.y);
    put_f64(&mut buf, 24, p.z);
    buf
}

/// Decode a point payload.
pub fn decode_point(buf: &[u8; POINT_RECORD_SIZE]) -> Point {
    Point {
        flags: buf[0],
        select_flag: buf[1],
        next_point: PointId(get_i16(buf, 2)),
        x: get_f64(buf, 8),
        y: get_f64(buf, 16),
        z: get_f64(buf, 24),
    }
}
