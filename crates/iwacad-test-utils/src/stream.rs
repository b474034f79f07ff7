//! Hand-assembled tagged-record streams.
//!
//! [`StreamBuilder`] lays out bytes field by field so tests can craft
//! records the writer never produces: byte-offset indices, unknown tags,
//! short payloads.

use iwacad_core::{Object, Point, Polygon};

/// Builder for raw record streams.
#[derive(Clone, Debug, Default)]
pub struct StreamBuilder {
    bytes: Vec<u8>,
}

impl StreamBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn header(mut self, tag: u8, raw_index: i16) -> Self {
        self.bytes.push(tag);
        self.bytes.extend_from_slice(&raw_index.to_be_bytes());
        self
    }

    fn i16(mut self, v: i16) -> Self {
        self.bytes.extend_from_slice(&v.to_be_bytes());
        self
    }

    fn f64(mut self, v: f64) -> Self {
        self.bytes.extend_from_slice(&v.to_be_bytes());
        self
    }

    fn zeros(mut self, n: usize) -> Self {
        self.bytes.extend(std::iter::repeat(0).take(n));
        self
    }

    /// Append an object record (tag 0) with the given raw index.
    pub fn object(self, raw_index: i16, o: &Object) -> Self {
        self.header(0, raw_index)
            .raw(&[o.flags, o.select_flag])
            .i16(o.parent_object.0)
            .i16(o.next_brother.0)
            .i16(o.child_object.0)
            .i16(o.first_polygon.0)
            .zeros(6)
            .f64(o.offset_x)
            .f64(o.offset_y)
            .f64(o.offset_z)
    }

    /// Append a polygon record (tag 1) with the given raw index.
    pub fn polygon(self, raw_index: i16, p: &Polygon) -> Self {
        self.header(1, raw_index)
            .raw(&[p.flags, p.select_flag])
            .i16(p.next_polygon.0)
            .i16(p.first_point.0)
            .i16(p.animation)
            .i16(p.both.0)
            .raw(&[p.side, p.color, p.npoints])
            .zeros(1)
    }

    /// Append a point record (tag 2) with the given raw index.
    pub fn point(self, raw_index: i16, p: &Point) -> Self {
        self.header(2, raw_index)
            .raw(&[p.flags, p.select_flag])
            .i16(p.next_point.0)
            .zeros(4)
            .f64(p.x)
            .f64(p.y)
            .f64(p.z)
    }

    /// Append arbitrary bytes, e.g. an unknown tag.
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    /// Drop the last `n` bytes, to cut a record short.
    pub fn truncate_by(mut self, n: usize) -> Self {
        let len = self.bytes.len().saturating_sub(n);
        self.bytes.truncate(len);
        self
    }

    /// Current length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}
