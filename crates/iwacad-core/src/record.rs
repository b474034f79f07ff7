//! The three fixed-size record types.
//!
//! Field names follow the on-disk layout. `flags` is the validity byte:
//! zero means the slot is empty, any other value means it is live. The
//! exact non-zero value is preserved so files round-trip unchanged.
//!
//! `Default` is the empty slot: every byte zero, links included. A slot
//! emptied by a table clear therefore reads back with `0` links, not
//! `-1`; only the validity byte says the record is absent.

use crate::id::{ObjectId, PointId, PolygonId};
use crate::traits::Record;

/// Smallest vertex count of a polygon. Two-point polygons are edges used
/// for wireframe construction.
pub const MIN_FACE_POINTS: usize = 2;

/// Largest vertex count of a polygon.
pub const MAX_FACE_POINTS: usize = 12;

/// Flag value written for records created through the arena API.
pub(crate) const LIVE: u8 = 1;

/// A vertex in one polygon's private point chain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    /// Validity byte (0 = empty slot).
    pub flags: u8,
    /// Selection byte carried through the file format.
    pub select_flag: u8,
    /// Next point of the owning polygon, or [`PointId::INVALID`].
    pub next_point: PointId,
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
}

impl Point {
    /// A live, unlinked point at the given coordinates.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            flags: LIVE,
            select_flag: 0,
            next_point: PointId::INVALID,
            x,
            y,
            z,
        }
    }

    /// Coordinates as an array.
    pub fn coords(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl Default for Point {
    fn default() -> Self {
        Self {
            flags: 0,
            select_flag: 0,
            next_point: PointId(0),
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }
}

impl Record for Point {
    fn is_live(&self) -> bool {
        self.flags != 0
    }

    fn set_live(&mut self, live: bool) {
        self.flags = u8::from(live);
    }
}

/// A face: the head of a private point chain plus display attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Polygon {
    /// Validity byte (0 = empty slot).
    pub flags: u8,
    /// Selection byte carried through the file format.
    pub select_flag: u8,
    /// Next polygon in the same object's group, or [`PolygonId::INVALID`].
    pub next_polygon: PolygonId,
    /// Head of this polygon's point chain.
    pub first_point: PointId,
    /// Animation frame index.
    pub animation: i16,
    /// Paired back face for double-sided rendering.
    pub both: PolygonId,
    /// Front/back side byte.
    pub side: u8,
    /// Palette index.
    pub color: u8,
    /// Declared vertex count, nominally `2..=12`.
    ///
    /// This is not trusted: walk the chain to learn the real length.
    pub npoints: u8,
}

impl Polygon {
    /// A live polygon heading the given chain.
    pub fn new(first_point: PointId, color: u8, npoints: u8) -> Self {
        Self {
            flags: LIVE,
            select_flag: 0,
            next_polygon: PolygonId::INVALID,
            first_point,
            animation: 0,
            both: PolygonId::INVALID,
            side: 0,
            color,
            npoints,
        }
    }

    /// Whether the declared vertex count is inside `2..=12`.
    pub fn declares_valid_npoints(&self) -> bool {
        (MIN_FACE_POINTS..=MAX_FACE_POINTS).contains(&usize::from(self.npoints))
    }
}

impl Default for Polygon {
    fn default() -> Self {
        Self {
            flags: 0,
            select_flag: 0,
            next_polygon: PolygonId(0),
            first_point: PointId(0),
            animation: 0,
            both: PolygonId(0),
            side: 0,
            color: 0,
            npoints: 0,
        }
    }
}

impl Record for Polygon {
    fn is_live(&self) -> bool {
        self.flags != 0
    }

    fn set_live(&mut self, live: bool) {
        self.flags = u8::from(live);
    }
}

/// A node in the object tree, grouping a chain of polygons.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Object {
    /// Validity byte (0 = empty slot).
    pub flags: u8,
    /// Selection byte carried through the file format.
    pub select_flag: u8,
    /// Parent object, or [`ObjectId::INVALID`] for a root.
    pub parent_object: ObjectId,
    /// Next sibling under the same parent.
    pub next_brother: ObjectId,
    /// First child object.
    pub child_object: ObjectId,
    /// Head of this object's polygon chain.
    pub first_polygon: PolygonId,
    /// X offset relative to the parent's frame.
    pub offset_x: f64,
    /// Y offset relative to the parent's frame.
    pub offset_y: f64,
    /// Z offset relative to the parent's frame.
    pub offset_z: f64,
}

impl Object {
    /// A live object with no links and the given offset.
    pub fn new(offset: [f64; 3]) -> Self {
        Self {
            flags: LIVE,
            select_flag: 0,
            parent_object: ObjectId::INVALID,
            next_brother: ObjectId::INVALID,
            child_object: ObjectId::INVALID,
            first_polygon: PolygonId::INVALID,
            offset_x: offset[0],
            offset_y: offset[1],
            offset_z: offset[2],
        }
    }

    /// Offset as an array.
    pub fn offset(&self) -> [f64; 3] {
        [self.offset_x, self.offset_y, self.offset_z]
    }

    /// Whether this object has no parent.
    pub fn is_root(&self) -> bool {
        self.parent_object.is_invalid()
    }
}

impl Default for Object {
    fn default() -> Self {
        Self {
            flags: 0,
            select_flag: 0,
            parent_object: ObjectId(0),
            next_brother: ObjectId(0),
            child_object: ObjectId(0),
            first_polygon: PolygonId(0),
            offset_x: 0.0,
            offset_y: 0.0,
            offset_z: 0.0,
        }
    }
}

impl Record for Object {
    fn is_live(&self) -> bool {
        self.flags != 0
    }

    fn set_live(&mut self, live: bool) {
        self.flags = u8::from(live);
    }
}
