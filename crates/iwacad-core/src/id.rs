//! Strongly-typed 16-bit index handles.
//!
//! On disk and in memory every link between records is a signed 16-bit
//! index. Wrapping each table's index in its own newtype keeps a point
//! index from ever being used to look up a polygon.

use std::fmt;

use crate::error::TableKind;
use crate::traits::TableId;

/// Raw sentinel stored in link fields to mean "none" or "end of chain".
pub const INVALID_INDEX: i16 = -1;

/// Index of a record in the point table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(pub i16);

impl PointId {
    /// The "no point" / end-of-chain handle.
    pub const INVALID: Self = Self(INVALID_INDEX);

    /// Whether this handle is the `-1` sentinel.
    pub fn is_invalid(self) -> bool {
        self.0 == INVALID_INDEX
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i16> for PointId {
    fn from(v: i16) -> Self {
        Self(v)
    }
}

impl TableId for PointId {
    const KIND: TableKind = TableKind::Point;

    fn from_raw(raw: i16) -> Self {
        Self(raw)
    }

    fn raw(self) -> i16 {
        self.0
    }
}

/// Index of a record in the polygon table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PolygonId(pub i16);

impl PolygonId {
    /// The "no polygon" / end-of-chain handle.
    pub const INVALID: Self = Self(INVALID_INDEX);

    /// Whether this handle is the `-1` sentinel.
    pub fn is_invalid(self) -> bool {
        self.0 == INVALID_INDEX
    }
}

impl fmt::Display for PolygonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i16> for PolygonId {
    fn from(v: i16) -> Self {
        Self(v)
    }
}

impl TableId for PolygonId {
    const KIND: TableKind = TableKind::Polygon;

    fn from_raw(raw: i16) -> Self {
        Self(raw)
    }

    fn raw(self) -> i16 {
        self.0
    }
}

/// Index of a record in the object table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub i16);

impl ObjectId {
    /// The "no object" handle. A root object has this as its parent.
    pub const INVALID: Self = Self(INVALID_INDEX);

    /// Whether this handle is the `-1` sentinel.
    pub fn is_invalid(self) -> bool {
        self.0 == INVALID_INDEX
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i16> for ObjectId {
    fn from(v: i16) -> Self {
        Self(v)
    }
}

impl TableId for ObjectId {
    const KIND: TableKind = TableKind::Object;

    fn from_raw(raw: i16) -> Self {
        Self(raw)
    }

    fn raw(self) -> i16 {
        self.0
    }
}
