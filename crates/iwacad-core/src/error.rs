//! Arena error types and table identification.

use std::fmt;

use thiserror::Error;

use crate::{MAX_OBJECTS, MAX_POINTS, MAX_POLYGONS};

/// The three record tables of a geometry file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TableKind {
    /// Hierarchical object records.
    Object,
    /// Polygon (face) records.
    Polygon,
    /// Point (vertex) records.
    Point,
}

impl TableKind {
    /// The format's fixed capacity for this table.
    pub const fn format_capacity(self) -> usize {
        match self {
            Self::Object => MAX_OBJECTS,
            Self::Polygon => MAX_POLYGONS,
            Self::Point => MAX_POINTS,
        }
    }

    /// Lower-case table name used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Polygon => "polygon",
            Self::Point => "point",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors that can occur during arena operations.
///
/// All variants are recoverable: the arena is left exactly as it was
/// before the failing call.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ArenaError {
    /// The table is full; no slot is left for an append.
    #[error("{table} table full: capacity {capacity}")]
    CapacityExceeded {
        /// The full table.
        table: TableKind,
        /// The table's capacity.
        capacity: usize,
    },

    /// An index outside `[0, capacity)` was given to a store operation.
    #[error("{table} index {index} out of range (capacity {capacity})")]
    OutOfRange {
        /// The table addressed.
        table: TableKind,
        /// The offending raw index.
        index: i16,
        /// The table's capacity.
        capacity: usize,
    },

    /// A polygon chain was requested with an unsupported vertex count.
    #[error("polygon with {requested} points is outside {min}..={max}")]
    BadVertexCount {
        /// Number of vertices requested.
        requested: usize,
        /// Smallest permitted vertex count.
        min: usize,
        /// Largest permitted vertex count.
        max: usize,
    },
}
