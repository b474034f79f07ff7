//! Arena configuration parameters.

use iwacad_core::{TableKind, MAX_OBJECTS, MAX_POINTS, MAX_POLYGONS};
use thiserror::Error;

/// Table capacities for a [`GeometryArena`](crate::GeometryArena).
///
/// Defaults to the file format's limits. Smaller capacities are allowed
/// (tests, constrained callers); larger ones are rejected because the
/// records could not be written back to disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Point table capacity. Default: 1024.
    pub max_points: usize,
    /// Polygon table capacity. Default: 1024.
    pub max_polygons: usize,
    /// Object table capacity. Default: 256.
    pub max_objects: usize,
}

impl ArenaConfig {
    /// Capacity of the given table.
    pub fn capacity(&self, table: TableKind) -> usize {
        match table {
            TableKind::Object => self.max_objects,
            TableKind::Polygon => self.max_polygons,
            TableKind::Point => self.max_points,
        }
    }

    /// Check every capacity is in `1..=format limit`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for table in [TableKind::Object, TableKind::Polygon, TableKind::Point] {
            let requested = self.capacity(table);
            let limit = table.format_capacity();
            if requested == 0 || requested > limit {
                return Err(ConfigError::Capacity {
                    table,
                    requested,
                    limit,
                });
            }
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            max_points: MAX_POINTS,
            max_polygons: MAX_POLYGONS,
            max_objects: MAX_OBJECTS,
        }
    }
}

/// Rejected [`ArenaConfig`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A capacity is zero or above the format limit.
    #[error("{table} capacity {requested} must be in 1..={limit}")]
    Capacity {
        /// The misconfigured table.
        table: TableKind,
        /// The requested capacity.
        requested: usize,
        /// The format's limit for this table.
        limit: usize,
    },
}
