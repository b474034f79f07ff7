//! Core types and traits for the iwacad geometry store.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the workspace: index
//! handles, the three record types, table limits, and error types.
//!
//! # Linking model
//!
//! Records never hold references to each other. Every link is a 16-bit
//! signed index into another table, with `-1` meaning "none" / "end of
//! chain":
//!
//! ```text
//! Object ──first_polygon──▶ Polygon ──next_polygon──▶ Polygon ──▶ -1
//!   │                          │
//!   ├─child_object─▶ Object    └─first_point──▶ Point ──next_point──▶ Point ──▶ -1
//!   └─next_brother─▶ Object
//! ```
//!
//! Points are never shared between polygons; every polygon owns a private
//! chain, even when two points coincide in space.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod record;
pub mod traits;

pub use error::{ArenaError, TableKind};
pub use id::{ObjectId, PointId, PolygonId, INVALID_INDEX};
pub use record::{Object, Point, Polygon, MAX_FACE_POINTS, MIN_FACE_POINTS};
pub use traits::{Record, TableId};

/// Maximum number of object records in a file.
pub const MAX_OBJECTS: usize = 256;

/// Maximum number of polygon records in a file.
pub const MAX_POLYGONS: usize = 1024;

/// Maximum number of point records in a file.
pub const MAX_POINTS: usize = 1024;
