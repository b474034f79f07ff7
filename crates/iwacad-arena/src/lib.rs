//! Fixed-capacity geometry arena for the iwacad polygon editor.
//!
//! Points, polygons, and objects live in three parallel tables that are
//! allocated once and never grow. Records link to each other by 16-bit
//! index, so the whole model is a graph stored in flat arrays.
//!
//! # Architecture
//!
//! ```text
//! GeometryArena
//! ├── Table<ObjectId, Object>   (256 slots)
//! ├── Table<PolygonId, Polygon> (1024 slots)
//! └── Table<PointId, Point>     (1024 slots)
//!
//! ChainWalker  ── shared, cycle-safe traversal of any link field
//! Selection    ── ordered set of selected point ids
//! ```
//!
//! # Allocation
//!
//! Allocation is append-only at each table's high-water mark. Removing a
//! record clears its validity flag and leaves a hole; slots are never
//! reused until [`GeometryArena::clear`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod chain;
pub mod config;
pub mod selection;
pub mod table;

pub use arena::{ChainMismatch, GeometryArena};
pub use chain::{ChainEnd, ChainWalker, DEFAULT_MAX_STEPS};
pub use config::{ArenaConfig, ConfigError};
pub use selection::Selection;
pub use table::Table;
