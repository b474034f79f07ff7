//! iwacad: the geometry store and legacy file format of a polygon-mesh
//! CAD editor.
//!
//! This is the top-level facade crate that re-exports the public API of
//! the iwacad sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use iwacad::prelude::*;
//!
//! let mut arena = GeometryArena::new();
//! arena.add_point(1.0, 2.0, 3.0).unwrap();
//! let tri = arena
//!     .add_polygon_from_coords(3, &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]])
//!     .unwrap();
//!
//! let bytes = arena.save_to_bytes().unwrap();
//!
//! let mut loaded = GeometryArena::new();
//! let report = loaded.load_from_bytes(&bytes).unwrap();
//! assert!(report.is_clean());
//! assert_eq!(loaded.point_count(), 4);
//!
//! let chain: Vec<[f64; 3]> = loaded.polygon_points(tri).map(|(_, p)| p.coords()).collect();
//! assert_eq!(chain[1], [1.0, 0.0, 0.0]);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `iwacad-core` | Index newtypes, records, `ArenaError` |
//! | [`arena`] | `iwacad-arena` | `GeometryArena`, `ChainWalker`, `Selection` |
//! | [`codec`] | `iwacad-codec` | Tagged-record reader and writer |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Index newtypes, record types, and arena errors (`iwacad-core`).
pub use iwacad_core as types;

/// The geometry arena, chain traversal, and selection (`iwacad-arena`).
///
/// [`arena::GeometryArena`] owns the three record tables;
/// [`arena::ChainWalker`] walks any index-linked chain in them.
pub use iwacad_arena as arena;

/// The legacy tagged-record file format (`iwacad-codec`).
///
/// Load with [`codec::load_file`] or [`codec::load_into`], save with
/// [`codec::save_file`] or [`codec::save_arena`].
pub use iwacad_codec as codec;

/// Common imports for typical iwacad usage.
///
/// ```rust
/// use iwacad::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use iwacad_core::{
        ArenaError, Object, ObjectId, Point, PointId, Polygon, PolygonId, TableKind,
        INVALID_INDEX,
    };

    // Arena
    pub use iwacad_arena::{ArenaConfig, ChainEnd, ChainWalker, GeometryArena, Selection};

    // Codec
    pub use iwacad_codec::{
        load_file, save_file, ArenaCodecExt, CodecError, FailureKind, LoadReport, SaveReport,
    };
}
