//! Fixture arenas and raw stream builders for iwacad development.
//!
//! - [`fixtures`]: small, fully linked arenas for tests and benchmarks.
//! - [`StreamBuilder`]: hand-assembled tagged-record streams, including
//!   malformed ones, built without going through the codec.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod stream;

pub use fixtures::{
    cyclic_chain_arena, minimal_scene, object_tree_arena, quad_grid_arena, triangle_arena,
    TRIANGLE,
};
pub use stream::StreamBuilder;
