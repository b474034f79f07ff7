//! Benchmark scenes for the iwacad arena and codec.
//!
//! - [`reference_scene`]: a full point table (16x16 quad grid) under a
//!   small object tree
//! - [`reference_stream`]: the reference scene as written by the codec
//! - [`legacy_stream`]: the same records with polygon and point indices
//!   stored as byte offsets, forcing the fallback resolution path

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use iwacad_arena::GeometryArena;
use iwacad_codec::layout::{POINT_RECORD_SIZE, POLYGON_RECORD_SIZE};
use iwacad_codec::{ArenaCodecExt, CadWriter, CodecError};
use iwacad_core::{ObjectId, PointId, PolygonId, TableKind};
use iwacad_test_utils::quad_grid_arena;

/// Side of the reference quad grid; 16 * 16 quads use all 1024 points.
pub const GRID_SIDE: usize = 16;

/// Build the reference scene: 256 quads, 1024 points, and a root object
/// with eight children.
pub fn reference_scene() -> GeometryArena {
    let mut arena = quad_grid_arena(GRID_SIDE);
    for i in 0..8 {
        arena
            .add_object(ObjectId(0), [i as f64, 0.0, 0.0])
            .expect("object table has room for the tree");
    }
    arena
}

/// The reference scene encoded with direct indices.
pub fn reference_stream() -> Result<Vec<u8>, CodecError> {
    reference_scene().save_to_bytes()
}

/// The reference scene with polygon and point indices written as byte
/// offsets wherever the offset fits in an `i16` and cannot be mistaken
/// for a direct index.
pub fn legacy_stream() -> Result<Vec<u8>, CodecError> {
    let arena = reference_scene();
    let polygon_cap = arena.capacity(TableKind::Polygon);
    let point_cap = arena.capacity(TableKind::Point);
    let mut writer = CadWriter::new(Vec::new());
    for (id, object) in arena.objects().iter_live() {
        writer.write_object(id, object)?;
    }
    for (id, polygon) in arena.polygons().iter_live() {
        let raw = as_byte_offset(id.0, POLYGON_RECORD_SIZE, polygon_cap);
        writer.write_polygon(PolygonId(raw), polygon)?;
    }
    for (id, point) in arena.points().iter_live() {
        let raw = as_byte_offset(id.0, POINT_RECORD_SIZE, point_cap);
        writer.write_point(PointId(raw), point)?;
    }
    writer.finish()
}

fn as_byte_offset(index: i16, record_size: usize, capacity: usize) -> i16 {
    usize::try_from(index)
        .ok()
        .map(|slot| slot * record_size)
        .filter(|&offset| offset >= capacity)
        .and_then(|offset| i16::try_from(offset).ok())
        .unwrap_or(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_stream_loads_like_reference() {
        let mut direct = GeometryArena::new();
        let report = direct.load_from_bytes(&reference_stream().unwrap()).unwrap();
        assert_eq!(report.resolutions.byte_offset, 0);

        let mut legacy = GeometryArena::new();
        let report = legacy.load_from_bytes(&legacy_stream().unwrap()).unwrap();
        assert!(report.is_clean());
        assert!(report.resolutions.byte_offset > 0);
        assert_eq!(
            direct.save_to_bytes().unwrap(),
            legacy.save_to_bytes().unwrap()
        );
    }
}
