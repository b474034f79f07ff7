//! Reusable arena fixtures.
//!
//! - [`triangle_arena`]: one three-point polygon.
//! - [`minimal_scene`]: a lone point plus a triangle.
//! - [`cyclic_chain_arena`]: a polygon whose point chain loops.
//! - [`object_tree_arena`]: a root with two children, each owning a polygon.
//! - [`quad_grid_arena`]: a grid of quads for throughput tests.
//!
//! Every fixture panics if the arena rejects one of its records, so a
//! fixture never comes back half built.

use iwacad_arena::GeometryArena;
use iwacad_core::{ObjectId, PointId, PolygonId, TableKind};

/// Corner coordinates of the fixture triangle.
pub const TRIANGLE: [[f64; 3]; 3] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];

/// An arena holding one triangle (points 0..3, polygon 0, color 1).
pub fn triangle_arena() -> GeometryArena {
    let mut arena = GeometryArena::new();
    arena
        .add_polygon_from_coords(1, &TRIANGLE)
        .expect("triangle fits in an empty arena");
    arena
}

/// A lone point at `(1, 2, 3)` followed by a triangle: four points and
/// one polygon.
pub fn minimal_scene() -> GeometryArena {
    let mut arena = GeometryArena::new();
    arena
        .add_point(1.0, 2.0, 3.0)
        .expect("lone point fits in an empty arena");
    arena
        .add_polygon_from_coords(3, &TRIANGLE)
        .expect("triangle fits after one point");
    arena
}

/// A polygon with `len` points whose last point links back to the first.
///
/// The polygon declares `len` points, so only the loop makes it malformed.
pub fn cyclic_chain_arena(len: usize) -> (GeometryArena, PolygonId) {
    let mut arena = GeometryArena::new();
    let len = len.clamp(1, arena.capacity(TableKind::Point));
    let ids: Vec<PointId> = (0..len)
        .map(|i| {
            arena
                .add_point(i as f64, 0.0, 0.0)
                .expect("len is clamped to the point capacity")
        })
        .collect();
    for (i, &id) in ids.iter().enumerate() {
        let next = ids[(i + 1) % ids.len()];
        arena.point_mut(id).expect("point was just added").next_point = next;
    }
    let npoints = u8::try_from(len).unwrap_or(u8::MAX);
    let poly = arena
        .add_polygon(ids[0], 0, npoints)
        .expect("polygon table is empty");
    (arena, poly)
}

/// A root object with two children. Each child owns one triangle.
///
/// Returns the arena and `[root, first_child, second_child]`.
pub fn object_tree_arena() -> (GeometryArena, [ObjectId; 3]) {
    let mut arena = GeometryArena::new();
    let root = arena
        .add_object(ObjectId::INVALID, [10.0, 0.0, 0.0])
        .expect("root fits in an empty arena");
    let left = arena
        .add_object(root, [-1.0, 0.0, 0.0])
        .expect("object table has room");
    let right = arena
        .add_object(root, [1.0, 0.0, 0.0])
        .expect("object table has room");
    for (child, color) in [(left, 2), (right, 3)] {
        let poly = arena
            .add_polygon_from_coords(color, &TRIANGLE)
            .expect("two triangles fit");
        assert!(arena.attach_polygon(child, poly));
    }
    (arena, [root, left, right])
}

/// A `side` x `side` grid of unit quads under one root object.
///
/// Stops early when a table fills; a side of 16 uses all 1024 points.
pub fn quad_grid_arena(side: usize) -> GeometryArena {
    let mut arena = GeometryArena::new();
    let root = arena
        .add_object(ObjectId::INVALID, [0.0; 3])
        .expect("root fits in an empty arena");
    'grid: for row in 0..side {
        for col in 0..side {
            let (x, y) = (col as f64, row as f64);
            let quad = [
                [x, y, 0.0],
                [x + 1.0, y, 0.0],
                [x + 1.0, y + 1.0, 0.0],
                [x, y + 1.0, 0.0],
            ];
            match arena.add_polygon_from_coords((row * side + col) as u8, &quad) {
                Ok(poly) => assert!(arena.attach_polygon(root, poly)),
                Err(_) => break 'grid,
            }
        }
    }
    arena
}
