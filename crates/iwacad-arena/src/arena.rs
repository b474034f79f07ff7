//! The geometry arena: three linked record tables and their editing API.

use iwacad_core::{
    ArenaError, Object, ObjectId, Point, PointId, Polygon, PolygonId, TableKind, MAX_FACE_POINTS,
    MIN_FACE_POINTS,
};
use tracing::{debug, warn};

use crate::chain::{ChainEnd, ChainWalker, DEFAULT_MAX_STEPS};
use crate::config::{ArenaConfig, ConfigError};
use crate::table::Table;

fn next_point(p: &Point) -> PointId {
    p.next_point
}

fn next_polygon(p: &Polygon) -> PolygonId {
    p.next_polygon
}

fn next_brother(o: &Object) -> ObjectId {
    o.next_brother
}

fn parent_object(o: &Object) -> ObjectId {
    o.parent_object
}

/// A polygon whose declared `npoints` disagrees with its walked chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChainMismatch {
    /// The polygon.
    pub polygon: PolygonId,
    /// The stored `npoints` value.
    pub declared: u8,
    /// Live points actually reachable from `first_point`.
    pub walked: usize,
    /// Why the walk stopped.
    pub end: ChainEnd,
}

/// Fixed-capacity store for points, polygons, and objects.
///
/// The arena has a single owner. Tables are allocated once in
/// [`GeometryArena::new`] and never reallocated; [`GeometryArena::clear`]
/// empties them in place.
///
/// # Examples
///
/// ```
/// use iwacad_arena::GeometryArena;
///
/// let mut arena = GeometryArena::new();
/// let tri = arena
///     .add_polygon_from_coords(3, &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]])
///     .unwrap();
///
/// let xs: Vec<f64> = arena.polygon_points(tri).map(|(_, p)| p.x).collect();
/// assert_eq!(xs, vec![0.0, 1.0, 0.0]);
/// assert_eq!(arena.point_count(), 3);
/// ```
pub struct GeometryArena {
    objects: Table<ObjectId, Object>,
    polygons: Table<PolygonId, Polygon>,
    points: Table<PointId, Point>,
}

impl GeometryArena {
    /// Create an empty arena at the format's capacities.
    pub fn new() -> Self {
        Self::build(&ArenaConfig::default())
    }

    /// Create an empty arena with custom capacities.
    pub fn with_config(config: &ArenaConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: &ArenaConfig) -> Self {
        Self {
            objects: Table::new(config.max_objects),
            polygons: Table::new(config.max_polygons),
            points: Table::new(config.max_points),
        }
    }

    /// Empty every table and reset every high-water mark.
    pub fn clear(&mut self) {
        debug!(
            objects = self.objects.count(),
            polygons = self.polygons.count(),
            points = self.points.count(),
            "clearing geometry arena"
        );
        self.objects.clear();
        self.polygons.clear();
        self.points.clear();
    }

    /// Whether no table has ever been written since the last clear.
    pub fn is_empty(&self) -> bool {
        self.objects.count() == 0 && self.polygons.count() == 0 && self.points.count() == 0
    }

    /// Capacity of the given table.
    pub fn capacity(&self, table: TableKind) -> usize {
        match table {
            TableKind::Object => self.objects.capacity(),
            TableKind::Polygon => self.polygons.capacity(),
            TableKind::Point => self.points.capacity(),
        }
    }

    /// High-water mark of the given table.
    pub fn count(&self, table: TableKind) -> usize {
        match table {
            TableKind::Object => self.objects.count(),
            TableKind::Polygon => self.polygons.count(),
            TableKind::Point => self.points.count(),
        }
    }

    /// Point table high-water mark.
    pub fn point_count(&self) -> usize {
        self.points.count()
    }

    /// Polygon table high-water mark.
    pub fn polygon_count(&self) -> usize {
        self.polygons.count()
    }

    /// Object table high-water mark.
    pub fn object_count(&self) -> usize {
        self.objects.count()
    }

    // ── Tables ──────────────────────────────────────────────────

    /// Read access to the point table.
    pub fn points(&self) -> &Table<PointId, Point> {
        &self.points
    }

    /// Read access to the polygon table.
    pub fn polygons(&self) -> &Table<PolygonId, Polygon> {
        &self.polygons
    }

    /// Read access to the object table.
    pub fn objects(&self) -> &Table<ObjectId, Object> {
        &self.objects
    }

    // ── Allocation ──────────────────────────────────────────────

    /// Append an unlinked point.
    pub fn add_point(&mut self, x: f64, y: f64, z: f64) -> Result<PointId, ArenaError> {
        self.points.alloc(Point::new(x, y, z)).map_err(|e| {
            warn!(%e, "point allocation failed");
            e
        })
    }

    /// Append a polygon heading an existing point chain.
    ///
    /// The chain is not validated; `npoints` is stored as given.
    pub fn add_polygon(
        &mut self,
        first_point: PointId,
        color: u8,
        npoints: u8,
    ) -> Result<PolygonId, ArenaError> {
        self.polygons
            .alloc(Polygon::new(first_point, color, npoints))
            .map_err(|e| {
                warn!(%e, "polygon allocation failed");
                e
            })
    }

    /// Append an object, linking it as the last child of `parent`.
    ///
    /// Pass [`ObjectId::INVALID`] to create a root. A `parent` that is not
    /// a live object is treated the same way. The new object goes after
    /// the last stored sibling, cleared ones included, so siblings past a
    /// removed object stay linked.
    pub fn add_object(&mut self, parent: ObjectId, offset: [f64; 3]) -> Result<ObjectId, ArenaError> {
        let parent = if self.objects.get_live(parent).is_some() {
            parent
        } else {
            ObjectId::INVALID
        };
        // Found before allocating: a stale link to the next free slot would
        // otherwise lead the search onto the new object itself.
        let tail = self
            .objects
            .get(parent)
            .and_then(|p| self.sibling_tail(p.child_object));

        let mut object = Object::new(offset);
        object.parent_object = parent;
        let id = self.objects.alloc(object).map_err(|e| {
            warn!(%e, "object allocation failed");
            e
        })?;

        if let Some(prev) = tail.and_then(|t| self.objects.get_mut(t)) {
            prev.next_brother = id;
        } else if let Some(p) = self.objects.get_mut(parent) {
            p.child_object = id;
        }
        Ok(id)
    }

    fn sibling_tail(&self, first: ObjectId) -> Option<ObjectId> {
        self.objects.links(first, next_brother, DEFAULT_MAX_STEPS).last()
    }

    /// Build a polygon from coordinates, giving it a private point chain.
    ///
    /// Requires `2..=12` coordinates. Capacity for every point and the
    /// polygon is checked before anything is written, so on error the
    /// arena is unchanged.
    pub fn add_polygon_from_coords(
        &mut self,
        color: u8,
        coords: &[[f64; 3]],
    ) -> Result<PolygonId, ArenaError> {
        if !(MIN_FACE_POINTS..=MAX_FACE_POINTS).contains(&coords.len()) {
            return Err(ArenaError::BadVertexCount {
                requested: coords.len(),
                min: MIN_FACE_POINTS,
                max: MAX_FACE_POINTS,
            });
        }
        if self.points.remaining() < coords.len() {
            return Err(ArenaError::CapacityExceeded {
                table: TableKind::Point,
                capacity: self.points.capacity(),
            });
        }
        if self.polygons.is_full() {
            return Err(ArenaError::CapacityExceeded {
                table: TableKind::Polygon,
                capacity: self.polygons.capacity(),
            });
        }

        let mut first = PointId::INVALID;
        let mut prev = PointId::INVALID;
        for &[x, y, z] in coords {
            let id = self.points.alloc(Point::new(x, y, z))?;
            if let Some(p) = self.points.get_mut(prev) {
                p.next_point = id;
            } else {
                first = id;
            }
            prev = id;
        }
        // coords.len() <= MAX_FACE_POINTS, so it fits in a u8.
        self.polygons
            .alloc(Polygon::new(first, color, coords.len() as u8))
            .map_err(|e| {
                warn!(%e, "polygon allocation failed");
                e
            })
    }

    /// Add a polygon to the end of an object's polygon chain.
    ///
    /// Returns `false`, changing nothing, if either record is missing or
    /// dead, if the polygon already links to a next polygon, or if it is
    /// already in the chain of any live object (this one included).
    /// Attaching never closes a chain into a loop.
    pub fn attach_polygon(&mut self, object: ObjectId, polygon: PolygonId) -> bool {
        let Some(poly) = self.polygons.get_live(polygon) else {
            return false;
        };
        if !poly.next_polygon.is_invalid() {
            return false;
        }
        let Some(head) = self.objects.get_live(object).map(|o| o.first_polygon) else {
            return false;
        };
        if let Some(owner) = self.polygon_owner(polygon) {
            debug!(%polygon, %owner, %object, "polygon already attached");
            return false;
        }

        let tail = self.polygons.links(head, next_polygon, DEFAULT_MAX_STEPS).last();
        match tail.and_then(|t| self.polygons.get_mut(t)) {
            Some(prev) => prev.next_polygon = polygon,
            None => {
                if let Some(o) = self.objects.get_mut(object) {
                    o.first_polygon = polygon;
                }
            }
        }
        true
    }

    /// The live object whose polygon chain holds `polygon`, following
    /// stored links through cleared polygons.
    fn polygon_owner(&self, polygon: PolygonId) -> Option<ObjectId> {
        self.objects
            .iter_live()
            .find(|(_, o)| {
                self.polygons
                    .links(o.first_polygon, next_polygon, DEFAULT_MAX_STEPS)
                    .any(|p| p == polygon)
            })
            .map(|(id, _)| id)
    }

    // ── Lookup ──────────────────────────────────────────────────

    /// The point at `id`, or `None` outside `[0, point_count)`.
    pub fn point(&self, id: PointId) -> Option<&Point> {
        self.points.get(id)
    }

    /// Mutable access to the point at `id`.
    pub fn point_mut(&mut self, id: PointId) -> Option<&mut Point> {
        self.points.get_mut(id)
    }

    /// The polygon at `id`, or `None` outside `[0, polygon_count)`.
    pub fn polygon(&self, id: PolygonId) -> Option<&Polygon> {
        self.polygons.get(id)
    }

    /// Mutable access to the polygon at `id`.
    pub fn polygon_mut(&mut self, id: PolygonId) -> Option<&mut Polygon> {
        self.polygons.get_mut(id)
    }

    /// The object at `id`, or `None` outside `[0, object_count)`.
    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(id)
    }

    /// Mutable access to the object at `id`.
    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.objects.get_mut(id)
    }

    /// Whether `id` names a live point.
    pub fn is_point_live(&self, id: PointId) -> bool {
        self.points.get_live(id).is_some()
    }

    // ── Bulk store (loader path) ────────────────────────────────

    /// Place a point record at an explicit slot.
    pub fn store_point(&mut self, id: PointId, point: Point) -> Result<(), ArenaError> {
        self.points.store(id, point)
    }

    /// Place a polygon record at an explicit slot.
    pub fn store_polygon(&mut self, id: PolygonId, polygon: Polygon) -> Result<(), ArenaError> {
        self.polygons.store(id, polygon)
    }

    /// Place an object record at an explicit slot.
    pub fn store_object(&mut self, id: ObjectId, object: Object) -> Result<(), ArenaError> {
        self.objects.store(id, object)
    }

    // ── Removal ─────────────────────────────────────────────────

    /// Clear a point's validity flag. Chains through it now end there.
    pub fn remove_point(&mut self, id: PointId) -> bool {
        self.points.remove(id)
    }

    /// Clear a polygon's validity flag and those of its private points.
    pub fn remove_polygon(&mut self, id: PolygonId) -> bool {
        let Some(first) = self.polygons.get_live(id).map(|p| p.first_point) else {
            return false;
        };
        let (chain, _) = self.polygon_chain_from(first).collect_ids();
        for point in chain {
            self.points.remove(point);
        }
        self.polygons.remove(id)
    }

    /// Clear an object's validity flag. Its polygons and children are kept.
    pub fn remove_object(&mut self, id: ObjectId) -> bool {
        self.objects.remove(id)
    }

    // ── Traversal ───────────────────────────────────────────────

    fn polygon_chain_from(&self, first: PointId) -> ChainWalker<'_, PointId, Point> {
        self.points.walk(first, next_point, DEFAULT_MAX_STEPS)
    }

    /// Walk a point chain from any starting point.
    pub fn walk_points(&self, start: PointId, max_steps: usize) -> ChainWalker<'_, PointId, Point> {
        self.points.walk(start, next_point, max_steps)
    }

    /// The live points of a polygon, in chain order.
    ///
    /// Uses the absolute step cap, not the polygon's declared `npoints`.
    /// A missing or dead polygon yields an empty walk.
    pub fn polygon_points(&self, polygon: PolygonId) -> ChainWalker<'_, PointId, Point> {
        let first = self
            .polygons
            .get_live(polygon)
            .map_or(PointId::INVALID, |p| p.first_point);
        self.polygon_chain_from(first)
    }

    /// The polygons grouped under an object, in chain order.
    pub fn object_polygons(&self, object: ObjectId) -> ChainWalker<'_, PolygonId, Polygon> {
        let first = self
            .objects
            .get_live(object)
            .map_or(PolygonId::INVALID, |o| o.first_polygon);
        self.polygons.walk(first, next_polygon, DEFAULT_MAX_STEPS)
    }

    /// The direct children of an object, in sibling order.
    pub fn object_children(&self, object: ObjectId) -> ChainWalker<'_, ObjectId, Object> {
        let first = self
            .objects
            .get_live(object)
            .map_or(ObjectId::INVALID, |o| o.child_object);
        self.objects.walk(first, next_brother, DEFAULT_MAX_STEPS)
    }

    /// Live objects with no parent.
    pub fn root_objects(&self) -> impl Iterator<Item = (ObjectId, &Object)> + '_ {
        self.objects.iter_live().filter(|(_, o)| o.is_root())
    }

    /// An object's offset in the root frame: the sum of offsets along its
    /// parent path. `None` if the object is missing or dead.
    pub fn world_offset(&self, object: ObjectId) -> Option<[f64; 3]> {
        self.objects.get_live(object)?;
        let mut sum = [0.0; 3];
        for (_, o) in self.objects.walk(object, parent_object, DEFAULT_MAX_STEPS) {
            sum[0] += o.offset_x;
            sum[1] += o.offset_y;
            sum[2] += o.offset_z;
        }
        Some(sum)
    }

    /// Live points within `tolerance` of `(x, y, z)` on every axis.
    ///
    /// Points are never shared between polygons, so this is how coincident
    /// vertices are found.
    pub fn points_near(&self, x: f64, y: f64, z: f64, tolerance: f64) -> Vec<PointId> {
        self.points
            .iter_live()
            .filter(|(_, p)| {
                (p.x - x).abs() <= tolerance
                    && (p.y - y).abs() <= tolerance
                    && (p.z - z).abs() <= tolerance
            })
            .map(|(id, _)| id)
            .collect()
    }

    /// Live polygons whose declared `npoints` differs from the number of
    /// points reachable from `first_point`, or whose chain does not end
    /// cleanly.
    pub fn chain_mismatches(&self) -> Vec<ChainMismatch> {
        self.polygons
            .iter_live()
            .filter_map(|(id, poly)| {
                let mut walk = self.polygon_chain_from(poly.first_point);
                let walked = walk.by_ref().count();
                let end = walk.end().unwrap_or(ChainEnd::Terminated);
                (walked != usize::from(poly.npoints) || !end.is_clean()).then_some(ChainMismatch {
                    polygon: id,
                    declared: poly.npoints,
                    walked,
                    end,
                })
            })
            .collect()
    }
}

impl Default for GeometryArena {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(points: usize, polygons: usize, objects: usize) -> GeometryArena {
        GeometryArena::with_config(&ArenaConfig {
            max_points: points,
            max_polygons: polygons,
            max_objects: objects,
        })
        .unwrap()
    }

    #[test]
    fn new_arena_is_empty() {
        let arena = GeometryArena::new();
        assert!(arena.is_empty());
        assert_eq!(arena.capacity(TableKind::Point), 1024);
        assert_eq!(arena.capacity(TableKind::Polygon), 1024);
        assert_eq!(arena.capacity(TableKind::Object), 256);
    }

    #[test]
    fn with_config_rejects_oversized_tables() {
        let err = GeometryArena::with_config(&ArenaConfig {
            max_points: 2048,
            ..ArenaConfig::default()
        });
        assert!(err.is_err());
    }

    #[test]
    fn add_point_returns_pre_increment_index() {
        let mut arena = GeometryArena::new();
        assert_eq!(arena.add_point(1.0, 2.0, 3.0).unwrap(), PointId(0));
        assert_eq!(arena.add_point(4.0, 5.0, 6.0).unwrap(), PointId(1));
        assert_eq!(arena.point_count(), 2);
        let p = arena.point(PointId(1)).unwrap();
        assert_eq!(p.coords(), [4.0, 5.0, 6.0]);
        assert!(p.next_point.is_invalid());
    }

    #[test]
    fn add_polygon_from_coords_links_private_chain() {
        let mut arena = GeometryArena::new();
        let poly = arena
            .add_polygon_from_coords(9, &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]])
            .unwrap();
        let record = *arena.polygon(poly).unwrap();
        assert_eq!(record.npoints, 3);
        assert_eq!(record.color, 9);
        assert_eq!(record.first_point, PointId(0));

        let (ids, end) = arena.polygon_points(poly).collect_ids();
        assert_eq!(ids, vec![PointId(0), PointId(1), PointId(2)]);
        assert_eq!(end, ChainEnd::Terminated);
    }

    #[test]
    fn coincident_points_stay_distinct() {
        let mut arena = GeometryArena::new();
        let square = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]];
        let a = arena.add_polygon_from_coords(0, &square).unwrap();
        let b = arena.add_polygon_from_coords(0, &square).unwrap();
        let a_ids: Vec<_> = arena.polygon_points(a).map(|(id, _)| id).collect();
        let b_ids: Vec<_> = arena.polygon_points(b).map(|(id, _)| id).collect();
        assert!(a_ids.iter().all(|id| !b_ids.contains(id)));
        assert_eq!(arena.points_near(1.0, 0.0, 0.0, 1e-9), vec![PointId(1), PointId(4)]);
    }

    #[test]
    fn add_polygon_from_coords_rejects_bad_counts() {
        let mut arena = GeometryArena::new();
        assert!(matches!(
            arena.add_polygon_from_coords(0, &[[0.0; 3]]),
            Err(ArenaError::BadVertexCount { requested: 1, .. })
        ));
        assert!(matches!(
            arena.add_polygon_from_coords(0, &[[0.0; 3]; 13]),
            Err(ArenaError::BadVertexCount { requested: 13, .. })
        ));
        assert!(arena.is_empty());
    }

    #[test]
    fn two_point_edge_polygon_is_allowed() {
        let mut arena = GeometryArena::new();
        let edge = arena
            .add_polygon_from_coords(0, &[[0.0; 3], [1.0, 1.0, 1.0]])
            .unwrap();
        assert_eq!(arena.polygon(edge).unwrap().npoints, 2);
    }

    #[test]
    fn add_polygon_from_coords_is_all_or_nothing() {
        let mut arena = small(4, 4, 1);
        arena.add_point(0.0, 0.0, 0.0).unwrap();
        arena.add_point(0.0, 0.0, 0.0).unwrap();
        let err = arena
            .add_polygon_from_coords(0, &[[0.0; 3], [1.0; 3], [2.0; 3]])
            .unwrap_err();
        assert!(matches!(
            err,
            ArenaError::CapacityExceeded {
                table: TableKind::Point,
                ..
            }
        ));
        assert_eq!(arena.point_count(), 2);
        assert_eq!(arena.polygon_count(), 0);

        let mut arena = small(8, 1, 1);
        arena.add_polygon(PointId::INVALID, 0, 2).unwrap();
        assert!(arena.add_polygon_from_coords(0, &[[0.0; 3], [1.0; 3]]).is_err());
        assert_eq!(arena.point_count(), 0);
    }

    #[test]
    fn object_tree_links_children_in_order() {
        let mut arena = GeometryArena::new();
        let root = arena.add_object(ObjectId::INVALID, [1.0, 0.0, 0.0]).unwrap();
        let a = arena.add_object(root, [0.0, 2.0, 0.0]).unwrap();
        let b = arena.add_object(root, [0.0, 0.0, 3.0]).unwrap();
        let c = arena.add_object(a, [10.0, 0.0, 0.0]).unwrap();

        assert_eq!(arena.object(root).unwrap().child_object, a);
        assert_eq!(arena.object(a).unwrap().next_brother, b);
        assert_eq!(arena.object(c).unwrap().parent_object, a);

        let children: Vec<_> = arena.object_children(root).map(|(id, _)| id).collect();
        assert_eq!(children, vec![a, b]);

        let roots: Vec<_> = arena.root_objects().map(|(id, _)| id).collect();
        assert_eq!(roots, vec![root]);

        assert_eq!(arena.world_offset(c), Some([11.0, 2.0, 0.0]));
        assert_eq!(arena.world_offset(b), Some([1.0, 0.0, 3.0]));
        assert_eq!(arena.world_offset(ObjectId(99)), None);
    }

    #[test]
    fn add_object_with_dead_parent_makes_root() {
        let mut arena = GeometryArena::new();
        let id = arena.add_object(ObjectId(42), [0.0; 3]).unwrap();
        assert!(arena.object(id).unwrap().is_root());
    }

    #[test]
    fn world_offset_survives_parent_cycle() {
        let mut arena = GeometryArena::new();
        let a = arena.add_object(ObjectId::INVALID, [1.0, 0.0, 0.0]).unwrap();
        let b = arena.add_object(a, [1.0, 0.0, 0.0]).unwrap();
        arena.object_mut(a).unwrap().parent_object = b;
        assert_eq!(arena.world_offset(b), Some([2.0, 0.0, 0.0]));
    }

    #[test]
    fn attach_polygon_appends_to_object_chain() {
        let mut arena = GeometryArena::new();
        let obj = arena.add_object(ObjectId::INVALID, [0.0; 3]).unwrap();
        let p0 = arena.add_polygon_from_coords(1, &[[0.0; 3], [1.0; 3]]).unwrap();
        let p1 = arena.add_polygon_from_coords(2, &[[0.0; 3], [2.0; 3]]).unwrap();
        assert!(arena.attach_polygon(obj, p0));
        assert!(arena.attach_polygon(obj, p1));
        assert!(!arena.attach_polygon(ObjectId(5), p1));
        assert!(!arena.attach_polygon(obj, PolygonId(77)));

        let polys: Vec<_> = arena.object_polygons(obj).map(|(id, _)| id).collect();
        assert_eq!(polys, vec![p0, p1]);
    }

    #[test]
    fn attach_polygon_twice_is_rejected() {
        let mut arena = GeometryArena::new();
        let obj = arena.add_object(ObjectId::INVALID, [0.0; 3]).unwrap();
        let p0 = arena.add_polygon_from_coords(1, &[[0.0; 3], [1.0; 3]]).unwrap();
        assert!(arena.attach_polygon(obj, p0));
        assert!(!arena.attach_polygon(obj, p0));

        assert!(arena.polygon(p0).unwrap().next_polygon.is_invalid());
        let (ids, end) = arena.object_polygons(obj).collect_ids();
        assert_eq!(ids, vec![p0]);
        assert_eq!(end, ChainEnd::Terminated);
    }

    #[test]
    fn attach_polygon_owned_by_another_object_is_rejected() {
        let mut arena = GeometryArena::new();
        let a = arena.add_object(ObjectId::INVALID, [0.0; 3]).unwrap();
        let b = arena.add_object(ObjectId::INVALID, [0.0; 3]).unwrap();
        let p0 = arena.add_polygon_from_coords(1, &[[0.0; 3], [1.0; 3]]).unwrap();
        let p1 = arena.add_polygon_from_coords(2, &[[0.0; 3], [2.0; 3]]).unwrap();
        assert!(arena.attach_polygon(a, p0));
        assert!(arena.attach_polygon(a, p1));
        assert!(!arena.attach_polygon(b, p1));
        assert!(!arena.attach_polygon(b, p0));

        let (ids, end) = arena.object_polygons(a).collect_ids();
        assert_eq!(ids, vec![p0, p1]);
        assert_eq!(end, ChainEnd::Terminated);
        assert!(arena.object(b).unwrap().first_polygon.is_invalid());
        assert!(arena.chain_mismatches().is_empty());
    }

    #[test]
    fn attach_polygon_rejects_linked_polygon_and_sees_past_holes() {
        let mut arena = GeometryArena::new();
        let obj = arena.add_object(ObjectId::INVALID, [0.0; 3]).unwrap();
        let p0 = arena.add_polygon_from_coords(0, &[[0.0; 3], [1.0; 3]]).unwrap();
        let p1 = arena.add_polygon_from_coords(0, &[[0.0; 3], [1.0; 3]]).unwrap();
        let p2 = arena.add_polygon_from_coords(0, &[[0.0; 3], [1.0; 3]]).unwrap();
        arena.polygon_mut(p2).unwrap().next_polygon = p0;
        assert!(!arena.attach_polygon(obj, p2));

        assert!(arena.attach_polygon(obj, p0));
        assert!(arena.attach_polygon(obj, p1));
        // p0 is cleared but still links on to p1.
        arena.remove_polygon(p0);
        assert!(!arena.attach_polygon(obj, p1));
        arena.polygon_mut(p2).unwrap().next_polygon = PolygonId::INVALID;
        assert!(arena.attach_polygon(obj, p2));
        assert_eq!(arena.polygon(p1).unwrap().next_polygon, p2);
    }

    #[test]
    fn add_object_links_after_removed_sibling() {
        let mut arena = GeometryArena::new();
        let root = arena.add_object(ObjectId::INVALID, [0.0; 3]).unwrap();
        let a = arena.add_object(root, [0.0; 3]).unwrap();
        let b = arena.add_object(root, [0.0; 3]).unwrap();
        let c = arena.add_object(root, [0.0; 3]).unwrap();
        arena.remove_object(b);

        let d = arena.add_object(root, [0.0; 3]).unwrap();
        assert_eq!(arena.object(a).unwrap().next_brother, b);
        assert_eq!(arena.object(b).unwrap().next_brother, c);
        assert_eq!(arena.object(c).unwrap().next_brother, d);
        assert!(arena.object(d).unwrap().next_brother.is_invalid());
    }

    #[test]
    fn add_object_ignores_stale_link_to_next_slot() {
        let mut arena = GeometryArena::new();
        let root = arena.add_object(ObjectId::INVALID, [0.0; 3]).unwrap();
        let a = arena.add_object(root, [0.0; 3]).unwrap();
        // Points at the slot the next object will take.
        arena.object_mut(a).unwrap().next_brother = ObjectId(2);

        let b = arena.add_object(root, [0.0; 3]).unwrap();
        assert_eq!(b, ObjectId(2));
        assert_eq!(arena.object(a).unwrap().next_brother, b);
        assert!(arena.object(b).unwrap().next_brother.is_invalid());
        let (children, end) = arena.object_children(root).collect_ids();
        assert_eq!(children, vec![a, b]);
        assert_eq!(end, ChainEnd::Terminated);
    }

    #[test]
    fn remove_polygon_clears_its_points() {
        let mut arena = GeometryArena::new();
        let keep = arena.add_polygon_from_coords(0, &[[0.0; 3], [1.0; 3]]).unwrap();
        let drop = arena.add_polygon_from_coords(0, &[[2.0; 3], [3.0; 3]]).unwrap();
        assert!(arena.remove_polygon(drop));
        assert!(!arena.remove_polygon(drop));
        assert_eq!(arena.points().live_count(), 2);
        assert_eq!(arena.polygons().live_count(), 1);
        assert_eq!(arena.polygon_count(), 2);
        assert_eq!(arena.polygon_points(keep).count(), 2);
        assert_eq!(arena.polygon_points(drop).count(), 0);
    }

    #[test]
    fn clear_resets_counts() {
        let mut arena = GeometryArena::new();
        arena.add_polygon_from_coords(0, &[[0.0; 3], [1.0; 3]]).unwrap();
        arena.add_object(ObjectId::INVALID, [0.0; 3]).unwrap();
        arena.clear();
        assert!(arena.is_empty());
        assert!(arena.point(PointId(0)).is_none());
        assert_eq!(arena.add_point(0.0, 0.0, 0.0).unwrap(), PointId(0));
    }

    #[test]
    fn chain_mismatches_reports_bad_declared_counts() {
        let mut arena = GeometryArena::new();
        let good = arena.add_polygon_from_coords(0, &[[0.0; 3], [1.0; 3], [2.0; 3]]).unwrap();
        let bad = arena.add_polygon_from_coords(0, &[[0.0; 3], [1.0; 3], [2.0; 3]]).unwrap();
        arena.polygon_mut(bad).unwrap().npoints = 5;
        let looped = arena.add_polygon_from_coords(0, &[[0.0; 3], [1.0; 3]]).unwrap();
        let first = arena.polygon(looped).unwrap().first_point;
        let second = arena.point(first).unwrap().next_point;
        arena.point_mut(second).unwrap().next_point = first;

        let mismatches = arena.chain_mismatches();
        assert_eq!(mismatches.len(), 2);
        assert!(mismatches.iter().all(|m| m.polygon != good));
        assert_eq!(
            mismatches[0],
            ChainMismatch {
                polygon: bad,
                declared: 5,
                walked: 3,
                end: ChainEnd::Terminated
            }
        );
        assert_eq!(mismatches[1].polygon, looped);
        assert_eq!(mismatches[1].end, ChainEnd::Cycle);
    }
}
