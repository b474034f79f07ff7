//! The editor's point selection.

use indexmap::IndexSet;
use iwacad_core::PointId;

use crate::arena::GeometryArena;

/// An ordered set of selected point ids.
///
/// Iteration follows insertion order; removing an id keeps the relative
/// order of the rest. Ids are not checked against an arena on insert, so
/// call [`Selection::retain_live`] after edits that may remove points.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    ids: IndexSet<PointId>,
}

impl Selection {
    /// An empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` is selected.
    pub fn contains(&self, id: PointId) -> bool {
        self.ids.contains(&id)
    }

    /// Select `id`. Returns `false` if it was already selected.
    pub fn insert(&mut self, id: PointId) -> bool {
        self.ids.insert(id)
    }

    /// Deselect `id`. Returns `false` if it was not selected.
    pub fn remove(&mut self, id: PointId) -> bool {
        self.ids.shift_remove(&id)
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Number of selected ids.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = PointId> + '_ {
        self.ids.iter().copied()
    }

    /// Replace the selection with every live point in the arena.
    pub fn select_all(&mut self, arena: &GeometryArena) {
        self.ids.clear();
        self.ids.extend(arena.points().iter_live().map(|(id, _)| id));
    }

    /// Drop ids that no longer name a live point.
    pub fn retain_live(&mut self, arena: &GeometryArena) {
        self.ids.retain(|&id| arena.is_point_live(id));
    }
}

impl Extend<PointId> for Selection {
    fn extend<T: IntoIterator<Item = PointId>>(&mut self, iter: T) {
        self.ids.extend(iter);
    }
}

impl FromIterator<PointId> for Selection {
    fn from_iter<T: IntoIterator<Item = PointId>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_is_idempotent() {
        let mut sel = Selection::new();
        assert!(sel.insert(PointId(3)));
        assert!(!sel.insert(PointId(3)));
        assert_eq!(sel.len(), 1);
        assert!(sel.contains(PointId(3)));
    }

    #[test]
    fn remove_keeps_order() {
        let mut sel: Selection = [5, 1, 9, 2].into_iter().map(PointId).collect();
        assert!(sel.remove(PointId(1)));
        assert!(!sel.remove(PointId(1)));
        let ids: Vec<_> = sel.iter().collect();
        assert_eq!(ids, vec![PointId(5), PointId(9), PointId(2)]);
    }

    #[test]
    fn clear_empties() {
        let mut sel: Selection = [0, 1].into_iter().map(PointId).collect();
        sel.clear();
        assert!(sel.is_empty());
    }

    #[test]
    fn select_all_and_retain_live_track_arena() {
        let mut arena = GeometryArena::new();
        let a = arena.add_point(0.0, 0.0, 0.0).unwrap();
        let b = arena.add_point(1.0, 0.0, 0.0).unwrap();
        let c = arena.add_point(2.0, 0.0, 0.0).unwrap();

        let mut sel = Selection::new();
        sel.insert(PointId(500));
        sel.select_all(&arena);
        assert_eq!(sel.iter().collect::<Vec<_>>(), vec![a, b, c]);

        arena.remove_point(b);
        sel.insert(PointId(-1));
        sel.retain_live(&arena);
        assert_eq!(sel.iter().collect::<Vec<_>>(), vec![a, c]);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn iteration_has_no_duplicates(raw in proptest::collection::vec(0i16..50, 0..100)) {
                let sel: Selection = raw.iter().copied().map(PointId).collect();
                let ids: Vec<_> = sel.iter().collect();
                let mut dedup = ids.clone();
                dedup.sort();
                dedup.dedup();
                prop_assert_eq!(ids.len(), dedup.len());
                prop_assert!(raw.iter().all(|&r| sel.contains(PointId(r))));
            }
        }
    }
}
