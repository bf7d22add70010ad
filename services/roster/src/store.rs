//! In-memory occupancy store: the slot-to-assignment mapping.

use std::collections::BTreeMap;

use roster_grid::{Assignment, Slot, TOTAL_SLOTS};

/// The current occupancy of the grid.
///
/// Keys are slots, and `BTreeMap` iteration order is the canonical scan
/// order (team ascending, then lane ascending). Invariants:
///
/// - at most one assignment per slot (map key uniqueness);
/// - at most one assignment per user: [`OccupancyStore::occupy`] vacates
///   the user's old slot before recording the new one;
/// - every key is a validated [`Slot`], so it lies within the grid.
#[derive(Debug, Default)]
pub struct OccupancyStore {
    assignments: BTreeMap<Slot, Assignment>,
}

impl OccupancyStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from persisted assignments.
    ///
    /// Restoration re-establishes the invariants rather than trusting the
    /// input: if two records claim the same slot the later one wins, and a
    /// user appearing twice keeps only the last slot.
    pub fn from_assignments(assignments: impl IntoIterator<Item = Assignment>) -> Self {
        let mut store = Self::new();
        for assignment in assignments {
            store.vacate(assignment.user());
            store.assignments.insert(assignment.slot(), assignment);
        }
        store
    }

    /// Records `user` at `slot` if the slot is free.
    ///
    /// Returns `false` and changes nothing when the slot is occupied, even
    /// when the occupant is `user` themselves. On success, any previous slot
    /// held by `user` is vacated first, so reassignment is a move.
    pub fn occupy(&mut self, user: &str, slot: Slot) -> bool {
        if self.assignments.contains_key(&slot) {
            return false;
        }
        self.vacate(user);
        self.assignments.insert(slot, Assignment::at(user, slot));
        true
    }

    /// Removes every assignment bound to `user`.
    ///
    /// Returns `true` iff at least one was removed. The invariant means at
    /// most one exists; the full sweep enforces that rather than assuming it.
    pub fn vacate(&mut self, user: &str) -> bool {
        let before = self.assignments.len();
        self.assignments.retain(|_, a| a.user() != user);
        self.assignments.len() != before
    }

    /// The slot bound to `user`, if any.
    #[must_use]
    pub fn slot_of(&self, user: &str) -> Option<Slot> {
        self.assignments
            .values()
            .find(|a| a.user() == user)
            .map(Assignment::slot)
    }

    /// The first free slot in scan order, or `None` when the grid is full.
    #[must_use]
    pub fn first_free(&self) -> Option<Slot> {
        Slot::scan().find(|slot| !self.assignments.contains_key(slot))
    }

    /// Read-only view of all assignments, keyed by slot in scan order.
    #[must_use]
    pub fn assignments(&self) -> &BTreeMap<Slot, Assignment> {
        &self.assignments
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// True when no slot is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// True when every slot in the grid is occupied.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.assignments.len() == TOTAL_SLOTS
    }

    /// Removes every assignment.
    pub fn clear(&mut self) {
        self.assignments.clear();
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    fn slot(team: i64, lane: i64) -> Slot {
        Slot::new(team, lane).unwrap()
    }

    #[fixture]
    fn store() -> OccupancyStore {
        OccupancyStore::new()
    }

    #[rstest]
    fn test_occupy_empty_slot(mut store: OccupancyStore) {
        assert!(store.occupy("alice", slot(1, 3)));
        assert_eq!(store.len(), 1);
        assert_eq!(store.slot_of("alice"), Some(slot(1, 3)));
    }

    #[rstest]
    fn test_occupy_taken_slot_leaves_original(mut store: OccupancyStore) {
        assert!(store.occupy("alice", slot(1, 3)));
        assert!(!store.occupy("bob", slot(1, 3)));
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.assignments().get(&slot(1, 3)).unwrap().user(),
            "alice"
        );
        assert_eq!(store.slot_of("bob"), None);
    }

    #[rstest]
    fn test_occupy_own_slot_is_refused(mut store: OccupancyStore) {
        assert!(store.occupy("alice", slot(1, 3)));
        // A slot held by the requester still counts as taken.
        assert!(!store.occupy("alice", slot(1, 3)));
        assert_eq!(store.slot_of("alice"), Some(slot(1, 3)));
    }

    #[rstest]
    fn test_occupy_moves_user(mut store: OccupancyStore) {
        assert!(store.occupy("alice", slot(1, 3)));
        assert!(store.occupy("alice", slot(2, 5)));
        assert_eq!(store.len(), 1);
        assert_eq!(store.slot_of("alice"), Some(slot(2, 5)));
        assert!(!store.assignments().contains_key(&slot(1, 3)));
    }

    #[rstest]
    fn test_vacate(mut store: OccupancyStore) {
        assert!(!store.vacate("alice"));
        store.occupy("alice", slot(3, 1));
        assert!(store.vacate("alice"));
        assert!(store.is_empty());
        assert!(!store.vacate("alice"));
    }

    #[rstest]
    fn test_first_free_scan_order(mut store: OccupancyStore) {
        assert_eq!(store.first_free(), Some(slot(1, 1)));
        store.occupy("alice", slot(1, 1));
        assert_eq!(store.first_free(), Some(slot(1, 2)));

        // Fill team 1 entirely; the scan rolls over to team 2.
        for lane in 2..=8 {
            store.occupy(&format!("user-1-{lane}"), slot(1, lane));
        }
        assert_eq!(store.first_free(), Some(slot(2, 1)));
    }

    #[rstest]
    fn test_first_free_none_when_full(mut store: OccupancyStore) {
        for s in Slot::scan() {
            store.occupy(&format!("user-{s}"), s);
        }
        assert!(store.is_full());
        assert_eq!(store.first_free(), None);
    }

    #[rstest]
    fn test_from_assignments_restores(mut store: OccupancyStore) {
        store.occupy("alice", slot(1, 3));
        store.occupy("bob", slot(2, 1));
        let restored = OccupancyStore::from_assignments(store.assignments().values().cloned());
        assert_eq!(restored.assignments(), store.assignments());
    }

    #[test]
    fn test_from_assignments_deduplicates_users() {
        let restored = OccupancyStore::from_assignments([
            Assignment::new("alice", 1, 1).unwrap(),
            Assignment::new("alice", 2, 2).unwrap(),
        ]);
        assert_eq!(restored.len(), 1);
        assert_eq!(restored.slot_of("alice"), Some(Slot::new(2, 2).unwrap()));
    }

    #[rstest]
    fn test_clear(mut store: OccupancyStore) {
        store.occupy("alice", slot(1, 1));
        store.occupy("bob", slot(1, 2));
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.first_free(), Some(slot(1, 1)));
    }
}
