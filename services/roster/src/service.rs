//! Allocation policy over the occupancy store.
//!
//! # Invariants
//!
//! - Each compound mutation (try-place-fall-back, vacate, reset) runs in a
//!   single lock scope, so concurrent front-end calls cannot interleave in
//!   a way that hands two callers the same free slot.
//! - Snapshot saves happen after the lock is released, from the snapshot
//!   taken inside it; a failed save never rolls back in-memory state.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use roster_grid::{Assignment, GridError, Slot};
use tracing::warn;

use crate::persist::SnapshotStore;
use crate::store::OccupancyStore;

/// Grid-wide view: team number to lane number to occupant.
///
/// Every team and lane of the grid is present; empty lanes map to `None`.
pub type TeamStatus = BTreeMap<u8, BTreeMap<u8, Option<String>>>;

/// Assignment policy over the shared [`OccupancyStore`].
///
/// Owns the store behind a mutex and is the only component that mutates
/// it. Constructed once at startup and shared by every front end.
pub struct AllocationService {
    store: Mutex<OccupancyStore>,
    snapshots: Option<Box<dyn SnapshotStore>>,
}

impl AllocationService {
    /// Creates a service with no persistence.
    #[must_use]
    pub fn new(store: OccupancyStore) -> Self {
        Self {
            store: Mutex::new(store),
            snapshots: None,
        }
    }

    /// Creates a service that writes a snapshot after every successful
    /// mutation.
    #[must_use]
    pub fn with_snapshots(store: OccupancyStore, snapshots: Box<dyn SnapshotStore>) -> Self {
        Self {
            store: Mutex::new(store),
            snapshots: Some(snapshots),
        }
    }

    fn lock(&self) -> MutexGuard<'_, OccupancyStore> {
        self.store.lock().expect("occupancy store lock poisoned")
    }

    fn save_snapshot(&self, assignments: &BTreeMap<Slot, Assignment>) {
        let Some(snapshots) = &self.snapshots else {
            return;
        };
        if let Err(e) = snapshots.save(assignments) {
            // In-memory state stays authoritative; the save is best-effort.
            warn!(error = %e, "failed to persist occupancy snapshot");
        }
    }

    /// Tries the requested slot, then the other lanes on the same team, then
    /// falls back to suggesting the first free slot anywhere.
    ///
    /// Returns `(placed, suggestion)`:
    /// - `(true, None)`: the requested slot was taken as asked;
    /// - `(false, Some(slot))` after a same-team fallback: the user **was
    ///   placed** at `slot`;
    /// - `(false, Some(slot))` after the grid-wide scan: `slot` is only a
    ///   suggestion, nothing was placed;
    /// - `(false, None)`: the grid is full.
    ///
    /// The same-team fallback commits while the grid-wide fallback only
    /// advises, and the reply shape cannot tell the two `Some` cases apart.
    /// Existing callers depend on exactly this contract.
    pub fn assign_to_slot(
        &self,
        user: &str,
        team: i64,
        lane: i64,
    ) -> Result<(bool, Option<Slot>), GridError> {
        let requested = Slot::new(team, lane)?;
        let (result, snapshot) = {
            let mut store = self.lock();
            if store.occupy(user, requested) {
                ((true, None), Some(store.assignments().clone()))
            } else if let Some(alt) = requested
                .same_team_alternatives()
                .find(|&alt| store.occupy(user, alt))
            {
                ((false, Some(alt)), Some(store.assignments().clone()))
            } else {
                // Advisory only: the whole-grid fallback does not place.
                ((false, store.first_free()), None)
            }
        };
        if let Some(snapshot) = snapshot {
            self.save_snapshot(&snapshot);
        }
        Ok(result)
    }

    /// Places the user at the first free slot in scan order, if any.
    ///
    /// Unlike the grid-wide fallback of [`AllocationService::assign_to_slot`],
    /// this always commits when a slot is found.
    pub fn assign_any_free(&self, user: &str) -> Option<Slot> {
        let (placed, snapshot) = {
            let mut store = self.lock();
            match store.first_free() {
                Some(slot) => {
                    store.occupy(user, slot);
                    (Some(slot), Some(store.assignments().clone()))
                }
                None => (None, None),
            }
        };
        if let Some(snapshot) = snapshot {
            self.save_snapshot(&snapshot);
        }
        placed
    }

    /// Removes the user's assignment. Returns `false` when none existed.
    pub fn remove(&self, user: &str) -> bool {
        let (removed, snapshot) = {
            let mut store = self.lock();
            let removed = store.vacate(user);
            let snapshot = removed.then(|| store.assignments().clone());
            (removed, snapshot)
        };
        if let Some(snapshot) = snapshot {
            self.save_snapshot(&snapshot);
        }
        removed
    }

    /// The user's current assignment, if any.
    pub fn find_assignment(&self, user: &str) -> Option<Assignment> {
        let store = self.lock();
        store
            .slot_of(user)
            .and_then(|slot| store.assignments().get(&slot).cloned())
    }

    /// Snapshot of all assignments keyed by slot, in scan order.
    pub fn list_all(&self) -> BTreeMap<Slot, Assignment> {
        self.lock().assignments().clone()
    }

    /// Grid-wide view with every lane present, `None` where empty.
    pub fn team_status(&self) -> TeamStatus {
        let store = self.lock();
        let mut status = TeamStatus::new();
        for slot in Slot::scan() {
            let occupant = store
                .assignments()
                .get(&slot)
                .map(|a| a.user().to_string());
            status
                .entry(slot.team())
                .or_default()
                .insert(slot.lane(), occupant);
        }
        status
    }

    /// Number of occupied slots.
    pub fn occupied(&self) -> usize {
        self.lock().len()
    }

    /// Clears the whole grid.
    pub fn reset(&self) {
        let snapshot = {
            let mut store = self.lock();
            store.clear();
            store.assignments().clone()
        };
        self.save_snapshot(&snapshot);
    }
}
