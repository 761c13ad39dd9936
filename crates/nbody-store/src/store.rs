//! The per-worker copy of the global body sequence.

use std::ops::Range;

use nbody_core::{fill_bodies, Body, PartitionPlan, WorkerId};

use crate::StoreError;

/// A full-length body sequence with a single writable window.
///
/// Global order never changes: slot `i` always holds body `i`. Only the
/// window `plan.range(worker)` is authoritative; the rest reflects whatever
/// the last exchange delivered.
#[derive(Clone, Debug)]
pub struct BodyStore {
    slots: Vec<Body>,
    plan: PartitionPlan,
    worker: WorkerId,
    owned: Range<usize>,
}

impl BodyStore {
    /// Allocate `plan.body_count()` zeroed slots for `worker`.
    ///
    /// Uses a fallible reservation so that an oversized `N` surfaces as
    /// [`StoreError::AllocationFailed`] instead of aborting the process.
    pub fn new(plan: PartitionPlan, worker: WorkerId) -> Result<Self, StoreError> {
        let owned = Self::owned_window(&plan, worker)?;
        let bodies = plan.body_count();
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(bodies)
            .map_err(|_| StoreError::AllocationFailed { bodies })?;
        slots.resize(bodies, Body::ZERO);
        Ok(Self {
            slots,
            plan,
            worker,
            owned,
        })
    }

    /// Allocate like [`new`](Self::new), then fill every slot with the
    /// seeded initial population. This is how the root builds its store.
    pub fn seeded(plan: PartitionPlan, worker: WorkerId, seed: u64) -> Result<Self, StoreError> {
        let mut store = Self::new(plan, worker)?;
        fill_bodies(&mut store.slots, seed);
        Ok(store)
    }

    /// Wrap an already-populated sequence, e.g. the initializer output held
    /// by the root worker.
    pub fn from_bodies(
        plan: PartitionPlan,
        worker: WorkerId,
        bodies: Vec<Body>,
    ) -> Result<Self, StoreError> {
        let owned = Self::owned_window(&plan, worker)?;
        if bodies.len() != plan.body_count() {
            return Err(StoreError::LengthMismatch {
                expected: plan.body_count(),
                actual: bodies.len(),
            });
        }
        Ok(Self {
            slots: bodies,
            plan,
            worker,
            owned,
        })
    }

    fn owned_window(plan: &PartitionPlan, worker: WorkerId) -> Result<Range<usize>, StoreError> {
        plan.check_worker(worker)?;
        Ok(plan.range(worker).unwrap_or(0..0))
    }

    /// The worker that owns this store.
    pub fn worker(&self) -> WorkerId {
        self.worker
    }

    /// The partition plan (ownership map) this store was built against.
    pub fn plan(&self) -> &PartitionPlan {
        &self.plan
    }

    /// Number of body slots `N`.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when the store holds no bodies.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The global index window this worker writes.
    pub fn owned_range(&self) -> Range<usize> {
        self.owned.clone()
    }

    /// Every slot, owned or not.
    pub fn all(&self) -> &[Body] {
        &self.slots
    }

    /// The owned window.
    pub fn owned(&self) -> &[Body] {
        &self.slots[self.owned.clone()]
    }

    /// Mutable access to the owned window. The only write path for
    /// integration.
    pub fn owned_mut(&mut self) -> &mut [Body] {
        &mut self.slots[self.owned.clone()]
    }

    /// Read another worker's window as currently held.
    pub fn partition(&self, worker: WorkerId) -> Option<&[Body]> {
        let range = self.plan.range(worker)?;
        Some(&self.slots[range])
    }

    /// Replace `peer`'s window with freshly received data.
    pub fn refresh(&mut self, peer: WorkerId, bodies: &[Body]) -> Result<(), StoreError> {
        if peer == self.worker {
            return Err(StoreError::OwnedByCaller { worker: peer });
        }
        self.plan.check_worker(peer)?;
        let range = self.plan.range(peer).unwrap_or(0..0);
        if bodies.len() != range.len() {
            return Err(StoreError::LengthMismatch {
                expected: range.len(),
                actual: bodies.len(),
            });
        }
        self.slots[range].copy_from_slice(bodies);
        Ok(())
    }

    /// Overwrite the owned window, as the initial scatter does.
    pub fn fill_owned(&mut self, bodies: &[Body]) -> Result<(), StoreError> {
        let owned = self.owned_mut();
        if bodies.len() != owned.len() {
            return Err(StoreError::LengthMismatch {
                expected: owned.len(),
                actual: bodies.len(),
            });
        }
        owned.copy_from_slice(bodies);
        Ok(())
    }

    /// Consume the store and return the full sequence.
    pub fn into_bodies(self) -> Vec<Body> {
        self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nbody_core::PartitionError;
    use proptest::prelude::*;

    fn body(v: f32) -> Body {
        Body::new([v, v, v], [v, v, v])
    }

    #[test]
    fn new_store_is_zeroed() {
        let plan = PartitionPlan::new(10, 3).unwrap();
        let store = BodyStore::new(plan, WorkerId(1)).unwrap();
        assert_eq!(store.len(), 10);
        assert!(store.all().iter().all(|b| *b == Body::ZERO));
        assert_eq!(store.owned_range(), 4..7);
        assert_eq!(store.owned().len(), 3);
    }

    #[test]
    fn unknown_worker_rejected() {
        let plan = PartitionPlan::new(10, 3).unwrap();
        let err = BodyStore::new(plan, WorkerId(3)).unwrap_err();
        assert_eq!(
            err,
            StoreError::Partition(PartitionError::UnknownWorker {
                worker: WorkerId(3),
                workers: 3
            })
        );
    }

    #[test]
    fn from_bodies_checks_length() {
        let plan = PartitionPlan::new(4, 2).unwrap();
        let err = BodyStore::from_bodies(plan, WorkerId(0), vec![Body::ZERO; 3]).unwrap_err();
        assert_eq!(
            err,
            StoreError::LengthMismatch {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn owned_mut_touches_only_own_window() {
        let plan = PartitionPlan::new(6, 3).unwrap();
        let mut store = BodyStore::new(plan, WorkerId(1)).unwrap();
        for b in store.owned_mut() {
            *b = body(1.0);
        }
        let all = store.all();
        assert_eq!(&all[0..2], &[Body::ZERO; 2]);
        assert_eq!(&all[2..4], &[body(1.0); 2]);
        assert_eq!(&all[4..6], &[Body::ZERO; 2]);
    }

    #[test]
    fn refresh_replaces_peer_window() {
        let plan = PartitionPlan::new(5, 2).unwrap();
        let mut store = BodyStore::new(plan, WorkerId(0)).unwrap();
        store.refresh(WorkerId(1), &[body(2.0), body(3.0)]).unwrap();
        assert_eq!(store.partition(WorkerId(1)).unwrap(), &[body(2.0), body(3.0)]);
        assert_eq!(store.owned(), &[Body::ZERO; 3]);
    }

    #[test]
    fn refresh_refuses_own_window() {
        let plan = PartitionPlan::new(5, 2).unwrap();
        let mut store = BodyStore::new(plan, WorkerId(0)).unwrap();
        let err = store.refresh(WorkerId(0), &[Body::ZERO; 3]).unwrap_err();
        assert_eq!(err, StoreError::OwnedByCaller { worker: WorkerId(0) });
    }

    #[test]
    fn refresh_rejects_wrong_length() {
        let plan = PartitionPlan::new(5, 2).unwrap();
        let mut store = BodyStore::new(plan, WorkerId(0)).unwrap();
        let err = store.refresh(WorkerId(1), &[Body::ZERO; 3]).unwrap_err();
        assert_eq!(
            err,
            StoreError::LengthMismatch {
                expected: 2,
                actual: 3
            }
        );
    }

    #[test]
    fn refresh_of_empty_window_accepts_empty_slice() {
        let plan = PartitionPlan::new(1, 3).unwrap();
        let mut store = BodyStore::new(plan, WorkerId(0)).unwrap();
        store.refresh(WorkerId(2), &[]).unwrap();
    }

    #[test]
    fn fill_owned_then_into_bodies() {
        let plan = PartitionPlan::new(3, 3).unwrap();
        let mut store = BodyStore::new(plan, WorkerId(2)).unwrap();
        store.fill_owned(&[body(9.0)]).unwrap();
        assert_eq!(store.into_bodies(), vec![Body::ZERO, Body::ZERO, body(9.0)]);
    }

    #[test]
    fn oversized_allocation_fails_cleanly() {
        let plan = PartitionPlan::new(usize::MAX / 2, 1).unwrap();
        let err = BodyStore::new(plan, WorkerId(0)).unwrap_err();
        assert_eq!(
            err,
            StoreError::AllocationFailed {
                bodies: usize::MAX / 2
            }
        );
    }

    #[test]
    fn seeded_store_holds_generated_population() {
        let plan = PartitionPlan::new(9, 2).unwrap();
        let store = BodyStore::seeded(plan, WorkerId(0), 4).unwrap();
        assert_eq!(store.all(), nbody_core::initial_bodies(9, 4).as_slice());
        assert_eq!(store.worker(), WorkerId(0));
    }

    #[test]
    fn oversized_seeded_store_fails_cleanly() {
        let plan = PartitionPlan::new(usize::MAX / 4, 2).unwrap();
        let err = BodyStore::seeded(plan, WorkerId(0), 1).unwrap_err();
        assert_eq!(
            err,
            StoreError::AllocationFailed {
                bodies: usize::MAX / 4
            }
        );
    }

    proptest! {
        #[test]
        fn writes_never_leak_outside_owned_window(n in 0usize..200, w in 1usize..16, k in 0usize..16) {
            let k = k % w;
            let plan = PartitionPlan::new(n, w).unwrap();
            let mut store = BodyStore::new(plan, WorkerId(k as u32)).unwrap();
            for b in store.owned_mut() {
                *b = body(1.0);
            }
            let owned = store.owned_range();
            for (i, b) in store.all().iter().enumerate() {
                if owned.contains(&i) {
                    prop_assert_eq!(*b, body(1.0));
                } else {
                    prop_assert_eq!(*b, Body::ZERO);
                }
            }
        }
    }
}
