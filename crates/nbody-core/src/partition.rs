//! Near-equal contiguous partitioning of body indices across workers.
//!
//! A [`PartitionPlan`] splits `[0, N)` into `W` contiguous windows whose
//! sizes differ by at most one. The first `N % W` workers get one extra
//! body. The plan doubles as the ownership map: index `i` is written only
//! by [`owner_of(i)`](PartitionPlan::owner_of).

use std::ops::Range;

use crate::{PartitionError, WorkerId};

/// Per-worker body counts and offsets.
///
/// Invariants (checked by the tests below):
/// - `counts.iter().sum() == N`
/// - `offsets[0] == 0` and `offsets[k + 1] == offsets[k] + counts[k]`
/// - `max(counts) - min(counts) <= 1`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartitionPlan {
    counts: Vec<usize>,
    offsets: Vec<usize>,
    bodies: usize,
}

impl PartitionPlan {
    /// Plan `bodies` across `workers`.
    ///
    /// `bodies == 0` is legal and yields empty windows everywhere.
    pub fn new(bodies: usize, workers: usize) -> Result<Self, PartitionError> {
        if workers == 0 {
            return Err(PartitionError::NoWorkers);
        }
        if u32::try_from(workers).is_err() {
            return Err(PartitionError::TooManyWorkers { requested: workers });
        }

        let base = bodies / workers;
        let remainder = bodies % workers;

        let mut counts = Vec::with_capacity(workers);
        let mut offsets = Vec::with_capacity(workers);
        let mut next = 0;
        for k in 0..workers {
            let count = if k < remainder { base + 1 } else { base };
            offsets.push(next);
            counts.push(count);
            next += count;
        }

        Ok(Self {
            counts,
            offsets,
            bodies,
        })
    }

    /// Total number of bodies `N`.
    pub fn body_count(&self) -> usize {
        self.bodies
    }

    /// Number of workers `W`.
    pub fn worker_count(&self) -> usize {
        self.counts.len()
    }

    /// Bodies per worker, indexed by worker.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// First global index of each worker's window.
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Verify `worker` belongs to this plan.
    pub fn check_worker(&self, worker: WorkerId) -> Result<(), PartitionError> {
        if worker.index() < self.worker_count() {
            Ok(())
        } else {
            Err(PartitionError::UnknownWorker {
                worker,
                workers: self.worker_count(),
            })
        }
    }

    /// The window of global indices owned by `worker`.
    pub fn range(&self, worker: WorkerId) -> Option<Range<usize>> {
        let k = worker.index();
        let start = *self.offsets.get(k)?;
        Some(start..start + self.counts[k])
    }

    /// The span excluded from the cross-partition pass for `worker`.
    ///
    /// Identical to [`range`](Self::range): a worker's own window is handled
    /// by the intra-partition pass, everything outside it by the cross pass.
    pub fn exclusion_window(&self, worker: WorkerId) -> Option<Range<usize>> {
        self.range(worker)
    }

    /// The worker that owns global index `index`, or `None` if out of range.
    ///
    /// Empty windows own nothing, so the first non-empty window containing
    /// `index` wins.
    pub fn owner_of(&self, index: usize) -> Option<WorkerId> {
        if index >= self.bodies {
            return None;
        }
        // offsets is non-decreasing; the owner is the last non-empty window
        // starting at or before `index`.
        let k = self.offsets.partition_point(|&o| o <= index) - 1;
        let k = (0..=k).rev().find(|&k| self.counts[k] > 0)?;
        Some(WorkerId(k as u32))
    }

    /// Iterate `(worker, window)` pairs in worker order.
    pub fn windows(&self) -> impl Iterator<Item = (WorkerId, Range<usize>)> + '_ {
        self.offsets
            .iter()
            .zip(&self.counts)
            .enumerate()
            .map(|(k, (&o, &c))| (WorkerId(k as u32), o..o + c))
    }
}
