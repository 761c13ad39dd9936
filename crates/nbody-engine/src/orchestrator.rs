//! One simulation round for one worker.
//!
//! The round overlaps the allgather of partitions with the
//! intra-partition force pass:
//!
//! 1. Publish+Refresh: [`Communicator::iallgather`] of the owned window.
//! 2. Compute-local: [`intra_partition_force`] while the exchange is in flight.
//! 3. Join: [`ExchangeHandle::wait`]; peer windows are now current.
//! 4. Compute-cross: [`cross_partition_force`] over everything outside the window.
//! 5. Integrate: `v += dt·F`, then `x += dt·v`, owned window only.
//!
//! Ownership enforces the ordering: the handle must be consumed by `wait`
//! (which takes the store mutably) before the cross pass can borrow the
//! refreshed store.
//!
//! [`ExchangeHandle::wait`]: nbody_comm::ExchangeHandle::wait

use std::time::Instant;

use nbody_comm::{CommError, Communicator};
use nbody_core::{Force, Round};
use nbody_kernel::{cross_partition_force, integrate, intra_partition_force};
use nbody_store::BodyStore;

use crate::RunMetrics;

/// Drives rounds for one worker and owns its per-round scratch.
///
/// The force buffer is allocated once and zeroed at the start of each round.
#[derive(Debug)]
pub struct RoundOrchestrator {
    dt: f32,
    forces: Vec<Force>,
    metrics: RunMetrics,
}

impl RoundOrchestrator {
    /// Create an orchestrator for a partition of `owned` bodies.
    pub fn new(dt: f32, owned: usize) -> Self {
        Self {
            dt,
            forces: vec![Force::ZERO; owned],
            metrics: RunMetrics::default(),
        }
    }

    /// Timings accumulated so far.
    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }

    /// Consume the orchestrator, keeping its metrics.
    pub fn into_metrics(self) -> RunMetrics {
        self.metrics
    }

    /// Execute one round against `store`.
    ///
    /// On return the owned window holds this round's integrated state and
    /// every peer window holds the state peers started this round with.
    pub fn run_round(
        &mut self,
        round: Round,
        comm: &mut Communicator,
        store: &mut BodyStore,
    ) -> Result<(), CommError> {
        debug_assert_eq!(self.forces.len(), store.owned().len());

        // 1. Publish+Refresh (non-blocking).
        let t = Instant::now();
        let exchange = comm.iallgather(store.owned())?;
        self.metrics.publish_us += RunMetrics::micros(t.elapsed());

        // 2. Compute-local, overlapped with the exchange.
        let t = Instant::now();
        self.forces.fill(Force::ZERO);
        intra_partition_force(store.owned(), &mut self.forces);
        self.metrics.intra_us += RunMetrics::micros(t.elapsed());

        // 3. Join.
        let t = Instant::now();
        exchange.wait(comm, store)?;
        self.metrics.exchange_wait_us += RunMetrics::micros(t.elapsed());

        // 4. Compute-cross against the refreshed view.
        let t = Instant::now();
        cross_partition_force(store.all(), store.owned_range(), &mut self.forces);
        self.metrics.cross_us += RunMetrics::micros(t.elapsed());

        // 5. Integrate the owned window.
        let t = Instant::now();
        integrate(store.owned_mut(), &self.forces, self.dt);
        self.metrics.integrate_us += RunMetrics::micros(t.elapsed());

        self.metrics.rounds += 1;
        log::trace!("worker {}: round {round} done", comm.rank());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nbody_comm::cohort;
    use nbody_core::{initial_bodies, PartitionPlan, WorkerId};
    use nbody_kernel::step_all;

    #[test]
    fn single_worker_round_matches_sequential_step() {
        let bodies = initial_bodies(16, 3);
        let plan = PartitionPlan::new(16, 1).unwrap();
        let mut store = BodyStore::from_bodies(plan, WorkerId(0), bodies.clone()).unwrap();
        let mut comms = cohort(1).unwrap();
        let mut orchestrator = RoundOrchestrator::new(0.01, 16);

        let mut reference = bodies;
        for r in 1..=3 {
            orchestrator
                .run_round(Round(r), &mut comms[0], &mut store)
                .unwrap();
            step_all(&mut reference, 0.01);
        }
        assert_eq!(store.all(), reference.as_slice());
        assert_eq!(orchestrator.metrics().rounds, 3);
    }

    #[test]
    fn empty_partition_still_takes_part_in_exchange() {
        let plan = PartitionPlan::new(0, 1).unwrap();
        let mut store = BodyStore::new(plan, WorkerId(0)).unwrap();
        let mut comms = cohort(1).unwrap();
        let mut orchestrator = RoundOrchestrator::new(0.01, 0);
        orchestrator
            .run_round(Round(1), &mut comms[0], &mut store)
            .unwrap();
        assert_eq!(orchestrator.into_metrics().rounds, 1);
    }
}
