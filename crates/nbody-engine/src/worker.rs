//! The per-worker program.
//!
//! Every worker runs [`run_worker`] with its own communicator. The root
//! additionally seeds the initial population and ends up holding the
//! consolidated result.

use std::time::{Duration, Instant};

use nbody_comm::Communicator;
use nbody_core::{Body, PartitionPlan, Round, WorkerId, ROOT};
use nbody_store::BodyStore;

use crate::{collect, RoundOrchestrator, RunError, RunMetrics, SimConfig};

/// What one worker hands back when it finishes.
#[derive(Clone, Debug, PartialEq)]
pub struct WorkerOutcome {
    /// The worker that produced this outcome.
    pub worker: WorkerId,
    /// The consolidated sequence; `Some` on the root only.
    pub bodies: Option<Vec<Body>>,
    /// Time between the opening and closing barriers.
    pub elapsed: Duration,
    /// Phase timings for this worker.
    pub metrics: RunMetrics,
}

/// Run the whole simulation program for the worker behind `comm`.
///
/// `initial` is consulted on the root only: when `None`, the root generates
/// the population from `config.seed`. Other workers ignore it and receive
/// their window through the scatter.
///
/// Any error is fatal. Returning drops `comm`, which makes every peer
/// still waiting on this worker fail as well.
pub fn run_worker(
    mut comm: Communicator,
    config: &SimConfig,
    initial: Option<Vec<Body>>,
) -> Result<WorkerOutcome, RunError> {
    let rank = comm.rank();
    let plan = PartitionPlan::new(config.bodies, comm.size())?;

    let mut store = match initial {
        Some(bodies) if rank == ROOT => BodyStore::from_bodies(plan, rank, bodies)?,
        None if rank == ROOT => BodyStore::seeded(plan, rank, config.seed)?,
        _ => BodyStore::new(plan, rank)?,
    };
    log::debug!(
        "worker {rank}: owns bodies {:?} of {}",
        store.owned_range(),
        store.len()
    );

    comm.barrier()?;
    let start = Instant::now();

    comm.scatter(ROOT, &mut store)?;

    let mut orchestrator = RoundOrchestrator::new(config.dt, store.owned().len());
    let mut round = Round(0);
    for _ in 0..config.rounds {
        round = round.next();
        orchestrator.run_round(round, &mut comm, &mut store)?;
    }

    let bodies = collect(&mut comm, store, ROOT)?;
    comm.barrier()?;
    let elapsed = start.elapsed();

    let metrics = orchestrator.into_metrics();
    log::debug!(
        "worker {rank}: {} rounds, intra {}us, wait {}us, cross {}us, integrate {}us",
        metrics.rounds,
        metrics.intra_us,
        metrics.exchange_wait_us,
        metrics.cross_us,
        metrics.integrate_us,
    );

    Ok(WorkerOutcome {
        worker: rank,
        bodies,
        elapsed,
        metrics,
    })
}
