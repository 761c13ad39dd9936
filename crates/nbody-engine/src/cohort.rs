//! Spawning, joining, and failure propagation for a cohort of workers.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use nbody_comm::cohort;
use nbody_core::{Body, WorkerId, ROOT};

use crate::{run_worker, ConfigError, RunError, RunMetrics, SimConfig, WorkerOutcome};

/// Result of a successful run, as seen by the root.
#[derive(Clone, Debug, PartialEq)]
pub struct RunOutcome {
    /// The final body sequence in global index order.
    pub bodies: Vec<Body>,
    /// Wall-clock time of the timed region, measured on the root.
    pub elapsed: Duration,
    /// Phase timings per worker, in worker order.
    pub metrics: Vec<(WorkerId, RunMetrics)>,
}

/// Run `config` from the seeded initial population.
///
/// The root allocates its store fallibly and fills it in place, so an
/// oversized body count fails with a store allocation error.
pub fn run_cohort(config: &SimConfig) -> Result<RunOutcome, RunError> {
    spawn_and_join(config, None)
}

/// Run `config` from an explicit initial state.
///
/// `bodies.len()` must equal `config.bodies`.
pub fn run_cohort_with(config: &SimConfig, bodies: Vec<Body>) -> Result<RunOutcome, RunError> {
    spawn_and_join(config, Some(bodies))
}

/// Spawn one named thread per worker, wait for all of them, and fail if any
/// worker fails.
fn spawn_and_join(config: &SimConfig, bodies: Option<Vec<Body>>) -> Result<RunOutcome, RunError> {
    config.validate()?;
    if let Some(bodies) = &bodies {
        if bodies.len() != config.bodies {
            return Err(ConfigError::BodyCountMismatch {
                expected: config.bodies,
                actual: bodies.len(),
            }
            .into());
        }
    }

    log::info!(
        "starting {} workers for {} bodies over {} rounds (dt = {})",
        config.workers,
        config.bodies,
        config.rounds,
        config.dt
    );

    let comms = cohort(config.workers)?;
    let mut initial = bodies;
    let mut handles: Vec<(WorkerId, JoinHandle<Result<WorkerOutcome, RunError>>)> =
        Vec::with_capacity(config.workers);

    let mut spawn_error = None;
    for comm in comms {
        let worker = comm.rank();
        let seed_state = if worker == ROOT { initial.take() } else { None };
        let worker_config = config.clone();
        let spawned = thread::Builder::new()
            .name(format!("nbody-worker-{worker}"))
            .spawn(move || run_worker(comm, &worker_config, seed_state));
        match spawned {
            Ok(handle) => handles.push((worker, handle)),
            Err(e) => {
                spawn_error = Some(e);
                break;
            }
        }
    }
    // The loop has dropped every unspawned communicator, so workers already
    // started fail on their first collective instead of waiting forever.
    if let Some(e) = spawn_error {
        let _ = join_all(handles);
        return Err(RunError::ThreadSpawnFailed {
            reason: e.to_string(),
        });
    }

    let outcomes = join_all(handles)?;

    let mut root = None;
    let mut metrics = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        metrics.push((outcome.worker, outcome.metrics));
        if outcome.worker == ROOT {
            root = outcome.bodies.map(|b| (b, outcome.elapsed));
        }
    }
    let (bodies, elapsed) = root.ok_or(RunError::MissingRootOutcome)?;

    log::info!(
        "finished {} rounds in {:.6}s",
        config.rounds,
        elapsed.as_secs_f64()
    );
    Ok(RunOutcome {
        bodies,
        elapsed,
        metrics,
    })
}

/// Join every worker. Reports the root-cause failure when several workers
/// fail together: disconnect errors are only consequences of another
/// worker's exit.
fn join_all(
    handles: Vec<(WorkerId, JoinHandle<Result<WorkerOutcome, RunError>>)>,
) -> Result<Vec<WorkerOutcome>, RunError> {
    let mut outcomes = Vec::with_capacity(handles.len());
    let mut failures = Vec::new();
    for (worker, handle) in handles {
        match handle.join() {
            Ok(Ok(outcome)) => outcomes.push(outcome),
            Ok(Err(e)) => {
                log::error!("worker {worker} failed: {e}");
                failures.push(RunError::WorkerFailed {
                    worker,
                    reason: Box::new(e),
                });
            }
            Err(_) => {
                log::error!("worker {worker} panicked");
                failures.push(RunError::WorkerPanicked { worker });
            }
        }
    }

    if failures.is_empty() {
        return Ok(outcomes);
    }
    let primary = failures.iter().position(|e| !e.is_secondary()).unwrap_or(0);
    Err(failures.swap_remove(primary))
}
