//! Command-line arguments for the `nbody` binary.

use std::path::PathBuf;

use clap::Parser;
use nbody_core::DEFAULT_SEED;
use nbody_engine::SimConfig;

/// Default path of the final body file.
pub const DEFAULT_OUTPUT: &str = "body_parallel.txt";

/// Default path of the append-only timing log.
pub const DEFAULT_TIMING_LOG: &str = "body_execution_time.txt";

/// Simulate N bodies under mutual gravity across a cohort of workers.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "nbody", version, about)]
pub struct Args {
    /// Number of bodies in the system.
    pub bodies: usize,

    /// Number of simulation cycles to run.
    pub cycles: u64,

    /// Number of workers; defaults to the available parallelism.
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Seed for the initial-state generator.
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Integration time step.
    #[arg(long, default_value_t = SimConfig::DEFAULT_DT)]
    pub dt: f32,

    /// Where to write the final positions and velocities.
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// File that receives one timing line per run.
    #[arg(long, default_value = DEFAULT_TIMING_LOG)]
    pub timing_log: PathBuf,
}

impl Args {
    /// Build the run configuration. Not validated here.
    pub fn to_config(&self) -> SimConfig {
        SimConfig::new(
            self.bodies,
            self.cycles,
            SimConfig::resolved_workers(self.workers),
        )
        .with_seed(self.seed)
        .with_dt(self.dt)
    }
}
