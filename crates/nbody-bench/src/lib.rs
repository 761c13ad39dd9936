//! Benchmark profiles for the N-body simulator.
//!
//! - [`reference_profile`]: 1024 bodies, 10 rounds
//! - [`stress_profile`]: 4096 bodies, 5 rounds
//! - [`sample_bodies`]: seeded initial state for kernel micro-benchmarks

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use nbody_core::{initial_bodies, Body};
use nbody_engine::SimConfig;

/// Seed shared by every profile so runs are comparable.
pub const BENCH_SEED: u64 = 42;

/// Reference profile: 1024 bodies for 10 rounds on `workers` workers.
pub fn reference_profile(workers: usize) -> SimConfig {
    SimConfig::new(1024, 10, workers).with_seed(BENCH_SEED)
}

/// Stress profile: 4096 bodies for 5 rounds on `workers` workers.
///
/// Same shape as [`reference_profile`] at 16x the pair count per round.
pub fn stress_profile(workers: usize) -> SimConfig {
    SimConfig::new(4096, 5, workers).with_seed(BENCH_SEED)
}

/// The seeded initial state for `n` bodies.
pub fn sample_bodies(n: usize) -> Vec<Body> {
    initial_bodies(n, BENCH_SEED)
}
