//! Nbody Quickstart: a small distributed run from the seeded initial state.
//!
//! Demonstrates:
//!   1. Building a SimConfig
//!   2. Running a cohort of worker threads
//!   3. Reading the consolidated result and per-worker phase timings
//!   4. Checking the distributed result against the sequential reference
//!
//! Run with:
//!   cargo run --example quickstart

use nbody_core::initial_bodies;
use nbody_engine::{run_cohort, SimConfig};
use nbody_kernel::{momentum, step_all};

// ─── Run parameters ─────────────────────────────────────────────

const BODIES: usize = 256;
const ROUNDS: u64 = 20;
const WORKERS: usize = 4;

fn main() {
    println!("=== Nbody Quickstart ===\n");

    let config = SimConfig::new(BODIES, ROUNDS, WORKERS);
    println!(
        "{} bodies, {} rounds, {} workers, dt = {}",
        config.bodies, config.rounds, config.workers, config.dt
    );

    let outcome = run_cohort(&config).unwrap();
    println!("elapsed: {:.3} ms\n", outcome.elapsed.as_secs_f64() * 1e3);

    println!("worker  intra(us)  wait(us)  cross(us)  integrate(us)");
    for (worker, m) in &outcome.metrics {
        println!(
            "{:>6}  {:>9}  {:>8}  {:>9}  {:>13}",
            worker.0, m.intra_us, m.exchange_wait_us, m.cross_us, m.integrate_us
        );
    }

    println!("\nfirst bodies:");
    for (i, b) in outcome.bodies.iter().take(3).enumerate() {
        println!(
            "  Body {} : {:>9.5} {:>9.5} {:>9.5} | {:>9.5} {:>9.5} {:>9.5}",
            i + 1,
            b.x,
            b.y,
            b.z,
            b.vx,
            b.vy,
            b.vz
        );
    }

    // Sequential reference for comparison.
    let mut reference = initial_bodies(BODIES, config.seed);
    for _ in 0..ROUNDS {
        step_all(&mut reference, config.dt);
    }
    let max_diff = outcome
        .bodies
        .iter()
        .zip(&reference)
        .flat_map(|(a, b)| a.to_array().into_iter().zip(b.to_array()))
        .map(|(a, b)| (a - b).abs())
        .fold(0.0_f32, f32::max);
    println!("\nmax |distributed - sequential| = {max_diff:e}");

    let [px, py, pz] = momentum(&outcome.bodies);
    println!("total momentum = ({px:.3e}, {py:.3e}, {pz:.3e})");
    println!("Done.");
}
