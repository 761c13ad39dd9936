//! `nbody` command-line entry point.
//!
//! Exit codes: 0 on success, 2 for configuration errors (nothing is
//! computed), 1 for any failure during the run or while writing results.

use std::error::Error;
use std::process::ExitCode;

use clap::Parser;
use nbody::cli::Args;
use nbody::engine::{run_cohort, SimConfig};
use nbody::output::{append_timing_to_path, write_bodies_to_path, TimingRecord};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.to_config();
    if let Err(e) = config.validate() {
        log::error!("invalid configuration: {e}");
        return ExitCode::from(2);
    }

    match run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, config: &SimConfig) -> Result<(), Box<dyn Error>> {
    let outcome = run_cohort(config)?;

    for (worker, metrics) in &outcome.metrics {
        log::debug!(
            "worker {worker}: {} rounds, {}us total, {}us waiting on exchange",
            metrics.rounds,
            metrics.total_us(),
            metrics.exchange_wait_us
        );
    }

    write_bodies_to_path(&args.output, &outcome.bodies)?;
    let record = TimingRecord {
        workers: config.workers,
        bodies: config.bodies,
        cycles: config.rounds,
        elapsed: outcome.elapsed,
    };
    append_timing_to_path(&args.timing_log, &record)?;
    log::info!("{record}");
    Ok(())
}
