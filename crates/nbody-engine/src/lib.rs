//! Distributed simulation engine for the N-body simulator.
//!
//! Runs a fixed cohort of `W` symmetric workers, each a thread executing
//! the same program ([`run_worker`]) against its own [`Communicator`]:
//!
//! ```text
//! plan partitions ─▶ barrier ─▶ scatter ─▶ n_cycle × round ─▶ gather ─▶ barrier
//!                    └──────────────── timed region ────────────────────────┘
//!
//! round (per worker, see RoundOrchestrator):
//!   iallgather(own) ─┬─▶ intra forces ─▶ wait ─▶ cross forces ─▶ integrate
//!                    └──── exchange in flight ───┘
//! ```
//!
//! [`run_cohort`] spawns the workers, joins them, and returns the root's
//! consolidated sequence. Any worker failure fails the whole run.
//!
//! [`Communicator`]: nbody_comm::Communicator

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cohort;
pub mod collector;
pub mod config;
pub mod error;
pub mod metrics;
pub mod orchestrator;
pub mod worker;

pub use cohort::{run_cohort, run_cohort_with, RunOutcome};
pub use collector::collect;
pub use config::{ConfigError, SimConfig};
pub use error::RunError;
pub use metrics::RunMetrics;
pub use orchestrator::RoundOrchestrator;
pub use worker::{run_worker, WorkerOutcome};
