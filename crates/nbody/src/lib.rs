//! nbody: a distributed-memory gravitational N-body simulator.
//!
//! This is the top-level facade crate. It re-exports the public API of the
//! sub-crates and hosts the command-line front end (argument parsing and
//! result files) used by the `nbody` binary.
//!
//! # Quick start
//!
//! ```rust
//! use nbody::prelude::*;
//!
//! let config = SimConfig::new(64, 5, 3).with_seed(7);
//! let outcome = run_cohort(&config).unwrap();
//! assert_eq!(outcome.bodies.len(), 64);
//! assert!(outcome.bodies.iter().all(Body::is_finite));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `nbody-core` | `Body`, `Force`, ids, partition plan, initializer |
//! | [`store`] | `nbody-store` | Per-worker body storage and ownership |
//! | [`kernel`] | `nbody-kernel` | Force accumulation and integration |
//! | [`comm`] | `nbody-comm` | Cohort mesh and collectives |
//! | [`engine`] | `nbody-engine` | Workers, rounds, and cohort runs |
//! | [`cli`] | this crate | Command-line arguments |
//! | [`output`] | this crate | Body file and timing log |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core values, identifiers, partitioning, and initial state (`nbody-core`).
pub use nbody_core as types;

/// Per-worker body storage (`nbody-store`).
pub use nbody_store as store;

/// Force kernels and the integrator (`nbody-kernel`).
pub use nbody_kernel as kernel;

/// Worker cohort and collective operations (`nbody-comm`).
///
/// Most users never touch this directly: [`engine::run_cohort`] builds the
/// cohort and drives every collective.
pub use nbody_comm as comm;

/// Round orchestration and cohort runs (`nbody-engine`).
pub use nbody_engine as engine;

pub mod cli;
pub mod output;

/// Common imports for running a simulation.
///
/// ```rust
/// use nbody::prelude::*;
/// ```
pub mod prelude {
    pub use nbody_core::{initial_bodies, Body, Force, PartitionPlan, Round, WorkerId, ROOT};
    pub use nbody_engine::{
        run_cohort, run_cohort_with, ConfigError, RunError, RunMetrics, RunOutcome, SimConfig,
    };
    pub use nbody_kernel::{momentum, step_all};
}
