//! Core types for the distributed N-body simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental values shared by every other crate in the workspace:
//! the [`Body`] record, force accumulators, worker and round identifiers,
//! the partition planner, and the deterministic initial-state generator.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod body;
pub mod error;
pub mod id;
pub mod init;
pub mod partition;

pub use body::{Body, Force, FIELDS_PER_BODY};
pub use error::PartitionError;
pub use id::{Round, WorkerId, ROOT};
pub use init::{fill_bodies, initial_bodies, DEFAULT_SEED};
pub use partition::PartitionPlan;
