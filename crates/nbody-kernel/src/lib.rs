//! Force kernels and integration for the N-body simulator.
//!
//! All arithmetic is single precision; the gravitational constant and all
//! masses are 1. A round for one partition is:
//!
//! 1. [`intra_partition_force`]: pairs inside the partition.
//! 2. [`cross_partition_force`]: pairs with every body outside it.
//! 3. [`integrate`]: `v += dt·F`, then `x += dt·v`.
//!
//! [`step_all`] runs the same three steps with a single partition spanning
//! the whole sequence and serves as the sequential reference.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod force;
pub mod integrate;

pub use force::{cross_partition_force, intra_partition_force, pair_force, SOFTENING};
pub use integrate::{integrate, momentum, step_all};
