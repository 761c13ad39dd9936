//! Error types for partition planning.

use std::error::Error;
use std::fmt;

use crate::WorkerId;

/// Errors from [`PartitionPlan`](crate::PartitionPlan) construction and lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PartitionError {
    /// A plan needs at least one worker.
    NoWorkers,
    /// Worker count does not fit the `u32` worker id space.
    TooManyWorkers {
        /// The requested worker count.
        requested: usize,
    },
    /// A worker id outside `0..W`.
    UnknownWorker {
        /// The offending worker.
        worker: WorkerId,
        /// Number of workers in the plan.
        workers: usize,
    },
}

impl fmt::Display for PartitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWorkers => write!(f, "partition plan needs at least one worker"),
            Self::TooManyWorkers { requested } => {
                write!(f, "worker count {requested} exceeds u32::MAX")
            }
            Self::UnknownWorker { worker, workers } => {
                write!(f, "worker {worker} is not in a plan of {workers} workers")
            }
        }
    }
}

impl Error for PartitionError {}
