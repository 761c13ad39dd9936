//! Store-specific error types.

use std::error::Error;
use std::fmt;

use nbody_core::{PartitionError, WorkerId};

/// Errors that can occur while building or updating a [`BodyStore`](crate::BodyStore).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// The backing allocation for the body slots could not be reserved.
    AllocationFailed {
        /// Number of bodies requested.
        bodies: usize,
    },
    /// A slice did not match the length of the window it targets.
    LengthMismatch {
        /// Expected number of bodies.
        expected: usize,
        /// Number of bodies supplied.
        actual: usize,
    },
    /// Attempted to refresh the caller's own window from outside.
    OwnedByCaller {
        /// The worker that owns the store.
        worker: WorkerId,
    },
    /// The worker is not part of the store's partition plan.
    Partition(PartitionError),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailed { bodies } => {
                write!(f, "failed to allocate body store for {bodies} bodies")
            }
            Self::LengthMismatch { expected, actual } => {
                write!(f, "length mismatch: expected {expected} bodies, got {actual}")
            }
            Self::OwnedByCaller { worker } => {
                write!(f, "window of worker {worker} is owned by the caller")
            }
            Self::Partition(e) => write!(f, "partition: {e}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Partition(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PartitionError> for StoreError {
    fn from(e: PartitionError) -> Self {
        Self::Partition(e)
    }
}
