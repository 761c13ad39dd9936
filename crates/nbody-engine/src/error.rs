//! Run-level error type.

use std::error::Error;
use std::fmt;

use nbody_comm::CommError;
use nbody_core::{PartitionError, WorkerId};
use nbody_store::StoreError;

use crate::ConfigError;

/// Why a run failed. Every variant is fatal: no partial output is produced.
#[derive(Clone, Debug, PartialEq)]
pub enum RunError {
    /// Configuration rejected before any computation.
    Config(ConfigError),
    /// Partition planning failed.
    Partition(PartitionError),
    /// Body store allocation or update failed.
    Store(StoreError),
    /// A collective failed on this worker.
    Comm(CommError),
    /// A worker thread returned an error.
    WorkerFailed {
        /// The failing worker.
        worker: WorkerId,
        /// What it reported.
        reason: Box<RunError>,
    },
    /// A worker thread panicked.
    WorkerPanicked {
        /// The panicking worker.
        worker: WorkerId,
    },
    /// A worker thread could not be spawned.
    ThreadSpawnFailed {
        /// Description from the OS.
        reason: String,
    },
    /// Every worker finished but none returned the collected sequence.
    MissingRootOutcome,
}

impl RunError {
    /// True when the error only reports that a peer went away, as opposed
    /// to the failure that made it go away.
    pub fn is_secondary(&self) -> bool {
        match self {
            Self::Comm(e) => e.is_disconnect(),
            Self::WorkerFailed { reason, .. } => reason.is_secondary(),
            _ => false,
        }
    }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Partition(e) => write!(f, "partition: {e}"),
            Self::Store(e) => write!(f, "store: {e}"),
            Self::Comm(e) => write!(f, "comm: {e}"),
            Self::WorkerFailed { worker, reason } => {
                write!(f, "worker {worker} failed: {reason}")
            }
            Self::WorkerPanicked { worker } => write!(f, "worker {worker} panicked"),
            Self::ThreadSpawnFailed { reason } => write!(f, "thread spawn failed: {reason}"),
            Self::MissingRootOutcome => write!(f, "root worker produced no result"),
        }
    }
}

impl Error for RunError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Partition(e) => Some(e),
            Self::Store(e) => Some(e),
            Self::Comm(e) => Some(e),
            Self::WorkerFailed { reason, .. } => Some(reason.as_ref()),
            _ => None,
        }
    }
}

impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<PartitionError> for RunError {
    fn from(e: PartitionError) -> Self {
        Self::Partition(e)
    }
}

impl From<StoreError> for RunError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

impl From<CommError> for RunError {
    fn from(e: CommError) -> Self {
        Self::Comm(e)
    }
}
