//! Communication error types.

use std::error::Error;
use std::fmt;

use nbody_core::WorkerId;
use nbody_store::StoreError;

use crate::Tag;

/// Errors from building a cohort or running a collective.
///
/// Every variant is fatal to the run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommError {
    /// A cohort needs at least one worker.
    EmptyCohort,
    /// Cohort size does not fit the `u32` worker id space.
    CohortTooLarge {
        /// The requested size.
        size: usize,
    },
    /// The peer's end of the link is gone (its worker exited).
    PeerDisconnected {
        /// The peer that disappeared.
        peer: WorkerId,
    },
    /// A message arrived that does not match the collective being run.
    Protocol {
        /// The peer that sent the message.
        peer: WorkerId,
        /// Tag the receiver was waiting for.
        expected_tag: Tag,
        /// Sequence number the receiver was waiting for.
        expected_sequence: u64,
        /// Tag actually received.
        tag: Tag,
        /// Sequence number actually received.
        sequence: u64,
    },
    /// The store was planned for a different number of workers.
    CohortMismatch {
        /// Workers in the cohort.
        cohort: usize,
        /// Workers in the store's partition plan.
        plan: usize,
    },
    /// A rooted collective named a root outside the cohort.
    UnknownRoot {
        /// The offending root.
        root: WorkerId,
    },
    /// Writing received data into the store failed.
    Store(StoreError),
}

impl CommError {
    /// True when this error only reports that some other worker went away.
    ///
    /// Used to pick the root cause when several workers fail together.
    pub fn is_disconnect(&self) -> bool {
        matches!(self, Self::PeerDisconnected { .. })
    }
}

impl fmt::Display for CommError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCohort => write!(f, "cohort needs at least one worker"),
            Self::CohortTooLarge { size } => write!(f, "cohort size {size} exceeds u32::MAX"),
            Self::PeerDisconnected { peer } => write!(f, "worker {peer} disconnected"),
            Self::Protocol {
                peer,
                expected_tag,
                expected_sequence,
                tag,
                sequence,
            } => write!(
                f,
                "protocol violation from worker {peer}: expected {expected_tag} #{expected_sequence}, got {tag} #{sequence}"
            ),
            Self::CohortMismatch { cohort, plan } => write!(
                f,
                "cohort of {cohort} workers cannot serve a plan for {plan} workers"
            ),
            Self::UnknownRoot { root } => write!(f, "root {root} is not in the cohort"),
            Self::Store(e) => write!(f, "store: {e}"),
        }
    }
}

impl Error for CommError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for CommError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}
