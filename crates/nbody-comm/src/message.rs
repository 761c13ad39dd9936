//! Wire envelope carried over the point-to-point links.

use std::fmt;
use std::sync::Arc;

use nbody_core::Body;

/// Which collective a message belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Initial distribution of partitions from the root.
    Scatter,
    /// Per-round publish of every worker's partition to every other worker.
    Allgather,
    /// Final consolidation of partitions on the root.
    Gather,
    /// Empty rendezvous message.
    Barrier,
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Scatter => "scatter",
            Self::Allgather => "allgather",
            Self::Gather => "gather",
            Self::Barrier => "barrier",
        };
        f.write_str(name)
    }
}

/// One message between two workers.
///
/// The payload is shared: an allgather copies the sender's partition once
/// and hands the same `Arc` to every peer.
#[derive(Clone, Debug)]
pub(crate) struct Envelope {
    pub tag: Tag,
    pub sequence: u64,
    pub payload: Arc<[Body]>,
}

impl Envelope {
    pub fn new(tag: Tag, sequence: u64, payload: Arc<[Body]>) -> Self {
        Self {
            tag,
            sequence,
            payload,
        }
    }

    pub fn empty(tag: Tag, sequence: u64) -> Self {
        Self::new(tag, sequence, Arc::from(Vec::new()))
    }
}
