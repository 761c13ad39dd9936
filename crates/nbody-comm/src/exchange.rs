//! The in-flight half of a non-blocking allgather.

use nbody_store::BodyStore;

use crate::{CommError, Communicator, Tag};

/// Handle to an allgather started by [`Communicator::iallgather`].
///
/// The exchange is not complete, and the store's peer windows are not
/// current, until [`wait`](Self::wait) returns. Dropping the handle without
/// waiting leaves the peers' messages queued and breaks every later
/// collective with a protocol error.
#[must_use = "an exchange must be waited on before its data is used"]
#[derive(Debug, PartialEq, Eq)]
pub struct ExchangeHandle {
    sequence: u64,
}

impl ExchangeHandle {
    pub(crate) fn new(sequence: u64) -> Self {
        Self { sequence }
    }

    /// Sequence number of the collective this handle belongs to.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Block until every peer's partition for this exchange has arrived and
    /// write each one into its window of `store`.
    ///
    /// Consumes the handle, so the exchange can be joined exactly once.
    pub fn wait(self, comm: &mut Communicator, store: &mut BodyStore) -> Result<(), CommError> {
        comm.check_store(store)?;
        for peer in comm.peers() {
            let payload = comm.recv(peer, Tag::Allgather, self.sequence)?;
            store.refresh(peer, &payload)?;
        }
        log::trace!(
            "worker {}: allgather #{} complete",
            comm.rank(),
            self.sequence()
        );
        Ok(())
    }
}
