//! Final consolidation of every partition on the root.

use nbody_comm::Communicator;
use nbody_core::{Body, WorkerId};
use nbody_store::BodyStore;

use crate::RunError;

/// Gather every worker's owned window to `root`.
///
/// Returns the full, authoritative sequence on the root and `None` on every
/// other worker. Consumes the store: once collected there is nothing left
/// to simulate.
pub fn collect(
    comm: &mut Communicator,
    mut store: BodyStore,
    root: WorkerId,
) -> Result<Option<Vec<Body>>, RunError> {
    comm.gather(root, &mut store)?;
    if comm.rank() == root {
        Ok(Some(store.into_bodies()))
    } else {
        Ok(None)
    }
}
