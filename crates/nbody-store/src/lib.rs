//! Partition-owned body storage.
//!
//! Each worker holds a full-length copy of the global body sequence in a
//! [`BodyStore`]. The worker's own window is the only region it may write;
//! every other window is a read-only, possibly stale view that is replaced
//! wholesale when a peer's partition arrives through the collective exchange.
//!
//! # Ownership model
//!
//! ```text
//! BodyStore (worker k)
//! ├── slots: Vec<Body>            N slots, global index order
//! ├── plan:  PartitionPlan        window → owning worker
//! └── owned: Range<usize>         plan.range(k), the only writable window
//! ```
//!
//! Writes to the owned window go through [`BodyStore::owned_mut`]. Non-owned
//! windows change only through [`BodyStore::refresh`], which refuses the
//! caller's own worker id.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod store;

pub use error::StoreError;
pub use store::BodyStore;
