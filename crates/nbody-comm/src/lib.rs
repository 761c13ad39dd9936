//! Message-passing collectives for a fixed cohort of workers.
//!
//! A cohort of `W` [`Communicator`]s is built once by [`cohort()`] as a
//! fully-connected mesh of point-to-point crossbeam channels, one per
//! ordered pair of workers. Each communicator is moved into its worker
//! thread; there is no shared mutable state between workers.
//!
//! # Collectives
//!
//! | Operation | Blocking | Effect on the store |
//! |-----------|----------|---------------------|
//! | [`Communicator::iallgather`] | no | none until [`ExchangeHandle::wait`] |
//! | [`ExchangeHandle::wait`] | yes | every peer window refreshed |
//! | [`Communicator::scatter`] | peers only | peers' owned windows filled from the root |
//! | [`Communicator::gather`] | root only | root receives every peer window |
//! | [`Communicator::barrier`] | yes | none |
//!
//! All workers must call the same collectives in the same order. Messages
//! between a pair of workers are delivered in send order, and each message
//! carries a tag and a per-communicator sequence number that the receiver
//! checks, so a mismatched call order surfaces as [`CommError::Protocol`]
//! rather than silently corrupting the store.
//!
//! A worker that exits drops its senders. Any peer waiting on it then
//! fails with [`CommError::PeerDisconnected`]; there is no retry.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod communicator;
pub mod error;
pub mod exchange;
pub mod message;

pub use communicator::{cohort, Communicator};
pub use error::CommError;
pub use exchange::ExchangeHandle;
pub use message::Tag;
