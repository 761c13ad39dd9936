//! Per-worker endpoint of the cohort mesh and the blocking collectives.

use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver, Sender};
use nbody_core::{Body, WorkerId};
use nbody_store::BodyStore;

use crate::message::Envelope;
use crate::{CommError, ExchangeHandle, Tag};

/// Both directions of the link to one peer.
struct Link {
    tx: Sender<Envelope>,
    rx: Receiver<Envelope>,
}

/// One worker's view of the cohort.
///
/// `Send` but not meant to be shared: every collective takes `&mut self`
/// because it advances the sequence counter.
pub struct Communicator {
    rank: WorkerId,
    size: usize,
    /// Indexed by peer; `None` at our own rank.
    links: Vec<Option<Link>>,
    /// Number of collectives started so far.
    sequence: u64,
}

// Compile-time assertion: a communicator can be moved into a worker thread.
const _: fn() = || {
    fn assert<T: Send>() {}
    assert::<Communicator>();
};

/// Build a fully-connected cohort of `size` communicators.
///
/// Element `k` of the result is worker `k`'s endpoint.
pub fn cohort(size: usize) -> Result<Vec<Communicator>, CommError> {
    if size == 0 {
        return Err(CommError::EmptyCohort);
    }
    if u32::try_from(size).is_err() {
        return Err(CommError::CohortTooLarge { size });
    }

    // senders[from][to] / receivers[to][from]
    let mut senders: Vec<Vec<Option<Sender<Envelope>>>> =
        (0..size).map(|_| (0..size).map(|_| None).collect()).collect();
    let mut receivers: Vec<Vec<Option<Receiver<Envelope>>>> =
        (0..size).map(|_| (0..size).map(|_| None).collect()).collect();
    for from in 0..size {
        for to in 0..size {
            if from != to {
                let (tx, rx) = unbounded();
                senders[from][to] = Some(tx);
                receivers[to][from] = Some(rx);
            }
        }
    }

    let comms = senders
        .into_iter()
        .zip(receivers)
        .enumerate()
        .map(|(rank, (txs, rxs))| {
            let links = txs
                .into_iter()
                .zip(rxs)
                .map(|(tx, rx)| match (tx, rx) {
                    (Some(tx), Some(rx)) => Some(Link { tx, rx }),
                    _ => None,
                })
                .collect();
            Communicator {
                rank: WorkerId(rank as u32),
                size,
                links,
                sequence: 0,
            }
        })
        .collect();
    Ok(comms)
}

impl Communicator {
    /// This worker's id.
    pub fn rank(&self) -> WorkerId {
        self.rank
    }

    /// Number of workers in the cohort.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Every worker other than this one, in ascending order.
    pub fn peers(&self) -> impl Iterator<Item = WorkerId> + '_ {
        (0..self.size as u32)
            .map(WorkerId)
            .filter(move |&p| p != self.rank)
    }

    pub(crate) fn next_sequence(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }

    fn link(&self, peer: WorkerId) -> Result<&Link, CommError> {
        self.links
            .get(peer.index())
            .and_then(Option::as_ref)
            .ok_or(CommError::PeerDisconnected { peer })
    }

    pub(crate) fn send(&self, peer: WorkerId, envelope: Envelope) -> Result<(), CommError> {
        self.link(peer)?
            .tx
            .send(envelope)
            .map_err(|_| CommError::PeerDisconnected { peer })
    }

    /// Block until the next message from `peer` arrives and check that it
    /// belongs to the collective `(tag, sequence)`.
    pub(crate) fn recv(
        &self,
        peer: WorkerId,
        tag: Tag,
        sequence: u64,
    ) -> Result<Arc<[Body]>, CommError> {
        let envelope = self
            .link(peer)?
            .rx
            .recv()
            .map_err(|_| CommError::PeerDisconnected { peer })?;
        if envelope.tag != tag || envelope.sequence != sequence {
            return Err(CommError::Protocol {
                peer,
                expected_tag: tag,
                expected_sequence: sequence,
                tag: envelope.tag,
                sequence: envelope.sequence,
            });
        }
        Ok(envelope.payload)
    }

    pub(crate) fn check_store(&self, store: &BodyStore) -> Result<(), CommError> {
        let plan = store.plan().worker_count();
        if plan != self.size {
            return Err(CommError::CohortMismatch {
                cohort: self.size,
                plan,
            });
        }
        Ok(())
    }

    fn check_root(&self, root: WorkerId) -> Result<(), CommError> {
        if root.index() < self.size {
            Ok(())
        } else {
            Err(CommError::UnknownRoot { root })
        }
    }

    /// Begin a non-blocking exchange of this worker's partition.
    ///
    /// `local` is copied once and sent to every peer; the caller is free to
    /// keep reading (or writing) its own window immediately. Peer windows in
    /// the store are untouched until the returned handle is waited on.
    pub fn iallgather(&mut self, local: &[Body]) -> Result<ExchangeHandle, CommError> {
        let sequence = self.next_sequence();
        let payload: Arc<[Body]> = Arc::from(local);
        for peer in self.peers() {
            self.send(peer, Envelope::new(Tag::Allgather, sequence, Arc::clone(&payload)))?;
        }
        Ok(ExchangeHandle::new(sequence))
    }

    /// Distribute each worker's window from `root`'s store.
    ///
    /// On the root this only sends; every other worker blocks until its
    /// window has arrived and overwrites its owned window with it. Non-owned
    /// windows on non-root workers are left as they were.
    pub fn scatter(&mut self, root: WorkerId, store: &mut BodyStore) -> Result<(), CommError> {
        self.check_root(root)?;
        self.check_store(store)?;
        let sequence = self.next_sequence();
        if self.rank == root {
            for peer in self.peers() {
                let window = store.partition(peer).unwrap_or(&[]);
                self.send(peer, Envelope::new(Tag::Scatter, sequence, Arc::from(window)))?;
            }
        } else {
            let payload = self.recv(root, Tag::Scatter, sequence)?;
            store.fill_owned(&payload)?;
        }
        log::trace!("worker {}: scatter #{sequence} complete", self.rank);
        Ok(())
    }

    /// Collect every worker's owned window into `root`'s store.
    ///
    /// Only the root blocks. After this returns on the root, its store holds
    /// the authoritative state of every window.
    pub fn gather(&mut self, root: WorkerId, store: &mut BodyStore) -> Result<(), CommError> {
        self.check_root(root)?;
        self.check_store(store)?;
        let sequence = self.next_sequence();
        if self.rank == root {
            for peer in self.peers() {
                let payload = self.recv(peer, Tag::Gather, sequence)?;
                store.refresh(peer, &payload)?;
            }
        } else {
            self.send(root, Envelope::new(Tag::Gather, sequence, Arc::from(store.owned())))?;
        }
        log::trace!("worker {}: gather #{sequence} complete", self.rank);
        Ok(())
    }

    /// Block until every worker in the cohort has reached this barrier.
    pub fn barrier(&mut self) -> Result<(), CommError> {
        let sequence = self.next_sequence();
        for peer in self.peers() {
            self.send(peer, Envelope::empty(Tag::Barrier, sequence))?;
        }
        for peer in self.peers() {
            self.recv(peer, Tag::Barrier, sequence)?;
        }
        Ok(())
    }
}
