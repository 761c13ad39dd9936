//! Integration tests: collectives across real worker threads.
//!
//! Each test builds a cohort, moves one communicator into each scoped
//! thread, and checks what every worker's store holds afterwards.

use std::thread;

use nbody_comm::{cohort, CommError, Communicator, Tag};
use nbody_core::{Body, PartitionPlan, WorkerId, ROOT};
use nbody_store::BodyStore;

/// Body whose fields all encode its global index, so misplaced windows show.
fn tagged(i: usize) -> Body {
    let v = i as f32;
    Body::new([v, v + 0.25, v + 0.5], [-v, -v - 0.25, -v - 0.5])
}

fn tagged_sequence(n: usize) -> Vec<Body> {
    (0..n).map(tagged).collect()
}

/// Run `f` on every worker of a `workers`-sized cohort and return the
/// per-worker results in rank order.
fn run_cohort<T, F>(workers: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(Communicator) -> T + Sync,
{
    let comms = cohort(workers).unwrap();
    thread::scope(|s| {
        let handles: Vec<_> = comms
            .into_iter()
            .map(|comm| s.spawn(|| f(comm)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    })
}

#[test]
fn allgather_fills_every_window_on_every_worker() {
    let n = 11;
    let stores = run_cohort(4, |mut comm| {
        let plan = PartitionPlan::new(n, comm.size()).unwrap();
        let mut store = BodyStore::new(plan, comm.rank()).unwrap();
        let owned: Vec<Body> = store.owned_range().map(tagged).collect();
        store.fill_owned(&owned).unwrap();

        let handle = comm.iallgather(store.owned()).unwrap();
        handle.wait(&mut comm, &mut store).unwrap();
        store.into_bodies()
    });
    for store in stores {
        assert_eq!(store, tagged_sequence(n));
    }
}

#[test]
fn owned_window_may_change_while_exchange_is_in_flight() {
    // Peers must see the snapshot taken at iallgather time, not later writes.
    let n = 6;
    let stores = run_cohort(2, |mut comm| {
        let plan = PartitionPlan::new(n, comm.size()).unwrap();
        let mut store = BodyStore::new(plan, comm.rank()).unwrap();
        let owned: Vec<Body> = store.owned_range().map(tagged).collect();
        store.fill_owned(&owned).unwrap();

        let handle = comm.iallgather(store.owned()).unwrap();
        for b in store.owned_mut() {
            *b = Body::ZERO;
        }
        handle.wait(&mut comm, &mut store).unwrap();
        (comm.rank(), store)
    });
    for (rank, store) in stores {
        for (worker, window) in store.plan().windows() {
            let got = store.partition(worker).unwrap();
            if worker == rank {
                assert!(got.iter().all(|b| *b == Body::ZERO));
            } else {
                let expected: Vec<Body> = window.map(tagged).collect();
                assert_eq!(got, expected.as_slice());
            }
        }
    }
}

#[test]
fn repeated_exchanges_stay_in_step() {
    let n = 9;
    let rounds = 20;
    let stores = run_cohort(3, |mut comm| {
        let plan = PartitionPlan::new(n, comm.size()).unwrap();
        let mut store = BodyStore::new(plan, comm.rank()).unwrap();
        for r in 0..rounds {
            for b in store.owned_mut() {
                b.x = r as f32;
            }
            let handle = comm.iallgather(store.owned()).unwrap();
            handle.wait(&mut comm, &mut store).unwrap();
            assert!(store.all().iter().all(|b| b.x == r as f32));
        }
        store
    });
    assert_eq!(stores.len(), 3);
}

#[test]
fn scatter_then_gather_restores_the_root_sequence() {
    let n = 10;
    let roots = run_cohort(3, |mut comm| {
        let plan = PartitionPlan::new(n, comm.size()).unwrap();
        let mut store = if comm.rank() == ROOT {
            BodyStore::from_bodies(plan, comm.rank(), tagged_sequence(n)).unwrap()
        } else {
            BodyStore::new(plan, comm.rank()).unwrap()
        };
        comm.scatter(ROOT, &mut store).unwrap();

        let expected: Vec<Body> = store.owned_range().map(tagged).collect();
        assert_eq!(store.owned(), expected.as_slice());

        // Clobber the root's copy of every other window so the gather has
        // something to restore.
        if comm.rank() == ROOT {
            for worker in comm.peers() {
                let len = store.partition(worker).unwrap().len();
                store.refresh(worker, &vec![Body::ZERO; len]).unwrap();
            }
        }
        comm.gather(ROOT, &mut store).unwrap();
        (comm.rank(), store.into_bodies())
    });
    let (_, root) = roots.iter().find(|(rank, _)| *rank == ROOT).unwrap();
    assert_eq!(root, &tagged_sequence(n));
}

#[test]
fn barrier_releases_all_workers() {
    let done = run_cohort(5, |mut comm| {
        comm.barrier().unwrap();
        comm.barrier().unwrap();
        comm.rank()
    });
    assert_eq!(done.len(), 5);
}

#[test]
fn mismatched_collective_order_is_a_protocol_error() {
    let results = run_cohort(2, |mut comm| {
        if comm.rank() == WorkerId(0) {
            comm.barrier()
        } else {
            let plan = PartitionPlan::new(2, 2).unwrap();
            let mut store = BodyStore::new(plan, comm.rank()).unwrap();
            comm.iallgather(store.owned())
                .and_then(|h| h.wait(&mut comm, &mut store))
        }
    });
    assert_eq!(
        results[0],
        Err(CommError::Protocol {
            peer: WorkerId(1),
            expected_tag: Tag::Barrier,
            expected_sequence: 1,
            tag: Tag::Allgather,
            sequence: 1,
        })
    );
    assert!(matches!(results[1], Err(CommError::Protocol { .. })));
}

#[test]
fn exiting_worker_fails_its_peers() {
    let results = run_cohort(3, |mut comm| {
        if comm.rank() == WorkerId(2) {
            // Leave without taking part; dropping `comm` closes its links.
            return Ok(());
        }
        comm.barrier()
    });
    assert_eq!(results[2], Ok(()));
    // Depending on scheduling a survivor may notice worker 2 directly or
    // notice the other survivor bailing out first; either way it fails.
    for result in &results[..2] {
        assert!(matches!(result, Err(e) if e.is_disconnect()));
    }
}
