//! Test fixtures and float assertions for N-body development.
//!
//! Provides hand-built initial states ([`mirror_pair`], [`coincident_pair`]),
//! the sequential reference run ([`reference_run`]), and tolerance-based
//! comparisons for body sequences.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use nbody_core::{initial_bodies, Body};
use nbody_kernel::step_all;

/// Two bodies placed symmetrically about the origin with mirrored
/// velocities.
pub fn mirror_pair() -> Vec<Body> {
    let a = Body::new([0.35, -0.2, 0.5], [0.1, 0.3, -0.05]);
    vec![a, a.mirrored()]
}

/// Two bodies at exactly the same coordinates, both at rest.
pub fn coincident_pair() -> Vec<Body> {
    let a = Body::new([0.25, 0.25, -0.75], [0.0; 3]);
    vec![a, a]
}

/// Sequential O(N²) simulation from the seeded initial state.
pub fn reference_run(bodies: usize, seed: u64, dt: f32, rounds: u64) -> Vec<Body> {
    let mut state = initial_bodies(bodies, seed);
    for _ in 0..rounds {
        step_all(&mut state, dt);
    }
    state
}

/// Relative closeness with an absolute floor of `rel` for values below 1.
pub fn close(a: f32, b: f32, rel: f32) -> bool {
    (a - b).abs() <= rel * a.abs().max(b.abs()).max(1.0)
}

/// Assert two sequences agree field-by-field within `rel`.
///
/// Panics with the first offending body index and field.
pub fn assert_bodies_close(actual: &[Body], expected: &[Body], rel: f32) {
    assert_eq!(actual.len(), expected.len(), "sequence lengths differ");
    const FIELDS: [&str; 6] = ["x", "y", "z", "vx", "vy", "vz"];
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        for ((av, ev), name) in a.to_array().into_iter().zip(e.to_array()).zip(FIELDS) {
            assert!(
                close(av, ev, rel),
                "body {i} field {name}: {av} vs {ev} (rel {rel})"
            );
        }
    }
}

/// Assert every field of every body is finite.
pub fn assert_all_finite(bodies: &[Body]) {
    for (i, b) in bodies.iter().enumerate() {
        assert!(b.is_finite(), "body {i} is not finite: {b:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirror_pair_is_symmetric() {
        let pair = mirror_pair();
        assert_eq!(pair[1], pair[0].mirrored());
    }

    #[test]
    fn close_uses_absolute_floor() {
        assert!(close(1e-7, 0.0, 1e-6));
        assert!(!close(1e-3, 0.0, 1e-6));
        assert!(close(1000.0, 1000.0001, 1e-6));
    }

    #[test]
    fn reference_run_zero_rounds_is_initial_state() {
        assert_eq!(reference_run(5, 1, 0.01, 0), initial_bodies(5, 1));
    }
}
