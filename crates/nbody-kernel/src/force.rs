//! Softened pairwise gravity.
//!
//! The contribution of body `j` to body `i` is `d / (|d|² + ε)^(3/2)` with
//! `d = p[j] - p[i]`. For `j == i` the displacement is the zero vector and
//! the softened denominator stays finite, so self-pairs add exactly zero.
//! Both passes include them rather than branching in the inner loop.

use std::ops::Range;

use nbody_core::{Body, Force};

/// Softening added to the squared distance.
pub const SOFTENING: f32 = 1e-9;

/// Force exerted on `on` by `by`.
#[inline(always)]
pub fn pair_force(on: &Body, by: &Body) -> Force {
    let dx = by.x - on.x;
    let dy = by.y - on.y;
    let dz = by.z - on.z;
    let dist_sqr = dx * dx + dy * dy + dz * dz + SOFTENING;
    let inv_dist = 1.0 / dist_sqr.sqrt();
    let inv_dist3 = inv_dist * inv_dist * inv_dist;
    Force {
        fx: dx * inv_dist3,
        fy: dy * inv_dist3,
        fz: dz * inv_dist3,
    }
}

/// Sum of contributions from `sources` on `target`, in slice order.
#[inline]
fn accumulate(target: &Body, sources: &[Body], acc: &mut Force) {
    for source in sources {
        *acc += pair_force(target, source);
    }
}

/// Add the forces every body in `partition` exerts on every other body in
/// `partition` to `forces`.
///
/// Needs nothing beyond the partition itself, so it can run while the
/// exchange of the other partitions is still in flight. `forces` must be
/// as long as `partition`.
pub fn intra_partition_force(partition: &[Body], forces: &mut [Force]) {
    debug_assert_eq!(partition.len(), forces.len());
    for (target, out) in partition.iter().zip(forces.iter_mut()) {
        let mut acc = Force::ZERO;
        accumulate(target, partition, &mut acc);
        *out += acc;
    }
}

/// Add the forces from every body outside `window` on every body inside it.
///
/// `all` is the full global sequence; entries outside `window` must already
/// hold this round's positions. Sources are visited in ascending global
/// index: `[0, window.start)` then `[window.end, N)`.
pub fn cross_partition_force(all: &[Body], window: Range<usize>, forces: &mut [Force]) {
    debug_assert_eq!(window.len(), forces.len());
    let before = &all[..window.start];
    let after = &all[window.end..];
    for (target, out) in all[window].iter().zip(forces.iter_mut()) {
        let mut acc = Force::ZERO;
        accumulate(target, before, &mut acc);
        accumulate(target, after, &mut acc);
        *out += acc;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn at(x: f32, y: f32, z: f32) -> Body {
        Body::new([x, y, z], [0.0; 3])
    }

    #[test]
    fn self_pair_is_exactly_zero() {
        let b = at(0.3, -0.7, 0.1);
        assert_eq!(pair_force(&b, &b), Force::ZERO);
    }

    #[test]
    fn coincident_bodies_stay_finite_and_zero() {
        let bodies = [at(0.5, 0.5, 0.5), at(0.5, 0.5, 0.5)];
        let mut forces = [Force::ZERO; 2];
        intra_partition_force(&bodies, &mut forces);
        for f in forces {
            assert_eq!(f, Force::ZERO);
            assert!(f.fx.is_finite() && f.fy.is_finite() && f.fz.is_finite());
        }
    }

    #[test]
    fn unit_separation_gives_unit_attraction() {
        let f = pair_force(&at(0.0, 0.0, 0.0), &at(1.0, 0.0, 0.0));
        assert!((f.fx - 1.0).abs() < 1e-6);
        assert_eq!(f.fy, 0.0);
        assert_eq!(f.fz, 0.0);
    }

    #[test]
    fn cross_skips_the_window() {
        let all = [at(-1.0, 0.0, 0.0), at(0.0, 0.0, 0.0), at(2.0, 0.0, 0.0)];
        let mut forces = [Force::ZERO; 1];
        cross_partition_force(&all, 1..2, &mut forces);
        let expected = -1.0 + 0.25;
        assert!((forces[0].fx - expected).abs() < 1e-6);
    }

    #[test]
    fn cross_over_full_window_adds_nothing() {
        let all = [at(-1.0, 0.0, 0.0), at(1.0, 0.0, 0.0)];
        let mut forces = [Force { fx: 3.0, fy: 0.0, fz: 0.0 }; 2];
        cross_partition_force(&all, 0..2, &mut forces);
        assert_eq!(forces, [Force { fx: 3.0, fy: 0.0, fz: 0.0 }; 2]);
    }

    #[test]
    fn empty_partition_is_a_no_op() {
        let mut forces: [Force; 0] = [];
        intra_partition_force(&[], &mut forces);
        cross_partition_force(&[at(1.0, 1.0, 1.0)], 1..1, &mut forces);
    }

    fn arb_body() -> impl Strategy<Value = Body> {
        (-1.0f32..1.0, -1.0f32..1.0, -1.0f32..1.0).prop_map(|(x, y, z)| at(x, y, z))
    }

    proptest! {
        #[test]
        fn pair_force_is_antisymmetric(a in arb_body(), b in arb_body()) {
            let fab = pair_force(&a, &b);
            let fba = pair_force(&b, &a);
            prop_assert_eq!(fab.fx, -fba.fx);
            prop_assert_eq!(fab.fy, -fba.fy);
            prop_assert_eq!(fab.fz, -fba.fz);
        }

        #[test]
        fn split_sum_matches_whole_sum(
            bodies in proptest::collection::vec(arb_body(), 1..24),
            cut in 0usize..24,
        ) {
            let n = bodies.len();
            let start = cut % n;
            let end = n.min(start + 1 + cut / 2);
            let window = start..end;

            let mut whole = vec![Force::ZERO; n];
            intra_partition_force(&bodies, &mut whole);

            let mut split = vec![Force::ZERO; window.len()];
            intra_partition_force(&bodies[window.clone()], &mut split);
            cross_partition_force(&bodies, window.clone(), &mut split);

            for (i, (s, w)) in window.clone().zip(split.iter().zip(&whole[window])) {
                // Rounding error scales with the magnitude of the summed terms,
                // not with the (possibly cancelled) total.
                let scale = bodies
                    .iter()
                    .map(|b| {
                        let f = pair_force(&bodies[i], b);
                        f.fx.abs() + f.fy.abs() + f.fz.abs()
                    })
                    .sum::<f32>()
                    .max(1.0);
                for (a, b) in [(s.fx, w.fx), (s.fy, w.fy), (s.fz, w.fz)] {
                    prop_assert!(a.is_finite());
                    prop_assert!((a - b).abs() <= 1e-4 * scale, "{} vs {}", a, b);
                }
            }
        }
    }
}
