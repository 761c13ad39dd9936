//! Semi-implicit Euler integration and the sequential reference step.

use nbody_core::{Body, Force};

use crate::force::intra_partition_force;

/// Advance `partition` by one step of size `dt`.
///
/// Velocity first (`v += dt·F`), then position from the updated velocity
/// (`x += dt·v`).
pub fn integrate(partition: &mut [Body], forces: &[Force], dt: f32) {
    debug_assert_eq!(partition.len(), forces.len());
    for (b, f) in partition.iter_mut().zip(forces) {
        b.vx += dt * f.fx;
        b.vy += dt * f.fy;
        b.vz += dt * f.fz;
    }
    for b in partition.iter_mut() {
        b.x += b.vx * dt;
        b.y += b.vy * dt;
        b.z += b.vz * dt;
    }
}

/// One full sequential round over every body: the O(N²) reference.
///
/// Equivalent to a single worker owning the whole sequence.
pub fn step_all(bodies: &mut [Body], dt: f32) {
    let mut forces = vec![Force::ZERO; bodies.len()];
    intra_partition_force(bodies, &mut forces);
    integrate(bodies, &forces, dt);
}

/// Total linear momentum (unit masses), summed in `f64`.
pub fn momentum(bodies: &[Body]) -> [f64; 3] {
    bodies.iter().fold([0.0; 3], |[px, py, pz], b| {
        [
            px + f64::from(b.vx),
            py + f64::from(b.vy),
            pz + f64::from(b.vz),
        ]
    })
}
