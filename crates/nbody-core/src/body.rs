//! The [`Body`] record and the [`Force`] accumulator.

use std::ops::AddAssign;

/// Number of `f32` fields stored per body in the flat interleaved layout.
pub const FIELDS_PER_BODY: usize = 6;

/// A point mass: position and velocity in single precision.
///
/// Masses are implicitly 1 and a body has no identity beyond its index in
/// the global sequence. The field order (x, y, z, vx, vy, vz) matches the
/// flat buffer produced by [`initial_bodies`](crate::initial_bodies).
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Body {
    /// Position, x component.
    pub x: f32,
    /// Position, y component.
    pub y: f32,
    /// Position, z component.
    pub z: f32,
    /// Velocity, x component.
    pub vx: f32,
    /// Velocity, y component.
    pub vy: f32,
    /// Velocity, z component.
    pub vz: f32,
}

impl Body {
    /// A body at the origin at rest.
    pub const ZERO: Body = Body {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        vx: 0.0,
        vy: 0.0,
        vz: 0.0,
    };

    /// Build a body from a position and a velocity.
    pub const fn new(position: [f32; 3], velocity: [f32; 3]) -> Self {
        Self {
            x: position[0],
            y: position[1],
            z: position[2],
            vx: velocity[0],
            vy: velocity[1],
            vz: velocity[2],
        }
    }

    /// Read one body from six interleaved values.
    ///
    /// Returns `None` unless `values` holds exactly [`FIELDS_PER_BODY`] entries.
    pub fn from_slice(values: &[f32]) -> Option<Self> {
        match *values {
            [x, y, z, vx, vy, vz] => Some(Self { x, y, z, vx, vy, vz }),
            _ => None,
        }
    }

    /// The six fields in storage order.
    pub fn to_array(&self) -> [f32; FIELDS_PER_BODY] {
        [self.x, self.y, self.z, self.vx, self.vy, self.vz]
    }

    /// Position as `[x, y, z]`.
    pub fn position(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Velocity as `[vx, vy, vz]`.
    pub fn velocity(&self) -> [f32; 3] {
        [self.vx, self.vy, self.vz]
    }

    /// The point reflection of this body through the origin.
    ///
    /// Both position and velocity change sign.
    pub fn mirrored(&self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            vx: -self.vx,
            vy: -self.vy,
            vz: -self.vz,
        }
    }

    /// True when every field is finite.
    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }
}

/// Net force acting on one body during a round.
///
/// Only lives for the duration of a round; nothing persists forces
/// across rounds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Force {
    /// x component.
    pub fx: f32,
    /// y component.
    pub fy: f32,
    /// z component.
    pub fz: f32,
}

impl Force {
    /// The zero accumulator.
    pub const ZERO: Force = Force {
        fx: 0.0,
        fy: 0.0,
        fz: 0.0,
    };
}

impl AddAssign for Force {
    fn add_assign(&mut self, rhs: Self) {
        self.fx += rhs.fx;
        self.fy += rhs.fy;
        self.fz += rhs.fz;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_round_trip_preserves_field_order() {
        let b = Body::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(b.position(), [1.0, 2.0, 3.0]);
        assert_eq!(b.velocity(), [4.0, 5.0, 6.0]);
        assert_eq!(b.to_array(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn from_slice_rejects_wrong_length() {
        assert!(Body::from_slice(&[1.0; 5]).is_none());
        assert!(Body::from_slice(&[1.0; 7]).is_none());
    }

    #[test]
    fn body_is_six_packed_floats() {
        assert_eq!(
            std::mem::size_of::<Body>(),
            FIELDS_PER_BODY * std::mem::size_of::<f32>()
        );
    }

    #[test]
    fn mirrored_flips_every_field() {
        let b = Body::new([0.5, -0.25, 1.0], [0.1, 0.2, -0.3]);
        let m = b.mirrored();
        assert_eq!(m.position(), [-0.5, 0.25, -1.0]);
        assert_eq!(m.velocity(), [-0.1, -0.2, 0.3]);
        assert_eq!(m.mirrored(), b);
    }

    #[test]
    fn force_accumulates() {
        let mut f = Force::ZERO;
        f += Force { fx: 1.0, fy: 2.0, fz: 3.0 };
        f += Force { fx: 0.5, fy: -2.0, fz: 0.0 };
        assert_eq!(f, Force { fx: 1.5, fy: 0.0, fz: 3.0 });
    }
}
