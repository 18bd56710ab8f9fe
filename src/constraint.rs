//! Pairwise distance projection and the fixed/free displacement policy
//! shared with collision resolution.

use crate::particle::Particle;
use glam::Vec3;

/// Below this length a displacement has no usable direction.
pub const DEGENERATE_EPSILON: f32 = 1e-6;

/// Result of projecting one particle pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Projection {
    /// At least one particle moved.
    Applied,
    /// Both particles are fixed; nothing moved.
    BothFixed,
    /// The particles coincide; the pair was skipped.
    Degenerate,
}

/// Move `a` by `+offset` and `b` by `-offset`, honoring pins.
///
/// A free particle paired with a fixed one takes the whole correction
/// (`2 * offset`). Returns false if both are fixed.
pub fn distribute(a: &mut Particle, b: &mut Particle, offset: Vec3) -> bool {
    match (a.fixed, b.fixed) {
        (false, false) => {
            a.pos += offset;
            b.pos -= offset;
        }
        (false, true) => a.pos += offset * 2.0,
        (true, false) => b.pos -= offset * 2.0,
        (true, true) => return false,
    }
    true
}

/// Keeps two particles at a fixed distance.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DistanceConstraint {
    pub rest_length: f32,
}

impl DistanceConstraint {
    pub fn new(rest_length: f32) -> Self {
        DistanceConstraint { rest_length }
    }

    pub fn project(&self, a: &mut Particle, b: &mut Particle) -> Projection {
        let delta = b.pos - a.pos;
        let dist = delta.length();
        if dist < DEGENERATE_EPSILON {
            return Projection::Degenerate;
        }
        let correction = delta * (0.5 * (dist - self.rest_length) / dist);
        if distribute(a, b, correction) {
            Projection::Applied
        } else {
            Projection::BothFixed
        }
    }
}
