//! Verlet particles with implicit velocity and a pin flag.

use core::sync::atomic::{AtomicU64, Ordering};
use glam::Vec3;

/// Offset added to every axis of a new particle's previous position.
///
/// New particles therefore start with an implicit velocity of
/// `(-SEED_OFFSET, -SEED_OFFSET, -SEED_OFFSET)` per tick. Use
/// [`Particle::at_rest`] or [`Chain::settle`](crate::Chain::settle) for a
/// particle born without velocity.
pub const SEED_OFFSET: f32 = 5.0;

/// Default display color (white).
pub const DEFAULT_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

static NEXT_PARTICLE_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique particle identity. Survives split and attach.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(u64);

impl ParticleId {
    fn next() -> Self {
        ParticleId(NEXT_PARTICLE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// A Verlet particle: position-based dynamics with implicit velocity.
#[derive(Clone, Debug)]
pub struct Particle {
    id: ParticleId,
    pub pos: Vec3,
    pub prev_pos: Vec3,
    pub fixed: bool,
    pub color: [f32; 3],
}

impl Particle {
    /// New free particle whose previous position is seeded with [`SEED_OFFSET`].
    pub fn new(pos: Vec3) -> Self {
        Particle {
            id: ParticleId::next(),
            pos,
            prev_pos: pos + Vec3::splat(SEED_OFFSET),
            fixed: false,
            color: DEFAULT_COLOR,
        }
    }

    /// New free particle with zero implicit velocity.
    pub fn at_rest(pos: Vec3) -> Self {
        Particle {
            prev_pos: pos,
            ..Particle::new(pos)
        }
    }

    pub fn id(&self) -> ParticleId {
        self.id
    }

    pub fn position(&self) -> Vec3 {
        self.pos
    }

    pub fn set_position(&mut self, pos: Vec3) {
        self.pos = pos;
    }

    pub fn color(&self) -> [f32; 3] {
        self.color
    }

    pub fn set_color(&mut self, color: [f32; 3]) {
        self.color = color;
    }

    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    /// Pin or release the particle. The previous position is left alone,
    /// so a released particle resumes with whatever velocity it had.
    pub fn set_fixed(&mut self, fixed: bool) {
        self.fixed = fixed;
    }

    /// Verlet step: `pos += (pos - prev) * damping + acceleration * dt²`.
    pub fn integrate(&mut self, acceleration: Vec3, dt: f32, damping: f32) {
        if self.fixed {
            return;
        }
        let velocity = (self.pos - self.prev_pos) * damping;
        let new_pos = self.pos + velocity + acceleration * (dt * dt);
        self.prev_pos = self.pos;
        self.pos = new_pos;
    }

    /// Implicit per-tick displacement.
    pub fn velocity_raw(&self) -> Vec3 {
        self.pos - self.prev_pos
    }

    /// Zero the implicit velocity.
    pub fn settle(&mut self) {
        self.prev_pos = self.pos;
    }

    /// Shift position and previous position together, so no velocity is
    /// injected. Applies to fixed particles too.
    pub fn translate(&mut self, delta: Vec3) {
        self.pos += delta;
        self.prev_pos += delta;
    }
}
