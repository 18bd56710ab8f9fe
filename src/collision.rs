//! Particle overlap resolution: within a chain, across chains, and against
//! a rectangular boundary.

use crate::chain::{Chain, NodeIndex};
use crate::config::{Bounds, SimConfig};
use crate::constraint::{distribute, DEGENERATE_EPSILON};
use crate::particle::Particle;

/// Result of testing one particle pair for overlap.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Contact {
    /// Far enough apart; nothing to do.
    Clear,
    /// Overlapping and pushed apart.
    Separated,
    /// Overlapping, but both particles are fixed.
    BothFixed,
    /// Coincident; no direction to separate along.
    Coincident,
}

/// Contacts resolved during one tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CollisionStats {
    pub self_contacts: usize,
    pub cross_contacts: usize,
    pub wall_clamps: usize,
}

/// Separates overlapping particles and clamps them into the bounds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CollisionResolver {
    /// Minimum center distance between two non-adjacent particles.
    pub min_separation: f32,
    /// Particle radius used for the boundary clamp.
    pub radius: f32,
    pub bounds: Bounds,
}

impl CollisionResolver {
    pub fn new(radius: f32, bounds: Bounds) -> Self {
        CollisionResolver {
            min_separation: radius * 2.0,
            radius,
            bounds,
        }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        CollisionResolver::new(config.particle_radius, config.bounds)
    }

    /// Push `a` and `b` apart to `min_separation` along their separating
    /// axis. Fixed particles do not move.
    pub fn resolve_pair(&self, a: &mut Particle, b: &mut Particle) -> Contact {
        let delta = b.pos - a.pos;
        let dist_sq = delta.length_squared();
        if dist_sq >= self.min_separation * self.min_separation {
            return Contact::Clear;
        }
        if dist_sq < DEGENERATE_EPSILON {
            return Contact::Coincident;
        }
        let dist = dist_sq.sqrt();
        let overlap = self.min_separation - dist;
        let offset = delta * (overlap / dist * 0.5);
        if distribute(a, b, -offset) {
            Contact::Separated
        } else {
            Contact::BothFixed
        }
    }

    /// Resolve every pair in one chain at index distance two or more.
    /// Adjacent pairs are left to the distance constraint.
    pub fn resolve_self(&self, chain: &mut Chain) -> usize {
        let order: Vec<NodeIndex> = chain.indices().collect();
        let mut separated = 0;
        for i in 0..order.len() {
            for j in (i + 2)..order.len() {
                if let Some((a, b)) = chain.pair_mut(order[i], order[j]) {
                    if self.resolve_pair(a, b) == Contact::Separated {
                        separated += 1;
                    }
                }
            }
        }
        separated
    }

    /// Resolve every particle of `a` against every particle of `b`.
    pub fn resolve_between(&self, a: &mut Chain, b: &mut Chain) -> usize {
        let order_a: Vec<NodeIndex> = a.indices().collect();
        let order_b: Vec<NodeIndex> = b.indices().collect();
        let mut separated = 0;
        for &ia in &order_a {
            for &ib in &order_b {
                if let (Some(pa), Some(pb)) = (a.get_mut(ia), b.get_mut(ib)) {
                    if self.resolve_pair(pa, pb) == Contact::Separated {
                        separated += 1;
                    }
                }
            }
        }
        separated
    }

    /// Hard-clamp x into `[radius, width - radius]` and y into
    /// `[radius, height - radius]`. The previous position is not touched,
    /// and z is never clamped. Returns true if the particle moved.
    pub fn enforce_wall(&self, p: &mut Particle) -> bool {
        if p.fixed {
            return false;
        }
        let r = self.radius;
        let mut clamped = false;

        if p.pos.x < r {
            p.pos.x = r;
            clamped = true;
        } else if p.pos.x > self.bounds.width - r {
            p.pos.x = self.bounds.width - r;
            clamped = true;
        }

        if p.pos.y < r {
            p.pos.y = r;
            clamped = true;
        } else if p.pos.y > self.bounds.height - r {
            p.pos.y = self.bounds.height - r;
            clamped = true;
        }

        clamped
    }

    pub fn enforce_bounds(&self, chain: &mut Chain) -> usize {
        chain
            .particles_mut()
            .map(|p| self.enforce_wall(p))
            .filter(|&clamped| clamped)
            .count()
    }
}
