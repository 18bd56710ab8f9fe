//! Screen-plane picking queries for an input layer.
//!
//! All distances are measured in the XY plane; z is ignored.

use crate::chain::NodeIndex;
use crate::registry::{ChainId, ChainRegistry, ParticleHandle};
use glam::Vec2;

/// The chain segment closest to a query point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SegmentHit {
    pub chain: ChainId,
    pub a: NodeIndex,
    pub b: NodeIndex,
    pub dist_sq: f32,
}

/// Squared distance from `p` to the segment `v`-`w`.
pub fn point_segment_dist_sq(p: Vec2, v: Vec2, w: Vec2) -> f32 {
    let edge = w - v;
    let l2 = edge.length_squared();
    if l2 == 0.0 {
        return p.distance_squared(v);
    }
    let t = ((p - v).dot(edge) / l2).clamp(0.0, 1.0);
    p.distance_squared(v + edge * t)
}

impl ChainRegistry {
    /// Closest particle strictly within `max_dist` of `point`.
    pub fn nearest_particle(&self, point: Vec2, max_dist: f32) -> Option<ParticleHandle> {
        let mut best = None;
        let mut best_sq = max_dist * max_dist;
        for (id, chain) in self.chains() {
            for node in chain.indices() {
                let Some(p) = chain.get(node) else { continue };
                let d = p.pos.truncate().distance_squared(point);
                if d < best_sq {
                    best_sq = d;
                    best = Some(ParticleHandle { chain: id, node });
                }
            }
        }
        best
    }

    /// Closest segment strictly within `max_dist` of `point`.
    pub fn nearest_segment(&self, point: Vec2, max_dist: f32) -> Option<SegmentHit> {
        let max_sq = max_dist * max_dist;
        let mut hit: Option<SegmentHit> = None;
        for (id, chain) in self.chains() {
            let order: Vec<NodeIndex> = chain.indices().collect();
            for pair in order.windows(2) {
                let (Some(pa), Some(pb)) = (chain.get(pair[0]), chain.get(pair[1])) else {
                    continue;
                };
                let d = point_segment_dist_sq(point, pa.pos.truncate(), pb.pos.truncate());
                if d < max_sq && hit.map_or(true, |h| d < h.dist_sq) {
                    hit = Some(SegmentHit {
                        chain: id,
                        a: pair[0],
                        b: pair[1],
                        dist_sq: d,
                    });
                }
            }
        }
        hit
    }

    /// Toggle the pin of the particle nearest to `point`, if any is within
    /// `max_dist`. Returns the handle and its new state.
    pub fn toggle_fixed_near(&mut self, point: Vec2, max_dist: f32) -> Option<(ParticleHandle, bool)> {
        let handle = self.nearest_particle(point, max_dist)?;
        let fixed = self.toggle_fixed(handle)?;
        Some((handle, fixed))
    }
}
