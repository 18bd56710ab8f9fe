//! Iterative Gauss-Seidel relaxation of a chain's adjacent-pair distances.

use crate::chain::{Chain, NodeIndex};
use crate::config::SimConfig;
use crate::constraint::{DistanceConstraint, Projection};

/// Relaxes adjacent pairs toward the rest spacing a fixed number of times.
///
/// No convergence check: more iterations give a stiffer chain at a
/// proportional cost.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ConstraintSolver {
    pub iterations: usize,
}

/// Pair outcomes accumulated over one `relax` call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RelaxStats {
    pub applied: usize,
    pub both_fixed: usize,
    pub degenerate: usize,
}

impl ConstraintSolver {
    pub fn new(iterations: usize) -> Self {
        ConstraintSolver { iterations }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        ConstraintSolver::new(config.iterations)
    }

    /// Relax toward the chain's own rest spacing.
    pub fn relax(&self, chain: &mut Chain) -> RelaxStats {
        let target = chain.rest_spacing();
        self.relax_to(chain, target)
    }

    pub fn relax_to(&self, chain: &mut Chain, target: f32) -> RelaxStats {
        self.relax_observed(chain, target, |_| {})
    }

    /// Like [`relax_to`](Self::relax_to), calling `on_iteration` after
    /// each full pass.
    pub fn relax_observed(
        &self,
        chain: &mut Chain,
        target: f32,
        mut on_iteration: impl FnMut(usize),
    ) -> RelaxStats {
        let order: Vec<NodeIndex> = chain.indices().collect();
        let constraint = DistanceConstraint::new(target);
        let mut stats = RelaxStats::default();

        for i in 0..self.iterations {
            for pair in order.windows(2) {
                let Some((a, b)) = chain.pair_mut(pair[0], pair[1]) else {
                    continue;
                };
                match constraint.project(a, b) {
                    Projection::Applied => stats.applied += 1,
                    Projection::BothFixed => stats.both_fixed += 1,
                    Projection::Degenerate => stats.degenerate += 1,
                }
            }
            on_iteration(i);
        }
        stats
    }
}
