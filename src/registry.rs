//! The set of live chains for one simulation session, the per-tick
//! pipeline, and the editing commands an input layer issues between ticks.

use crate::chain::{Chain, NodeIndex};
use crate::collision::{CollisionResolver, CollisionStats};
use crate::config::SimConfig;
use crate::error::ChainError;
use crate::integrator::Integrator;
use crate::observer::StepObserver;
use crate::particle::Particle;
use crate::solver::ConstraintSolver;
use glam::Vec3;
use log::{debug, trace, warn};

/// Editable chains created through the registry need at least one segment.
pub const MIN_EDITABLE_PARTICLES: usize = 2;

/// Identity of a chain inside one registry. Never reused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChainId(u64);

/// A particle addressed through the registry.
///
/// Invalidated when its chain is split or deleted, or when its chain is
/// the donor passed to an append or prepend. Handles into the receiving
/// chain stay valid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParticleHandle {
    pub chain: ChainId,
    pub node: NodeIndex,
}

/// Owns every live chain and runs the simulation tick.
///
/// A tick is integrate, then relax for each chain, then collisions:
/// self pairs per chain, every distinct chain pair, then the boundary.
/// All methods take `&mut self`, so ticks and commands never overlap.
#[derive(Debug)]
pub struct ChainRegistry {
    entries: Vec<(ChainId, Chain)>,
    next_id: u64,
    config: SimConfig,
    paused: bool,
}

impl ChainRegistry {
    pub fn new(config: SimConfig) -> Self {
        ChainRegistry {
            entries: Vec::new(),
            next_id: 0,
            config,
            paused: false,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SimConfig) {
        self.config = config;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: ChainId) -> bool {
        self.position(id).is_some()
    }

    /// Live chains in insertion order.
    pub fn chains(&self) -> impl Iterator<Item = (ChainId, &Chain)> + '_ {
        self.entries.iter().map(|(id, chain)| (*id, chain))
    }

    pub fn ids(&self) -> Vec<ChainId> {
        self.entries.iter().map(|(id, _)| *id).collect()
    }

    pub fn chain(&self, id: ChainId) -> Option<&Chain> {
        self.position(id).map(|i| &self.entries[i].1)
    }

    pub fn chain_mut(&mut self, id: ChainId) -> Option<&mut Chain> {
        self.position(id).map(move |i| &mut self.entries[i].1)
    }

    fn position(&self, id: ChainId) -> Option<usize> {
        self.entries.iter().position(|(cid, _)| *cid == id)
    }

    fn allocate_id(&mut self) -> ChainId {
        let id = ChainId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Take ownership of an existing chain as-is.
    pub fn insert(&mut self, chain: Chain) -> ChainId {
        let id = self.allocate_id();
        self.entries.push((id, chain));
        id
    }

    fn adopt(&mut self, mut chain: Chain) -> ChainId {
        if self.config.settle_new_chains {
            chain.settle();
        }
        let count = chain.len();
        let id = self.insert(chain);
        debug!("created chain {:?} with {} particles", id, count);
        id
    }

    /// Build a chain along +X from `start` and register it.
    pub fn create_chain(
        &mut self,
        spacing: f32,
        count: usize,
        start: Vec3,
    ) -> Result<ChainId, ChainError> {
        check_editable(count)?;
        Ok(self.adopt(Chain::new(spacing, count, start)?))
    }

    /// Spread `count` particles over `length` along +X from `start`.
    pub fn create_chain_with_length(
        &mut self,
        length: f32,
        count: usize,
        start: Vec3,
    ) -> Result<ChainId, ChainError> {
        check_editable(count)?;
        Ok(self.adopt(Chain::with_length(length, count, start)?))
    }

    /// Build a chain evenly spaced from `start` to `end` and register it.
    pub fn create_chain_between(
        &mut self,
        start: Vec3,
        end: Vec3,
        count: usize,
    ) -> Result<ChainId, ChainError> {
        check_editable(count)?;
        Ok(self.adopt(Chain::between(start, end, count)?))
    }

    /// Remove a chain and hand it back. Dropping it releases its particles.
    pub fn delete_chain(&mut self, id: ChainId) -> Option<Chain> {
        let Some(i) = self.position(id) else {
            warn!("delete: no chain {:?}", id);
            return None;
        };
        let (_, chain) = self.entries.remove(i);
        debug!("deleted chain {:?} ({} particles)", id, chain.len());
        Some(chain)
    }

    /// Replace a chain by its two halves, split before `index`.
    ///
    /// Both halves are registered, including an empty one, and take the
    /// original's place in the tick order. See [`Chain::split_at`].
    pub fn split_chain(&mut self, id: ChainId, index: usize) -> Option<(ChainId, ChainId)> {
        let Some(i) = self.position(id) else {
            warn!("split: no chain {:?}", id);
            return None;
        };
        let (_, chain) = self.entries.remove(i);
        let (left, right) = chain.split_at(index);
        let (left_id, right_id) = (self.allocate_id(), self.allocate_id());
        debug!(
            "split chain {:?} at {} into {:?} ({}) and {:?} ({})",
            id,
            index,
            left_id,
            left.len(),
            right_id,
            right.len()
        );
        self.entries.insert(i, (right_id, right));
        self.entries.insert(i, (left_id, left));
        Some((left_id, right_id))
    }

    /// Attach `other` after `base`'s tail. `other` leaves the registry.
    pub fn append_chain(&mut self, base: ChainId, other: ChainId) -> bool {
        self.join(base, other, "append", Chain::attach_tail)
    }

    /// Attach `other` in front of `base`'s head. `other` leaves the registry.
    pub fn prepend_chain(&mut self, base: ChainId, other: ChainId) -> bool {
        self.join(base, other, "prepend", Chain::attach_head)
    }

    fn join(
        &mut self,
        base: ChainId,
        other: ChainId,
        op: &str,
        attach: fn(&mut Chain, Chain),
    ) -> bool {
        if base == other {
            warn!("{}: chain {:?} cannot be joined to itself", op, base);
            return false;
        }
        if !self.contains(base) {
            warn!("{}: no chain {:?}", op, base);
            return false;
        }
        let Some(i) = self.position(other) else {
            warn!("{}: no chain {:?}", op, other);
            return false;
        };
        let (_, donor) = self.entries.remove(i);
        let Some(target) = self.chain_mut(base) else {
            return false;
        };
        attach(target, donor);
        debug!("{} chain {:?} onto {:?} ({} particles)", op, other, base, target.len());
        true
    }

    /// Handle for the `index`-th particle of a chain, counting from head.
    pub fn particle_handle(&self, chain: ChainId, index: usize) -> Option<ParticleHandle> {
        let node = self.chain(chain)?.node_index_at(index)?;
        Some(ParticleHandle { chain, node })
    }

    pub fn particle(&self, handle: ParticleHandle) -> Option<&Particle> {
        self.chain(handle.chain)?.get(handle.node)
    }

    pub fn particle_mut(&mut self, handle: ParticleHandle) -> Option<&mut Particle> {
        self.chain_mut(handle.chain)?.get_mut(handle.node)
    }

    /// Flip a particle's pin. Returns the new state.
    pub fn toggle_fixed(&mut self, handle: ParticleHandle) -> Option<bool> {
        let Some(p) = self.particle_mut(handle) else {
            warn!("toggle_fixed: stale handle {:?}", handle);
            return None;
        };
        p.set_fixed(!p.fixed);
        let fixed = p.fixed;
        debug!("particle {:?} fixed = {}", handle, fixed);
        Some(fixed)
    }

    pub fn set_fixed(&mut self, handle: ParticleHandle, fixed: bool) -> bool {
        match self.particle_mut(handle) {
            Some(p) => {
                p.set_fixed(fixed);
                true
            }
            None => {
                warn!("set_fixed: stale handle {:?}", handle);
                false
            }
        }
    }

    /// Drag a particle by `delta`, optionally carrying every particle
    /// after it toward the tail. Fixed particles move too. Velocity is
    /// preserved.
    pub fn move_particle_by(
        &mut self,
        handle: ParticleHandle,
        delta: Vec3,
        also_shift_trailing: bool,
    ) -> bool {
        let moved = self
            .chain_mut(handle.chain)
            .is_some_and(|chain| chain.translate_from(handle.node, delta, also_shift_trailing));
        if !moved {
            warn!("move_particle_by: stale handle {:?}", handle);
        }
        moved
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            debug!("{}", if paused { "paused" } else { "unpaused" });
        }
        self.paused = paused;
    }

    /// Flip the pause state. Returns the new state.
    pub fn toggle_paused(&mut self) -> bool {
        self.set_paused(!self.paused);
        self.paused
    }

    /// Run one tick. While paused nothing is touched and the observer is
    /// not called.
    pub fn step<O: StepObserver>(&mut self, observer: &mut O) -> CollisionStats {
        if self.paused {
            return CollisionStats::default();
        }

        let integrator = Integrator::from_config(&self.config);
        let solver = ConstraintSolver::from_config(&self.config);
        let resolver = CollisionResolver::from_config(&self.config);

        for (id, chain) in self.entries.iter_mut() {
            let id = *id;
            integrator.step(chain);
            observer.on_integrate(id);
            let spacing = chain.rest_spacing();
            solver.relax_observed(chain, spacing, |i| observer.on_constraint_iteration(id, i));
        }

        let mut stats = CollisionStats::default();
        for (_, chain) in self.entries.iter_mut() {
            stats.self_contacts += resolver.resolve_self(chain);
        }
        for i in 0..self.entries.len() {
            let (head, rest) = self.entries.split_at_mut(i + 1);
            let a = &mut head[i].1;
            for (_, b) in rest.iter_mut() {
                stats.cross_contacts += resolver.resolve_between(a, b);
            }
        }
        for (_, chain) in self.entries.iter_mut() {
            stats.wall_clamps += resolver.enforce_bounds(chain);
        }
        observer.on_collisions(&stats);
        trace!(
            "tick: {} self, {} cross, {} wall",
            stats.self_contacts,
            stats.cross_contacts,
            stats.wall_clamps
        );

        observer.on_step_complete();
        stats
    }
}

impl Default for ChainRegistry {
    fn default() -> Self {
        ChainRegistry::new(SimConfig::default())
    }
}

fn check_editable(count: usize) -> Result<(), ChainError> {
    if count < MIN_EDITABLE_PARTICLES {
        return Err(ChainError::InvalidCount {
            count,
            min: MIN_EDITABLE_PARTICLES,
        });
    }
    Ok(())
}
