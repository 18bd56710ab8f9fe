//! Doubly-linked particle chains backed by a per-chain arena.
//!
//! Links are stored as `Option<NodeIndex>` into the chain's own arena, so
//! dropping a chain drops every particle it owns in one step. Topology
//! edits (attach, split) move particles between arenas without copying
//! them, and each particle keeps its [`ParticleId`](crate::ParticleId).

use crate::error::ChainError;
use crate::particle::Particle;
use glam::Vec3;

/// Stable slot of a particle inside one chain's arena.
///
/// A `NodeIndex` is only meaningful for the chain that produced it, and
/// only until that chain is split or attached to another.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeIndex(usize);

#[derive(Clone, Debug)]
struct Link {
    particle: Particle,
    prev: Option<NodeIndex>,
    next: Option<NodeIndex>,
}

/// An ordered, doubly-linked sequence of particles sharing a rest spacing.
#[derive(Debug)]
pub struct Chain {
    links: Vec<Link>,
    head: Option<NodeIndex>,
    tail: Option<NodeIndex>,
    rest_spacing: f32,
}

impl Chain {
    /// A chain with no particles.
    pub fn empty(rest_spacing: f32) -> Self {
        Chain {
            links: Vec::new(),
            head: None,
            tail: None,
            rest_spacing,
        }
    }

    /// `count` particles on a straight line along +X, `spacing` apart.
    pub fn new(spacing: f32, count: usize, start: Vec3) -> Result<Self, ChainError> {
        if count < 1 {
            return Err(ChainError::InvalidCount { count, min: 1 });
        }
        let mut pos = start;
        let mut particles = Vec::with_capacity(count);
        particles.push(Particle::new(pos));
        for _ in 1..count {
            pos.x += spacing;
            particles.push(Particle::new(pos));
        }
        Ok(Chain::from_particles(spacing, particles))
    }

    /// `count` particles spread over `length` along +X.
    /// Rest spacing is `length / (count - 1)`.
    pub fn with_length(length: f32, count: usize, start: Vec3) -> Result<Self, ChainError> {
        if count < 2 {
            return Err(ChainError::InvalidCount { count, min: 2 });
        }
        Chain::new(length / (count - 1) as f32, count, start)
    }

    /// `count` particles evenly spaced from `start` to `end`.
    /// Rest spacing is the distance between the first two particles.
    pub fn between(start: Vec3, end: Vec3, count: usize) -> Result<Self, ChainError> {
        if count < 2 {
            return Err(ChainError::InvalidCount { count, min: 2 });
        }
        let step = (end - start) / (count - 1) as f32;
        let particles: Vec<Particle> = (0..count)
            .map(|i| Particle::new(start + step * i as f32))
            .collect();
        let spacing = particles[0].pos.distance(particles[1].pos);
        Ok(Chain::from_particles(spacing, particles))
    }

    /// Link the given particles head to tail, in iteration order.
    pub fn from_particles<I>(rest_spacing: f32, particles: I) -> Self
    where
        I: IntoIterator<Item = Particle>,
    {
        let mut links: Vec<Link> = particles
            .into_iter()
            .enumerate()
            .map(|(i, particle)| Link {
                particle,
                prev: i.checked_sub(1).map(NodeIndex),
                next: Some(NodeIndex(i + 1)),
            })
            .collect();
        if let Some(last) = links.last_mut() {
            last.next = None;
        }
        let n = links.len();
        Chain {
            links,
            head: (n > 0).then_some(NodeIndex(0)),
            tail: n.checked_sub(1).map(NodeIndex),
            rest_spacing,
        }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn rest_spacing(&self) -> f32 {
        self.rest_spacing
    }

    pub fn head(&self) -> Option<&Particle> {
        self.head.and_then(|ix| self.get(ix))
    }

    pub fn tail(&self) -> Option<&Particle> {
        self.tail.and_then(|ix| self.get(ix))
    }

    pub fn head_index(&self) -> Option<NodeIndex> {
        self.head
    }

    pub fn tail_index(&self) -> Option<NodeIndex> {
        self.tail
    }

    pub fn get(&self, ix: NodeIndex) -> Option<&Particle> {
        self.links.get(ix.0).map(|l| &l.particle)
    }

    pub fn get_mut(&mut self, ix: NodeIndex) -> Option<&mut Particle> {
        self.links.get_mut(ix.0).map(|l| &mut l.particle)
    }

    pub fn next_of(&self, ix: NodeIndex) -> Option<NodeIndex> {
        self.links.get(ix.0).and_then(|l| l.next)
    }

    pub fn prev_of(&self, ix: NodeIndex) -> Option<NodeIndex> {
        self.links.get(ix.0).and_then(|l| l.prev)
    }

    /// Slot of the `index`-th particle counting from head, if any.
    pub fn node_index_at(&self, index: usize) -> Option<NodeIndex> {
        self.indices().nth(index)
    }

    /// The `index`-th particle counting from head (zero-based).
    pub fn node_at(&self, index: usize) -> Option<&Particle> {
        self.node_index_at(index).and_then(|ix| self.get(ix))
    }

    pub fn node_at_mut(&mut self, index: usize) -> Option<&mut Particle> {
        let ix = self.node_index_at(index)?;
        self.get_mut(ix)
    }

    /// Slots in head-to-tail order.
    pub fn indices(&self) -> Indices<'_> {
        Indices {
            chain: self,
            cursor: self.head,
            remaining: self.links.len(),
        }
    }

    /// Particles in head-to-tail order.
    pub fn iter(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.indices().map(move |ix| &self.links[ix.0].particle)
    }

    /// `(position, fixed)` pairs in head-to-tail order, for renderers.
    pub fn points(&self) -> impl Iterator<Item = (Vec3, bool)> + '_ {
        self.iter().map(|p| (p.pos, p.fixed))
    }

    pub fn positions(&self) -> Vec<Vec3> {
        self.iter().map(|p| p.pos).collect()
    }

    /// Particles in arena order. Only for per-particle work that does not
    /// depend on chain order.
    pub fn particles_mut(&mut self) -> impl Iterator<Item = &mut Particle> + '_ {
        self.links.iter_mut().map(|l| &mut l.particle)
    }

    /// Two distinct particles of this chain, mutably.
    pub(crate) fn pair_mut(
        &mut self,
        a: NodeIndex,
        b: NodeIndex,
    ) -> Option<(&mut Particle, &mut Particle)> {
        let (i, j) = (a.0, b.0);
        if i == j || i.max(j) >= self.links.len() {
            return None;
        }
        if i < j {
            let (lo, hi) = self.links.split_at_mut(j);
            Some((&mut lo[i].particle, &mut hi[0].particle))
        } else {
            let (lo, hi) = self.links.split_at_mut(i);
            Some((&mut hi[0].particle, &mut lo[j].particle))
        }
    }

    /// Zero the implicit velocity of every particle.
    pub fn settle(&mut self) {
        for p in self.particles_mut() {
            p.settle();
        }
    }

    /// Translate the particle at `ix` and, if `trailing`, every particle
    /// after it toward the tail. Returns false if `ix` is not in this chain.
    pub fn translate_from(&mut self, ix: NodeIndex, delta: Vec3, trailing: bool) -> bool {
        if ix.0 >= self.links.len() {
            return false;
        }
        let mut cursor = Some(ix);
        let mut remaining = self.links.len();
        while let (Some(cur), true) = (cursor, remaining > 0) {
            let link = &mut self.links[cur.0];
            link.particle.translate(delta);
            cursor = if trailing { link.next } else { None };
            remaining -= 1;
        }
        true
    }

    /// Splice `other` in front of the current head.
    ///
    /// `other`'s tail is linked to the old head and becomes its `prev`;
    /// the new head is `other`'s head. The tail is unchanged. If this chain
    /// is empty it becomes `other`.
    pub fn attach_head(&mut self, other: Chain) {
        if other.is_empty() {
            return;
        }
        let old_head = match self.head {
            Some(h) => h,
            None => {
                *self = other;
                return;
            }
        };
        if let Some((head, tail)) = self.absorb(other) {
            self.links[tail.0].next = Some(old_head);
            self.links[old_head.0].prev = Some(tail);
            self.head = Some(head);
        }
    }

    /// Append `other` after the current tail. If this chain is empty it
    /// becomes `other`, rest spacing included.
    pub fn attach_tail(&mut self, other: Chain) {
        if other.is_empty() {
            return;
        }
        let old_tail = match self.tail {
            Some(t) => t,
            None => {
                *self = other;
                return;
            }
        };
        if let Some((head, tail)) = self.absorb(other) {
            self.links[old_tail.0].next = Some(head);
            self.links[head.0].prev = Some(old_tail);
            self.tail = Some(tail);
        }
    }

    /// Move `other`'s links into this arena. Returns its head and tail,
    /// remapped, or `None` if it was empty. Links are not joined.
    fn absorb(&mut self, other: Chain) -> Option<(NodeIndex, NodeIndex)> {
        let offset = self.links.len();
        let shift = |ix: Option<NodeIndex>| ix.map(|NodeIndex(i)| NodeIndex(i + offset));
        let head = shift(other.head)?;
        let tail = shift(other.tail)?;
        self.links.extend(other.links.into_iter().map(|mut link| {
            link.prev = shift(link.prev);
            link.next = shift(link.next);
            link
        }));
        Some((head, tail))
    }

    /// Split into `[0, index)` and `[index, len)`.
    ///
    /// | index | left | right |
    /// |---|---|---|
    /// | 0 | empty | whole |
    /// | >= len | whole | empty |
    /// | otherwise | `[0, index)` | `[index, len)` |
    ///
    /// Both halves keep this chain's rest spacing.
    pub fn split_at(self, index: usize) -> (Chain, Chain) {
        let spacing = self.rest_spacing;
        if index == 0 {
            return (Chain::empty(spacing), self);
        }
        if index >= self.len() {
            return (self, Chain::empty(spacing));
        }

        let order: Vec<NodeIndex> = self.indices().collect();
        let mut slots: Vec<Option<Particle>> =
            self.links.into_iter().map(|l| Some(l.particle)).collect();
        let mut left = Vec::with_capacity(index);
        let mut right = Vec::with_capacity(order.len() - index);
        for (pos, ix) in order.into_iter().enumerate() {
            if let Some(p) = slots[ix.0].take() {
                if pos < index {
                    left.push(p);
                } else {
                    right.push(p);
                }
            }
        }
        (
            Chain::from_particles(spacing, left),
            Chain::from_particles(spacing, right),
        )
    }

    /// True if the links form one acyclic, consistently double-linked run
    /// from head to tail covering every particle.
    pub fn is_consistent(&self) -> bool {
        let mut prev = None;
        let mut cursor = self.head;
        let mut steps = 0;
        while let Some(ix) = cursor {
            if steps >= self.links.len() {
                return false;
            }
            let link = match self.links.get(ix.0) {
                Some(l) => l,
                None => return false,
            };
            if link.prev != prev {
                return false;
            }
            prev = Some(ix);
            cursor = link.next;
            steps += 1;
        }
        steps == self.links.len() && prev == self.tail
    }
}

/// Head-to-tail iterator over a chain's slots.
///
/// Bounded by the particle count, so a corrupted link can never loop.
pub struct Indices<'a> {
    chain: &'a Chain,
    cursor: Option<NodeIndex>,
    remaining: usize,
}

impl Iterator for Indices<'_> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<NodeIndex> {
        if self.remaining == 0 {
            return None;
        }
        let ix = self.cursor?;
        self.cursor = self.chain.links.get(ix.0).and_then(|l| l.next);
        self.remaining -= 1;
        Some(ix)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}
