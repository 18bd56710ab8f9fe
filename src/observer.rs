//! Step observer trait for monitoring simulation ticks.

use crate::collision::CollisionStats;
use crate::registry::ChainId;

/// Trait for observing simulation ticks.
///
/// Implement this trait to monitor solver progress (for debugging,
/// visualization, or profiling). All methods have default no-op
/// implementations. None of them is called while the registry is paused.
pub trait StepObserver {
    /// Called after a chain's particles have been integrated.
    fn on_integrate(&mut self, _chain: ChainId) {}

    /// Called after each constraint pass over a chain.
    fn on_constraint_iteration(&mut self, _chain: ChainId, _iteration: usize) {}

    /// Called once the self, cross, and boundary passes are done.
    fn on_collisions(&mut self, _stats: &CollisionStats) {}

    /// Called when a tick is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer. Use as default when no observation is needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
