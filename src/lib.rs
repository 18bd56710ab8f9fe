//! Editable Verlet chains for interactive 2D rope toys.
//!
//! `strand` simulates chains of point masses ("particles") linked by
//! distance constraints, and lets them be cut, joined, pinned, and dragged
//! while the simulation runs. Rendering and input are left to the host: the
//! engine exposes positions and pin flags, and accepts editing commands.
//!
//! # Features
//!
//! - **Verlet integration**: implicit velocity, damping, constant gravity
//! - **Constraint relaxation**: fixed-iteration Gauss-Seidel distance passes
//! - **Collisions**: self, cross-chain, and rectangular boundary
//! - **Live topology**: split, append, and prepend without copying particles
//! - **Picking**: nearest particle and nearest segment queries
//! - **Observable**: monitor ticks via the `StepObserver` trait
//!
//! ```
//! use strand::{ChainRegistry, NoOpStepObserver, SimConfig};
//! use glam::Vec3;
//!
//! let mut registry = ChainRegistry::new(SimConfig::default());
//! let rope = registry.create_chain(20.0, 10, Vec3::new(100.0, 400.0, 0.0)).unwrap();
//! let anchor = registry.particle_handle(rope, 0).unwrap();
//! registry.toggle_fixed(anchor);
//!
//! for _ in 0..60 {
//!     registry.step(&mut NoOpStepObserver);
//! }
//! let (left, right) = registry.split_chain(rope, 5).unwrap();
//! assert!(registry.append_chain(left, right));
//! ```

pub mod particle;
pub mod chain;
pub mod integrator;
pub mod constraint;
pub mod solver;
pub mod collision;
pub mod registry;
pub mod pick;
pub mod scene;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use particle::{Particle, ParticleId, SEED_OFFSET};
pub use chain::{Chain, NodeIndex};
pub use integrator::Integrator;
pub use constraint::{DistanceConstraint, Projection, DEGENERATE_EPSILON};
pub use solver::{ConstraintSolver, RelaxStats};
pub use collision::{CollisionResolver, CollisionStats, Contact};
pub use registry::{ChainId, ChainRegistry, ParticleHandle, MIN_EDITABLE_PARTICLES};
pub use pick::SegmentHit;
pub use scene::{ChainSpec, SceneConfig};
pub use observer::{StepObserver, NoOpStepObserver};
pub use config::{Bounds, SimConfig};
pub use error::{ChainError, ConfigError};
