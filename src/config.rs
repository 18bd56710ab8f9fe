//! Configuration types for the simulation.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Rectangular simulation area, from the origin to `(width, height)`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Bounds { width, height }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds::new(800.0, 600.0)
    }
}

/// Configuration for integration, relaxation, and collisions.
///
/// # Builder Pattern
/// ```
/// use strand::config::{Bounds, SimConfig};
///
/// let config = SimConfig::new()
///     .with_iterations(12)
///     .with_gravity(-9.81)
///     .with_damping(0.99)
///     .with_bounds(Bounds::new(1024.0, 768.0));
/// assert!(config.validate().is_ok());
/// ```
///
/// In TOML every field is optional:
/// ```toml
/// dt = 0.05
/// iterations = 16
///
/// [bounds]
/// width = 1024.0
/// height = 768.0
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Timestep per tick. Default: 0.1.
    pub dt: f32,
    /// Acceleration along +Y. Default: -10.0.
    pub gravity: f32,
    /// Velocity retention per tick, in [0, 1]. 1.0 = no damping. Default: 0.999.
    pub damping: f32,
    /// Constraint relaxation passes per tick. Default: 8.
    pub iterations: usize,
    /// Particle radius; non-adjacent particles keep twice this apart. Default: 10.0.
    pub particle_radius: f32,
    /// Zero the seeded velocity of chains created through the registry.
    /// Default: false.
    pub settle_new_chains: bool,
    /// Boundary rectangle. Default: 800 x 600.
    pub bounds: Bounds,
}

impl SimConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        SimConfig {
            dt: 0.1,
            gravity: -10.0,
            damping: 0.999,
            iterations: 8,
            particle_radius: 10.0,
            settle_new_chains: false,
            bounds: Bounds::default(),
        }
    }

    /// Set the integration timestep.
    pub fn with_dt(mut self, dt: f32) -> Self {
        self.dt = dt;
        self
    }

    /// Set the vertical gravity acceleration.
    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the velocity damping factor.
    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    /// Set the number of constraint iterations.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the collision radius of every particle.
    pub fn with_particle_radius(mut self, radius: f32) -> Self {
        self.particle_radius = radius;
        self
    }

    /// Set the boundary walls.
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Start registry-created chains at rest.
    pub fn with_settle_new_chains(mut self, settle: bool) -> Self {
        self.settle_new_chains = settle;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(ConfigError::InvalidDamping(self.damping));
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(ConfigError::InvalidTimestep(self.dt));
        }
        if !(self.particle_radius.is_finite() && self.particle_radius >= 0.0) {
            return Err(ConfigError::InvalidRadius(self.particle_radius));
        }
        let span = self.particle_radius * 2.0;
        if !(self.bounds.width >= span && self.bounds.height >= span) {
            return Err(ConfigError::InvalidBounds {
                width: self.bounds.width,
                height: self.bounds.height,
            });
        }
        Ok(())
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}
