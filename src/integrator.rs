//! Damped Verlet integration under constant gravity.

use crate::chain::Chain;
use crate::config::SimConfig;
use glam::Vec3;

/// Advances every free particle of a chain by one Verlet step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Integrator {
    /// Acceleration along +Y. Negative pulls down in a Y-up frame.
    pub gravity: f32,
    pub dt: f32,
    /// Velocity retention per step, in [0, 1].
    pub damping: f32,
}

impl Integrator {
    pub fn new(gravity: f32, dt: f32, damping: f32) -> Self {
        Integrator { gravity, dt, damping }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Integrator::new(config.gravity, config.dt, config.damping)
    }

    pub fn acceleration(&self) -> Vec3 {
        Vec3::new(0.0, self.gravity, 0.0)
    }

    /// Fixed particles are skipped; their previous position never advances.
    pub fn step(&self, chain: &mut Chain) {
        let accel = self.acceleration();
        for p in chain.particles_mut() {
            p.integrate(accel, self.dt, self.damping);
        }
    }
}
