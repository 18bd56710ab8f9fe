//! Declarative initial layout: simulation settings plus the chains to
//! create at startup.

use crate::config::SimConfig;
use crate::error::ConfigError;
use crate::registry::{ChainId, ChainRegistry};
use glam::Vec3;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One chain to create. Exactly one of `spacing`, `length`, or `end`
/// selects the layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChainSpec {
    pub start: [f32; 3],
    pub count: usize,
    /// Distance between neighbors along +X.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<f32>,
    /// Total length along +X.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f32>,
    /// Far endpoint; particles are spread from `start` to here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<[f32; 3]>,
    /// Head-relative indices of particles to pin.
    #[serde(default)]
    pub pinned: Vec<usize>,
}

/// Simulation settings and initial chains.
///
/// ```toml
/// [sim]
/// iterations = 8
///
/// [[chains]]
/// start = [100.0, 500.0, 0.0]
/// length = 400.0
/// count = 14
/// pinned = [4]
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub sim: SimConfig,
    #[serde(default)]
    pub chains: Vec<ChainSpec>,
}

impl SceneConfig {
    /// One 14-particle chain of length 400 starting at (100, 500), pinned
    /// at its fifth particle.
    pub fn classic() -> Self {
        SceneConfig {
            sim: SimConfig::default(),
            chains: vec![ChainSpec {
                start: [100.0, 500.0, 0.0],
                count: 14,
                spacing: None,
                length: Some(400.0),
                end: None,
                pinned: vec![4],
            }],
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let scene: SceneConfig = toml::from_str(s)?;
        scene.sim.validate()?;
        Ok(scene)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Create a registry holding every chain of the scene.
    pub fn build(&self) -> Result<ChainRegistry, ConfigError> {
        self.sim.validate()?;
        let mut registry = ChainRegistry::new(self.sim.clone());
        for (index, spec) in self.chains.iter().enumerate() {
            let id = create(&mut registry, index, spec)?;
            for &pin in &spec.pinned {
                let handle = registry
                    .particle_handle(id, pin)
                    .ok_or(ConfigError::InvalidLayout {
                        index,
                        reason: "pinned index past the end of the chain",
                    })?;
                registry.set_fixed(handle, true);
            }
        }
        debug!("scene built with {} chains", registry.len());
        Ok(registry)
    }
}

fn create(
    registry: &mut ChainRegistry,
    index: usize,
    spec: &ChainSpec,
) -> Result<ChainId, ConfigError> {
    let start = Vec3::from(spec.start);
    let id = match (spec.spacing, spec.length, spec.end) {
        (Some(spacing), None, None) => registry.create_chain(spacing, spec.count, start)?,
        (None, Some(length), None) => {
            registry.create_chain_with_length(length, spec.count, start)?
        }
        (None, None, Some(end)) => {
            registry.create_chain_between(start, Vec3::from(end), spec.count)?
        }
        (None, None, None) => {
            return Err(ConfigError::InvalidLayout {
                index,
                reason: "one of spacing, length, or end is required",
            })
        }
        _ => {
            return Err(ConfigError::InvalidLayout {
                index,
                reason: "spacing, length, and end are mutually exclusive",
            })
        }
    };
    Ok(id)
}
