use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{physics::PhysicsConfig, rotor::RotorPhysicsConfig};
use crate::components::RotorConfig;
use crate::utils::ConfigError;

/// Top-level scenario description: backend settings, rotor tuning and the
/// rotors to spawn.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub rotor: RotorPhysicsConfig,
    #[serde(default)]
    pub rotors: Vec<RotorConfig>,
}

impl SimulationConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        let config: Self = serde_yaml::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let file = std::fs::File::create(path)?;
        serde_yaml::to_writer(file, self)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.physics.timestep.is_finite() && self.physics.timestep > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "physics timestep must be positive, got {}",
                self.physics.timestep
            )));
        }
        if self.rotor.wall_detection_range < 0.0 {
            return Err(ConfigError::Invalid(
                "wall detection range cannot be negative".to_string(),
            ));
        }
        for rotor in &self.rotors {
            rotor.validate()?;
        }
        Ok(())
    }
}
