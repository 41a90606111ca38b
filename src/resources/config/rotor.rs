use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Switches and tuning for the per-tick rotor update.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotorPhysicsConfig {
    pub enable_wall_effect: bool,
    pub enable_turbulence: bool,
    pub enable_prop_wash: bool,
    pub enable_dynamic_inflow: bool,
    /// Linear damping coefficient set on each rotor body
    pub linear_damping: f64,
    /// Angular damping coefficient set on each rotor body
    pub angular_damping: f64,
    /// Wall ray length in rotor radii
    pub wall_detection_range: f64,
}

impl Default for RotorPhysicsConfig {
    fn default() -> Self {
        Self {
            enable_wall_effect: true,
            enable_turbulence: true,
            enable_prop_wash: true,
            enable_dynamic_inflow: false,
            linear_damping: 0.1,
            angular_damping: 0.1,
            wall_detection_range: 2.0,
        }
    }
}

impl RotorPhysicsConfig {
    /// Only thrust, reaction torque and damping.
    pub fn thrust_only() -> Self {
        Self {
            enable_wall_effect: false,
            enable_turbulence: false,
            enable_prop_wash: false,
            enable_dynamic_inflow: false,
            ..Default::default()
        }
    }
}
