use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::utils::GRAVITY;

/// Configuration for the rigid-body backend
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    // Integration parameters
    pub max_velocity: f64,
    pub max_angular_velocity: f64,
    pub timestep: f64,

    // Force parameters
    pub gravity: Vector3<f64>,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            max_velocity: 100.0,        // m/s
            max_angular_velocity: 50.0, // rad/s
            timestep: 1.0 / 60.0,       // 60 Hz
            gravity: Vector3::new(0.0, -GRAVITY, 0.0),
        }
    }
}
