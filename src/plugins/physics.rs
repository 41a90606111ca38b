use bevy::prelude::*;

use crate::resources::PhysicsConfig;
use crate::systems::{force_calculator_system, physics_integrator_system};

/// Physics simulation stages
#[derive(Debug, Hash, PartialEq, Eq, Clone, SystemSet)]
pub enum PhysicsSet {
    ForceCalculation,
    Integration,
}

/// Rigid-body backend: reduces the applied forces and integrates every body
/// with a `PhysicsComponent` at a fixed rate.
#[derive(Default)]
pub struct PhysicsPlugin {
    pub config: PhysicsConfig,
}

impl PhysicsPlugin {
    pub fn with_config(config: PhysicsConfig) -> Self {
        Self { config }
    }
}

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone())
            .insert_resource(Time::<Fixed>::from_seconds(self.config.timestep));

        app.configure_sets(
            FixedUpdate,
            (PhysicsSet::ForceCalculation, PhysicsSet::Integration).chain(),
        );

        app.add_systems(
            FixedUpdate,
            (
                force_calculator_system.in_set(PhysicsSet::ForceCalculation),
                physics_integrator_system.in_set(PhysicsSet::Integration),
            ),
        );

        info!(
            "PhysicsPlugin loaded at {:.1} Hz",
            1.0 / self.config.timestep
        );
    }
}
