use bevy::prelude::*;
use nalgebra::Vector3;

use super::physics::PhysicsSet;
use crate::components::{
    BodyComponent, BodyKind, PhysicsComponent, RotorComponent, RotorConfig, SpatialComponent,
};
use crate::resources::{PhysicsConfig, RotorPhysicsConfig};
use crate::systems::rotor_physics_system;
use crate::utils::RotorError;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct RotorSet;

/// Runs the rotor update once per fixed step, ahead of the physics backend.
#[derive(Default)]
pub struct RotorPhysicsPlugin {
    pub config: RotorPhysicsConfig,
}

impl RotorPhysicsPlugin {
    pub fn with_config(config: RotorPhysicsConfig) -> Self {
        Self { config }
    }
}

impl Plugin for RotorPhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone())
            .init_resource::<PhysicsConfig>();

        app.configure_sets(
            FixedUpdate,
            RotorSet.before(PhysicsSet::ForceCalculation),
        );
        app.add_systems(FixedUpdate, rotor_physics_system.in_set(RotorSet));

        info!(
            "RotorPhysicsPlugin loaded (wall effect: {}, turbulence: {}, prop wash: {}, dynamic inflow: {})",
            self.config.enable_wall_effect,
            self.config.enable_turbulence,
            self.config.enable_prop_wash,
            self.config.enable_dynamic_inflow
        );
    }
}

/// Components of a free rotor body at `position`, spinning at `rpm`.
pub fn rotor_bundle(
    config: RotorConfig,
    position: Vector3<f64>,
    rpm: f64,
) -> Result<impl Bundle, RotorError> {
    let mut rotor = RotorComponent::new(config)?;
    rotor.set_rpm(rpm);

    let mass = rotor.config.mass;
    let physics = PhysicsComponent::rotor_disc(mass, rotor.config.blade_radius);

    Ok((
        Name::new(BodyKind::Rotor.name()),
        BodyComponent::new(mass, BodyKind::Rotor),
        rotor,
        SpatialComponent::at_position(position),
        physics,
    ))
}
