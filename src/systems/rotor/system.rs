use bevy::prelude::*;

use super::physics::{snapshot_prop_wash_source, update_rotor, RotorTickInputs};
use crate::components::{PhysicsComponent, RotorComponent, SpatialComponent};
use crate::physics::{BodyKinematics, CollisionWorld, ComponentBody, WallColliders};
use crate::resources::{PhysicsConfig, RotorPhysicsConfig};
use crate::systems::aerodynamics::PropWashSource;

/// Scratch space for the wash snapshots, kept across ticks.
#[derive(Default)]
pub struct WashBuffers {
    sources: Vec<(Entity, PropWashSource)>,
    others: Vec<PropWashSource>,
}

/// Update every rotor for one fixed step.
///
/// The tick runs in two phases: first every rotor is snapshotted as a wash
/// source, then each rotor is updated against the snapshots of the others,
/// so the result does not depend on query order.
pub fn rotor_physics_system(
    mut query: Query<(
        Entity,
        &mut RotorComponent,
        &SpatialComponent,
        &mut PhysicsComponent,
    )>,
    walls: Option<Res<WallColliders>>,
    config: Res<RotorPhysicsConfig>,
    physics_config: Res<PhysicsConfig>,
    mut buffers: Local<WashBuffers>,
) {
    let WashBuffers { sources, others } = &mut *buffers;

    sources.clear();
    if config.enable_prop_wash {
        sources.extend(
            query
                .iter()
                .filter(|(_, rotor, _, _)| rotor.is_spinning())
                .filter_map(|(entity, rotor, spatial, _)| {
                    snapshot_prop_wash_source(rotor, &BodyKinematics::from(spatial))
                        .ok()
                        .map(|source| (entity, source))
                }),
        );
    }

    let collision_world = walls.as_deref().map(|walls| walls as &dyn CollisionWorld);

    for (entity, mut rotor, spatial, mut physics) in query.iter_mut() {
        others.clear();
        others.extend(
            sources
                .iter()
                .filter(|(source_entity, _)| *source_entity != entity)
                .map(|(_, source)| *source),
        );

        let inputs = RotorTickInputs {
            dt: physics_config.timestep,
            config: &config,
            collision_world,
            wash_sources: others.as_slice(),
        };

        let mut body = ComponentBody::new(spatial, &mut physics);
        if let Err(err) = update_rotor(&mut rotor, &mut body, &inputs) {
            error!("Skipping rotor {:?} this tick: {}", entity, err);
        }
    }
}
