use crate::components::{PhysicsComponent, ReferenceFrame, SpatialComponent};
use crate::resources::PhysicsConfig;
use bevy::prelude::*;
use nalgebra::Vector3;

/// Reduce the pending forces and moments of every body to a world-frame net
/// force and moment about the centre of mass, including gravity.
pub fn force_calculator_system(
    mut query: Query<(&mut PhysicsComponent, &SpatialComponent)>,
    config: Res<PhysicsConfig>,
) {
    for (mut physics, spatial) in query.iter_mut() {
        let (net_force, net_moment) =
            calculate_net_forces_moments(&physics, spatial, &config.gravity);
        physics.net_force = net_force;
        physics.net_moment = net_moment;
    }
}

/// Returns the (force, moment) pair in the world frame.
pub fn calculate_net_forces_moments(
    physics: &PhysicsComponent,
    spatial: &SpatialComponent,
    gravity: &Vector3<f64>,
) -> (Vector3<f64>, Vector3<f64>) {
    let mut net_force = gravity * physics.mass;
    let mut net_moment = Vector3::zeros();

    for force in &physics.forces {
        let force_inertial = match force.frame {
            ReferenceFrame::Body => spatial.to_world(&force.vector),
            ReferenceFrame::Inertial => force.vector,
        };
        net_force += force_inertial;

        // Application points are body-frame offsets from the centre of mass.
        if let Some(point) = force.point {
            let point_inertial = spatial.to_world(&point);
            net_moment += point_inertial.cross(&force_inertial);
        }
    }

    for moment in &physics.moments {
        net_moment += match moment.frame {
            ReferenceFrame::Body => spatial.to_world(&moment.vector),
            ReferenceFrame::Inertial => moment.vector,
        };
    }

    (net_force, net_moment)
}
