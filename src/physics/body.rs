use nalgebra::{Isometry3, Vector3};

use super::traits::{BodyKinematics, RigidBodyHandle};
use crate::components::{Force, ForceCategory, Moment, PhysicsComponent, SpatialComponent};

/// Rigid-body view over an entity's spatial and physics components.
pub struct ComponentBody<'a> {
    spatial: &'a SpatialComponent,
    physics: &'a mut PhysicsComponent,
}

impl<'a> ComponentBody<'a> {
    pub fn new(spatial: &'a SpatialComponent, physics: &'a mut PhysicsComponent) -> Self {
        Self { spatial, physics }
    }
}

impl From<&SpatialComponent> for BodyKinematics {
    fn from(spatial: &SpatialComponent) -> Self {
        Self {
            position: spatial.position,
            orientation: spatial.attitude,
            linear_velocity: spatial.velocity,
            angular_velocity: spatial.angular_velocity,
        }
    }
}

impl RigidBodyHandle for ComponentBody<'_> {
    fn world_transform(&self) -> Isometry3<f64> {
        self.spatial.isometry()
    }

    fn linear_velocity(&self) -> Vector3<f64> {
        self.spatial.velocity
    }

    fn angular_velocity(&self) -> Vector3<f64> {
        self.spatial.angular_velocity
    }

    fn apply_central_force(&mut self, force: Vector3<f64>) {
        self.apply_tagged_force(force, ForceCategory::Aerodynamic);
    }

    fn apply_torque(&mut self, torque: Vector3<f64>) {
        self.apply_tagged_torque(torque, ForceCategory::Aerodynamic);
    }

    fn set_damping(&mut self, linear: f64, angular: f64) {
        self.physics.linear_damping = linear.clamp(0.0, 1.0);
        self.physics.angular_damping = angular.clamp(0.0, 1.0);
    }

    fn apply_tagged_force(&mut self, force: Vector3<f64>, category: ForceCategory) {
        self.physics.add_force(Force::central(force, category));
    }

    fn apply_tagged_torque(&mut self, torque: Vector3<f64>, category: ForceCategory) {
        self.physics.add_moment(Moment::world(torque, category));
    }
}
