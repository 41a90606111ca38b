use nalgebra::{Isometry3, UnitQuaternion, Vector3};

use crate::components::ForceCategory;

/// Copyable snapshot of a rigid body's pose and velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyKinematics {
    pub position: Vector3<f64>,
    pub orientation: UnitQuaternion<f64>,
    pub linear_velocity: Vector3<f64>,
    pub angular_velocity: Vector3<f64>,
}

impl Default for BodyKinematics {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            orientation: UnitQuaternion::identity(),
            linear_velocity: Vector3::zeros(),
            angular_velocity: Vector3::zeros(),
        }
    }
}

impl BodyKinematics {
    /// Height above the ground plane (world Y) [m]
    pub fn altitude(&self) -> f64 {
        self.position.y
    }

    pub fn speed(&self) -> f64 {
        self.linear_velocity.norm()
    }

    /// Rotate a body-frame direction into the world frame.
    pub fn to_world(&self, direction: &Vector3<f64>) -> Vector3<f64> {
        self.orientation * direction
    }
}

/// Capabilities the rotor core needs from the physics engine's rigid body.
pub trait RigidBodyHandle {
    fn world_transform(&self) -> Isometry3<f64>;
    fn linear_velocity(&self) -> Vector3<f64>;
    fn angular_velocity(&self) -> Vector3<f64>;

    /// Apply a world-frame force through the centre of mass.
    fn apply_central_force(&mut self, force: Vector3<f64>);
    /// Apply a world-frame torque.
    fn apply_torque(&mut self, torque: Vector3<f64>);
    fn set_damping(&mut self, linear: f64, angular: f64);

    /// Same as `apply_central_force`; backends that keep a force breakdown
    /// may record the category.
    fn apply_tagged_force(&mut self, force: Vector3<f64>, _category: ForceCategory) {
        self.apply_central_force(force);
    }

    fn apply_tagged_torque(&mut self, torque: Vector3<f64>, _category: ForceCategory) {
        self.apply_torque(torque);
    }

    fn kinematics(&self) -> BodyKinematics {
        let transform = self.world_transform();
        BodyKinematics {
            position: transform.translation.vector,
            orientation: transform.rotation,
            linear_velocity: self.linear_velocity(),
            angular_velocity: self.angular_velocity(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Surface normal at the hit, facing the ray origin
    pub normal: Vector3<f64>,
    /// Hit position as a fraction of the ray length, in [0, 1]
    pub fraction: f64,
}

/// Ray queries against the physics engine's static geometry.
pub trait CollisionWorld {
    /// Closest hit on the segment `from -> to`, if any.
    fn ray_cast(&self, from: &Vector3<f64>, to: &Vector3<f64>) -> Option<RayHit>;
}
