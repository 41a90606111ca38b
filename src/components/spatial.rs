use bevy::prelude::*;
use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Pose and velocity of a rigid body in the Y-up world frame.
///
/// `position.y` is the height above the ground plane and the body's own +Y
/// axis is the default rotor thrust axis.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct SpatialComponent {
    /// Centre of mass [m]
    pub position: Vector3<f64>,
    /// [m/s]
    pub velocity: Vector3<f64>,
    /// Body-to-world rotation
    pub attitude: UnitQuaternion<f64>,
    /// World-frame angular velocity [rad/s]
    pub angular_velocity: Vector3<f64>,
}

impl Default for SpatialComponent {
    fn default() -> Self {
        Self::at_position(Vector3::zeros())
    }
}

impl SpatialComponent {
    /// Body at rest, level, at `position`.
    pub fn at_position(position: Vector3<f64>) -> Self {
        Self {
            position,
            velocity: Vector3::zeros(),
            attitude: UnitQuaternion::identity(),
            angular_velocity: Vector3::zeros(),
        }
    }

    pub fn with_velocity(mut self, velocity: Vector3<f64>) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_attitude(mut self, attitude: UnitQuaternion<f64>) -> Self {
        self.attitude = attitude;
        self
    }

    pub fn with_angular_velocity(mut self, angular_velocity: Vector3<f64>) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    /// Height above the ground plane [m]
    pub fn altitude(&self) -> f64 {
        self.position.y
    }

    /// Rotate a body-frame vector into the world frame.
    pub fn to_world(&self, body: &Vector3<f64>) -> Vector3<f64> {
        self.attitude * body
    }

    /// Body +Y expressed in the world frame.
    pub fn up(&self) -> Vector3<f64> {
        self.to_world(&Vector3::y())
    }

    pub fn isometry(&self) -> Isometry3<f64> {
        Isometry3::from_parts(Translation3::from(self.position), self.attitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_rolled_body_up_axis() {
        let spatial = SpatialComponent::at_position(Vector3::new(0.0, 3.0, 0.0))
            .with_attitude(UnitQuaternion::from_axis_angle(&Vector3::x_axis(), FRAC_PI_2));

        assert_relative_eq!(spatial.altitude(), 3.0);
        assert_relative_eq!(spatial.up(), Vector3::z(), epsilon = 1e-12);
        assert_relative_eq!(
            spatial.isometry() * nalgebra::Point3::new(0.0, 1.0, 0.0),
            nalgebra::Point3::new(0.0, 3.0, 1.0),
            epsilon = 1e-12
        );
    }
}
