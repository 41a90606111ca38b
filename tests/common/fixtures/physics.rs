use nalgebra::{Matrix3, Vector3};
use rotorsim::{
    components::{Force, ForceCategory, Moment, PhysicsComponent, ReferenceFrame},
    resources::PhysicsConfig,
};

/// Creates a physics component with a 1 kg unit-inertia body
pub fn create_test_physics() -> PhysicsComponent {
    PhysicsComponent::new(1.0, Matrix3::identity())
}

/// Creates standard test forces
pub mod forces {
    use super::*;

    pub fn lift_force(magnitude: f64) -> Force {
        Force {
            vector: Vector3::new(0.0, magnitude, 0.0),
            point: None,
            frame: ReferenceFrame::Body,
            category: ForceCategory::Propulsive,
        }
    }

    pub fn offset_force(magnitude: f64, point: Vector3<f64>) -> Force {
        Force::body_at(Vector3::y() * magnitude, point, ForceCategory::Aerodynamic)
    }

    pub fn yaw_moment(magnitude: f64) -> Moment {
        Moment::world(Vector3::y() * magnitude, ForceCategory::Propulsive)
    }
}

pub fn zero_gravity_config() -> PhysicsConfig {
    PhysicsConfig {
        gravity: Vector3::zeros(),
        ..Default::default()
    }
}
