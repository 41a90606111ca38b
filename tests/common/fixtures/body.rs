use nalgebra::{Isometry3, Translation3, Vector3};
use rotorsim::{
    components::ForceCategory,
    physics::{BodyKinematics, CollisionWorld, PlaneCollider, RayHit, RigidBodyHandle, WallColliders},
};

/// Rigid body stand-in that records everything applied to it.
#[derive(Debug, Default)]
pub struct FakeBody {
    pub kinematics: BodyKinematics,
    pub force: Vector3<f64>,
    pub torque: Vector3<f64>,
    pub categories: Vec<ForceCategory>,
    pub damping: Option<(f64, f64)>,
}

impl FakeBody {
    pub fn at(position: Vector3<f64>) -> Self {
        Self {
            kinematics: BodyKinematics {
                position,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn with_velocity(mut self, velocity: Vector3<f64>) -> Self {
        self.kinematics.linear_velocity = velocity;
        self
    }
}

impl RigidBodyHandle for FakeBody {
    fn world_transform(&self) -> Isometry3<f64> {
        Isometry3::from_parts(
            Translation3::from(self.kinematics.position),
            self.kinematics.orientation,
        )
    }

    fn linear_velocity(&self) -> Vector3<f64> {
        self.kinematics.linear_velocity
    }

    fn angular_velocity(&self) -> Vector3<f64> {
        self.kinematics.angular_velocity
    }

    fn apply_central_force(&mut self, force: Vector3<f64>) {
        self.force += force;
    }

    fn apply_torque(&mut self, torque: Vector3<f64>) {
        self.torque += torque;
    }

    fn set_damping(&mut self, linear: f64, angular: f64) {
        self.damping = Some((linear, angular));
    }

    fn apply_tagged_force(&mut self, force: Vector3<f64>, category: ForceCategory) {
        self.categories.push(category);
        self.apply_central_force(force);
    }
}

/// Collision world with no geometry at all.
pub struct EmptyWorld;

impl CollisionWorld for EmptyWorld {
    fn ray_cast(&self, _from: &Vector3<f64>, _to: &Vector3<f64>) -> Option<RayHit> {
        None
    }
}

/// Single wall at `x`, facing back towards the origin.
pub fn wall_at(x: f64) -> WallColliders {
    WallColliders::new(vec![PlaneCollider::wall_facing_negative_x(x)])
}
