mod body;
mod colliders;
mod traits;

pub use body::ComponentBody;
pub use colliders::{PlaneCollider, WallColliders};
pub use traits::{BodyKinematics, CollisionWorld, RayHit, RigidBodyHandle};
