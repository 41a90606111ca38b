mod physics;
mod rotor;

pub use physics::{PhysicsPlugin, PhysicsSet};
pub use rotor::{rotor_bundle, RotorPhysicsPlugin, RotorSet};
