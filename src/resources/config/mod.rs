pub mod physics;
pub mod rotor;
pub mod simulation;

pub use physics::PhysicsConfig;
pub use rotor::RotorPhysicsConfig;
pub use simulation::SimulationConfig;
