pub mod aerodynamics;
pub mod environment;
pub mod physics;
pub mod propulsion;
pub mod rotor;

pub use physics::{force_calculator_system, physics_integrator_system};
pub use rotor::rotor_physics_system;
