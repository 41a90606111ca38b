pub mod config;

pub use config::{PhysicsConfig, RotorPhysicsConfig, SimulationConfig};
