mod body;
mod physics;
mod rotor;
mod spatial;

pub use body::*;
pub use physics::*;
pub use rotor::*;
pub use spatial::*;
