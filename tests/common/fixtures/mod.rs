mod body;
mod physics;

// Re-export test fixtures
pub use body::*;
pub use physics::*;
