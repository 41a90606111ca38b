mod assertions;
mod fixtures;
mod helpers;
mod test_app;

// Re-export
pub use assertions::{
    assert_physics_valid, assert_ratio_within, assert_rotor_state_valid, assert_spatial_valid,
};

pub use helpers::*;

pub use fixtures::*;
pub use test_app::{TestApp, TestAppBuilder};
