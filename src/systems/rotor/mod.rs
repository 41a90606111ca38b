mod physics;
mod system;

pub use physics::{
    apply_prop_wash, apply_turbulence, apply_wall_effects, calculate_power, calculate_thrust,
    prop_wash_source, snapshot_prop_wash_source, update_blade_state, update_inflow_state,
    update_motor_state, update_rotor, update_vortex_state, world_normal, RotorTickInputs,
    RotorTickReport, ThrustSolution,
};
pub use system::rotor_physics_system;
