mod bem;
mod flapping;
mod ground_effect;
mod inflow;
mod prop_wash;
mod tip_vortex;
mod wall_effect;

pub use bem::{
    drag_coefficient, lift_coefficient, momentum_induced_velocity, prandtl_tip_loss,
    thrust_coefficient, BemInput, BemSolution, BemSolver, BLADE_ELEMENTS,
};
pub use flapping::{
    aerodynamic_moment, calculate_blade_state, coning_angle, tip_path_plane, FlappingInputs,
};
pub use ground_effect::{calculate_ground_effect, GroundEffectParams, MAX_THRUST_MULTIPLIER};
pub use inflow::{calculate_inflow, mass_matrix, InflowInputs};
pub use prop_wash::{calculate_prop_wash, calculate_prop_wash_influence, PropWashSource};
pub use tip_vortex::{
    calculate_tip_vortex, point_vortex_velocity, squire_core_radius, VortexFlow,
    VortexParameters,
};
pub use wall_effect::{calculate_wall_effect, WallParameters};
