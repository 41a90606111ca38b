use nalgebra::Vector3;
use std::f64::consts::{PI, TAU};

use crate::components::VortexState;
use crate::utils::normalize_or_zero;

/// Decay time of the trailing wake [s]
const DISSIPATION_TIME: f64 = 5.0;
const INITIAL_CORE_RATIO: f64 = 0.05;
/// Lamb-Oseen constant
const OSEEN_CONSTANT: f64 = 1.25643;
/// Eddy viscosity growth per unit vortex Reynolds number
const EDDY_VISCOSITY_COEFFICIENT: f64 = 2e-4;
const MIN_DISTANCE: f64 = 0.001; // m

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VortexParameters {
    pub blade_count: u32,
    /// Radial position of the tip vortex [m]
    pub blade_span: f64,
    /// Tip chord [m]
    pub blade_chord: f64,
    /// Effective tip angle of attack [rad]
    pub effective_aoa: f64,
}

/// Flow conditions the wake is shed into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VortexFlow {
    /// Rotor speed Ω [rad/s]
    pub rotor_speed: f64,
    /// Airspeed advecting the wake [m/s]
    pub forward_velocity: f64,
    /// Kinematic viscosity [m^2/s]
    pub kinematic_viscosity: f64,
}

/// Advance the tip vortex system by `dt` and evaluate the velocity it induces
/// at `evaluation_point`.
///
/// One vortex point per blade is placed on the helix at the current wake
/// age. The wake age is carried forward from `previous`, and its position
/// buffer is reused for the new state.
pub fn calculate_tip_vortex(
    params: &VortexParameters,
    previous: VortexState,
    flow: &VortexFlow,
    rotor_position: &Vector3<f64>,
    evaluation_point: &Vector3<f64>,
    dt: f64,
) -> VortexState {
    let rotor_speed = flow.rotor_speed;
    let kinematic_viscosity = flow.kinematic_viscosity;
    let mut positions = previous.positions;
    positions.clear();
    if rotor_speed <= 0.0 || params.blade_count == 0 {
        return VortexState {
            positions,
            ..Default::default()
        };
    }

    let tip_speed = rotor_speed * params.blade_span;
    let circulation = 0.5 * TAU * params.effective_aoa * params.blade_chord * tip_speed;
    let wake_age = previous.wake_age + dt;
    let dissipation_factor = (-wake_age / DISSIPATION_TIME).exp();

    let reynolds_number = if kinematic_viscosity > 0.0 {
        circulation.abs() / kinematic_viscosity
    } else {
        0.0
    };
    let core_radius = squire_core_radius(
        INITIAL_CORE_RATIO * params.blade_chord,
        kinematic_viscosity,
        reynolds_number,
        wake_age,
    );

    let effective_circulation = circulation * dissipation_factor;
    let mut induced_velocity = Vector3::zeros();

    for blade in 0..params.blade_count {
        let azimuth = TAU * blade as f64 / params.blade_count as f64 + rotor_speed * wake_age;
        let position = rotor_position
            + Vector3::new(
                params.blade_span * azimuth.cos(),
                -flow.forward_velocity * wake_age,
                params.blade_span * azimuth.sin(),
            );

        induced_velocity += point_vortex_velocity(
            &position,
            evaluation_point,
            effective_circulation,
            core_radius,
        );
        positions.push(position);
    }

    VortexState {
        circulation,
        core_radius,
        wake_age,
        dissipation_factor,
        reynolds_number,
        induced_velocity,
        positions,
    }
}

/// Squire's viscous core growth with a Reynolds-dependent eddy viscosity.
pub fn squire_core_radius(
    initial_radius: f64,
    kinematic_viscosity: f64,
    reynolds_number: f64,
    wake_age: f64,
) -> f64 {
    let eddy_factor = 1.0 + EDDY_VISCOSITY_COEFFICIENT * reynolds_number;
    (initial_radius * initial_radius
        + 4.0 * OSEEN_CONSTANT * eddy_factor * kinematic_viscosity.max(0.0) * wake_age.max(0.0))
    .sqrt()
}

/// Desingularized velocity induced by a vortex point with a viscous core.
pub fn point_vortex_velocity(
    vortex_position: &Vector3<f64>,
    evaluation_point: &Vector3<f64>,
    circulation: f64,
    core_radius: f64,
) -> Vector3<f64> {
    let r = evaluation_point - vortex_position;
    let distance = r.norm();
    if distance < MIN_DISTANCE || core_radius <= 0.0 {
        return Vector3::zeros();
    }

    let magnitude = circulation / (2.0 * PI * distance)
        * (1.0 - (-(distance / core_radius).powi(2)).exp());
    normalize_or_zero(&r.cross(&Vector3::y())) * magnitude
}
