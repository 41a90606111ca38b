use nalgebra::{Matrix3, Vector3};
use std::f64::consts::PI;

use crate::components::InflowState;

const SKEW_THRESHOLD: f64 = 0.001; // rad
const MIN_APPARENT_MASS: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InflowInputs {
    pub thrust_coefficient: f64,
    /// Disk loading [N/m^2]
    pub disk_loading: f64,
    /// Airspeed [m/s]
    pub forward_velocity: f64,
    /// Rotor radius [m]
    pub rotor_radius: f64,
    /// Rotor speed Ω [rad/s]
    pub rotor_speed: f64,
    /// Air density [kg/m^3]
    pub air_density: f64,
    /// Unit rotor normal, world frame
    pub rotor_normal: Vector3<f64>,
    /// Collective pitch [rad]
    pub collective_pitch: f64,
}

/// Step the three-state Pitt-Peters inflow model forward by `dt`.
///
/// The states (λ0, λ1s, λ1c) are carried over from `previous` and advanced
/// with a single explicit Euler step of `λ̇ = M⁻¹·(f − λ)`.
pub fn calculate_inflow(inputs: &InflowInputs, previous: &InflowState, dt: f64) -> InflowState {
    let tip_speed = inputs.rotor_speed * inputs.rotor_radius;
    if tip_speed <= 0.0 || inputs.air_density <= 0.0 {
        return InflowState::default();
    }

    let advance_ratio = inputs.forward_velocity / tip_speed;
    let hover_velocity = (inputs.disk_loading.max(0.0) / (2.0 * inputs.air_density)).sqrt();
    let wake_skew = inputs.forward_velocity.atan2(hover_velocity);

    let mass = mass_matrix(advance_ratio, wake_skew);
    let forcing = forcing_terms(
        inputs.thrust_coefficient,
        advance_ratio,
        inputs.collective_pitch,
    );

    let current = Vector3::new(
        previous.mean_inflow,
        previous.longitudinal_inflow,
        previous.lateral_inflow,
    );
    // Diagonal and floored, so always invertible.
    let inverse = mass.try_inverse().unwrap_or_else(Matrix3::identity);
    let next = current + inverse * (forcing - current) * dt;

    let total_inflow = next.x + next.y * wake_skew.cos() + next.z * wake_skew.sin();

    InflowState {
        mean_inflow: next.x,
        longitudinal_inflow: next.y,
        lateral_inflow: next.z,
        induced_velocity: inputs.rotor_normal * (total_inflow * tip_speed),
        wake_skew,
        advance_ratio,
        dynamic_tpp_tilt: next.y.atan2(next.x),
    }
}

/// Apparent-mass matrix with the asymmetric wake-skew correction.
pub fn mass_matrix(advance_ratio: f64, wake_skew: f64) -> Matrix3<f64> {
    let vm = (1.0 + advance_ratio * advance_ratio).sqrt();
    let mut longitudinal = 16.0 / (45.0 * PI * vm);
    let mut lateral = longitudinal;

    if wake_skew.abs() > SKEW_THRESHOLD {
        longitudinal *= 1.0 - wake_skew.sin();
        lateral *= 1.0 + wake_skew.sin();
    }

    Matrix3::from_diagonal(&Vector3::new(
        8.0 / (3.0 * PI),
        longitudinal.max(MIN_APPARENT_MASS),
        lateral.max(MIN_APPARENT_MASS),
    ))
}

fn forcing_terms(thrust_coefficient: f64, advance_ratio: f64, collective_pitch: f64) -> Vector3<f64> {
    let pitch_term = collective_pitch * advance_ratio;
    Vector3::new(
        thrust_coefficient / 2.0,
        pitch_term * advance_ratio.cos(),
        pitch_term * advance_ratio.sin(),
    )
}
