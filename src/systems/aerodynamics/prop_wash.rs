use nalgebra::Vector3;
use std::f64::consts::PI;

use crate::components::PropWashField;
use crate::utils::normalize_or_zero;

/// Growth of the wake radius per unit distance downstream.
const WAKE_EXPANSION_RATE: f64 = 0.15;
const TIP_VORTEX_RATIO: f64 = 0.8;
/// Downstream decay length in rotor radii.
const DECAY_LENGTH_RATIO: f64 = 3.0;

/// Snapshot of a rotor taken before any rotor is updated in a tick, so every
/// rotor sees the others as they were at the start of the tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropWashSource {
    /// Hub position, world frame
    pub position: Vector3<f64>,
    /// Unit thrust axis, world frame
    pub normal: Vector3<f64>,
    /// Rotor speed Ω [rad/s]
    pub rotor_speed: f64,
    /// Rotor radius [m]
    pub radius: f64,
    /// Disc area [m^2]
    pub disc_area: f64,
    pub blade_count: u32,
    /// Thrust [N]
    pub thrust: f64,
}

/// Build the downwash field shed by `source`.
pub fn calculate_prop_wash(source: &PropWashSource, air_density: f64) -> PropWashField {
    if source.rotor_speed <= 0.0
        || source.thrust <= 0.0
        || source.disc_area <= 0.0
        || source.radius <= 0.0
        || source.blade_count == 0
        || air_density <= 0.0
    {
        return PropWashField::default();
    }

    let induced_velocity = (source.thrust / (2.0 * air_density * source.disc_area)).sqrt();
    let wake_radius = source.radius * (1.0 + WAKE_EXPANSION_RATE);
    let circulation = source.thrust
        / (air_density * source.rotor_speed * source.radius * source.blade_count as f64);
    let vortex_strength = TIP_VORTEX_RATIO * circulation;
    let direction = -normalize_or_zero(&source.normal);

    PropWashField {
        velocity: direction * induced_velocity,
        vorticity: direction * (vortex_strength / (2.0 * PI * wake_radius)),
        intensity: source.thrust
            / (air_density * source.disc_area * induced_velocity * induced_velocity),
        induced_velocity,
        circulation,
        vortex_strength,
        origin: source.position,
        direction,
        radius: source.radius,
    }
}

/// Strength of `wash` at `point`. Zero upstream of the wash origin.
pub fn calculate_prop_wash_influence(wash: &PropWashField, point: &Vector3<f64>) -> f64 {
    if wash.intensity <= 0.0 || wash.radius <= 0.0 {
        return 0.0;
    }

    let displacement = point - wash.origin;
    let vertical_distance = displacement.dot(&wash.direction);
    if vertical_distance < 0.0 {
        return 0.0;
    }

    let radial_distance = (displacement - wash.direction * vertical_distance).norm();
    let wake_radius = wash.radius + WAKE_EXPANSION_RATE * vertical_distance;

    let radial_factor = (-(radial_distance / wake_radius).powi(2)).exp();
    let vertical_factor = (-vertical_distance / (DECAY_LENGTH_RATIO * wash.radius)).exp();
    wash.intensity * radial_factor * vertical_factor
}
