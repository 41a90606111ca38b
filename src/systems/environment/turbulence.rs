use nalgebra::Vector3;
use std::f64::consts::PI;

use super::atmosphere::AtmosphericConditions;
use crate::components::TurbulenceState;
use crate::utils::{fract, lerp, smoothstep, ISA_LAPSE_RATE, ISA_SEA_LEVEL_TEMP};

const SURFACE_LENGTH_SCALE: f64 = 100.0; // m
const FREE_LENGTH_SCALE: f64 = 1000.0; // m
const SURFACE_INTENSITY: f64 = 0.15;
const FREE_INTENSITY: f64 = 0.10;
const BLEND_START: f64 = 800.0; // m
const BLEND_END: f64 = 1200.0; // m
const LATERAL_SCALE_RATIO: f64 = 0.8;
const VERTICAL_SCALE_RATIO: f64 = 0.5;
const ANGULAR_FACTOR: f64 = 0.2;
const ROUGHNESS_LENGTH: f64 = 0.03; // m, open terrain
const SHEAR_REFERENCE_HEIGHT: f64 = 10.0; // m

/// Sine hash of `x` in [0, 1). Same input, same output.
pub fn pseudo_random(x: f64) -> f64 {
    fract((x * 12.9898).sin() * 43758.5453)
}

/// Static stability from the departure of the local lapse rate from the
/// standard one. Positive is stable, clamped to [-1, 1].
pub fn stability_parameter(altitude: f64, temperature: f64) -> f64 {
    if altitude < 1.0 {
        return 0.0;
    }
    let actual_lapse = (temperature - ISA_SEA_LEVEL_TEMP) / altitude;
    ((actual_lapse - ISA_LAPSE_RATE) / ISA_LAPSE_RATE.abs()).clamp(-1.0, 1.0)
}

/// Log-law wind speed at `altitude` relative to the 10 m reference.
pub fn wind_shear_factor(altitude: f64) -> f64 {
    let height = altitude.max(2.0 * ROUGHNESS_LENGTH);
    (height / ROUGHNESS_LENGTH).ln() / (SHEAR_REFERENCE_HEIGHT / ROUGHNESS_LENGTH).ln()
}

/// Deterministic gust field as a function of altitude, airspeed and time.
///
/// The same `(altitude, airspeed, temperature, time)` always yields the same
/// gust, so runs are reproducible without a seeded generator.
pub fn calculate_turbulence(
    altitude: f64,
    airspeed: f64,
    conditions: &AtmosphericConditions,
    time: f64,
) -> TurbulenceState {
    let stability = stability_parameter(altitude, conditions.temperature);
    let shear = wind_shear_factor(altitude);
    let blend = smoothstep(BLEND_START, BLEND_END, altitude);

    let longitudinal = lerp(SURFACE_LENGTH_SCALE, FREE_LENGTH_SCALE, blend);
    let length_scales = Vector3::new(
        longitudinal,
        LATERAL_SCALE_RATIO * longitudinal,
        VERTICAL_SCALE_RATIO * longitudinal,
    );

    let intensity = lerp(SURFACE_INTENSITY, FREE_INTENSITY, blend) * (1.0 + 0.1 * stability);

    let mut velocity = Vector3::zeros();
    let mut angular_velocity = Vector3::zeros();
    for axis in 0..3 {
        let shift = 2.0 * PI * axis as f64 / 3.0;
        let scale = length_scales[axis];
        let phase = 2.0 * PI / scale * time + shift + 0.5 * pseudo_random(time + shift);
        velocity[axis] = intensity * phase.sin();
        angular_velocity[axis] = velocity[axis] / scale * ANGULAR_FACTOR;
    }

    TurbulenceState {
        velocity,
        angular_velocity,
        intensity,
        length_scales,
        time_scale: longitudinal / airspeed.max(1.0),
        stability,
        wind_shear_factor: shear,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::environment::calculate_atmospheric_conditions;
    use approx::assert_relative_eq;

    fn turbulence_at(altitude: f64, airspeed: f64, time: f64) -> TurbulenceState {
        let conditions = calculate_atmospheric_conditions(altitude, airspeed).unwrap();
        calculate_turbulence(altitude, airspeed, &conditions, time)
    }

    #[test]
    fn test_pseudo_random_is_reproducible() {
        for x in [0.0, 0.5, 1.0, 17.25, 1234.5] {
            let value = pseudo_random(x);
            assert!((0.0..1.0).contains(&value));
            assert_eq!(value, pseudo_random(x));
        }
        assert_ne!(pseudo_random(1.0), pseudo_random(2.0));
    }

    #[test]
    fn test_surface_versus_free_atmosphere() {
        let surface = turbulence_at(10.0, 10.0, 1.0);
        let free = turbulence_at(3000.0, 10.0, 1.0);

        assert!(surface.intensity > free.intensity);
        assert_relative_eq!(surface.length_scales.x, 100.0);
        assert_relative_eq!(free.length_scales.x, 1000.0);
        assert_relative_eq!(surface.length_scales.y, 80.0);
        assert_relative_eq!(surface.length_scales.z, 50.0);
    }

    #[test]
    fn test_length_scales_grow_with_altitude() {
        let altitudes = [6.1, 100.0, 900.0, 1000.0, 1100.0, 3000.0, 5000.0];
        let mut previous = 0.0;
        for altitude in altitudes {
            let state = turbulence_at(altitude, 15.0, 2.0);
            assert!(state.length_scales.x >= previous);
            previous = state.length_scales.x;
        }

        let mid = turbulence_at(1000.0, 15.0, 2.0);
        assert_relative_eq!(mid.length_scales.x, 550.0, epsilon = 1e-9);
    }

    #[test]
    fn test_standard_troposphere_is_neutral() {
        let state = turbulence_at(500.0, 10.0, 0.0);
        assert_relative_eq!(state.stability, 0.0, epsilon = 1e-9);
        assert_relative_eq!(state.intensity, 0.15, epsilon = 1e-9);
    }

    #[test]
    fn test_gusts_are_deterministic_and_time_varying() {
        let a = turbulence_at(50.0, 10.0, 1.0);
        let b = turbulence_at(50.0, 10.0, 1.0);
        let c = turbulence_at(50.0, 10.0, 2.0);

        assert_eq!(a.velocity, b.velocity);
        assert!((a.velocity - c.velocity).norm() > 0.01);
    }

    #[test]
    fn test_gust_follows_phase_shifted_sines() {
        for (altitude, time) in [(50.0, 1.0), (50.0, 20.0), (1000.0, 7.3), (3000.0, 45.0)] {
            let state = turbulence_at(altitude, 10.0, time);
            for axis in 0..3 {
                let shift = 2.0 * PI * axis as f64 / 3.0;
                let phase = 2.0 * PI / state.length_scales[axis] * time
                    + shift
                    + 0.5 * pseudo_random(time + shift);
                assert_relative_eq!(
                    state.velocity[axis],
                    state.intensity * phase.sin(),
                    epsilon = 1e-12
                );
            }
        }
    }

    #[test]
    fn test_gust_amplitude_bounded_by_intensity() {
        for airspeed in [0.0, 10.0, 30.0] {
            let mut time = 0.0;
            while time < 100.0 {
                let state = turbulence_at(50.0, airspeed, time);
                for axis in 0..3 {
                    assert!(
                        state.velocity[axis].abs() <= state.intensity + 1e-12,
                        "axis {axis} gust {} exceeds {} at t = {time}",
                        state.velocity[axis],
                        state.intensity
                    );
                }
                time += 0.25;
            }
        }
    }

    #[test]
    fn test_angular_gusts_follow_length_scales() {
        let state = turbulence_at(50.0, 10.0, 3.7);
        for axis in 0..3 {
            assert_relative_eq!(
                state.angular_velocity[axis],
                state.velocity[axis] / state.length_scales[axis] * 0.2,
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_wind_shear_reference() {
        assert_relative_eq!(wind_shear_factor(10.0), 1.0, epsilon = 1e-12);
        assert!(wind_shear_factor(0.0) > 0.0);
        assert!(wind_shear_factor(100.0) > 1.0);
    }
}
