use nalgebra::Vector3;

use crate::components::GroundEffectState;

pub const MAX_THRUST_MULTIPLIER: f64 = 1.4;
const MIN_NORMALIZED_HEIGHT: f64 = 0.1;
const MAX_NORMALIZED_HEIGHT: f64 = 2.0;
const PROXIMITY_HEIGHT: f64 = 0.5;
const RECIRCULATION_HEIGHT: f64 = 1.0;
const RECIRCULATION_VELOCITY: f64 = 5.0; // m/s

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundEffectParams {
    /// Rotor radius [m]
    pub rotor_radius: f64,
    pub thrust_coefficient: f64,
    /// Collective pitch [rad]
    pub collective_pitch: f64,
    /// Body velocity [m/s]
    pub velocity: Vector3<f64>,
}

/// Cheeseman-Bennett ground effect with thrust, proximity and recirculation
/// corrections.
///
/// `height_agl` is the rotor height above a flat ground plane [m].
pub fn calculate_ground_effect(params: &GroundEffectParams, height_agl: f64) -> GroundEffectState {
    if params.rotor_radius <= 0.0 {
        return GroundEffectState::default();
    }

    let height = height_agl.max(0.0);
    let normalized_height = height / (2.0 * params.rotor_radius);
    let base = base_multiplier(normalized_height, params.thrust_coefficient);
    let recirculation = recirculation_factor(
        normalized_height,
        params.velocity.norm(),
        params.collective_pitch,
    );

    let thrust_multiplier = (base * recirculation).clamp(1.0, MAX_THRUST_MULTIPLIER);

    GroundEffectState {
        thrust_multiplier,
        induced_power_ratio: induced_power_ratio(thrust_multiplier, normalized_height),
        effective_height: height,
        recirculation_factor: recirculation,
        surface_normal: Vector3::y(),
    }
}

fn base_multiplier(normalized_height: f64, thrust_coefficient: f64) -> f64 {
    if normalized_height < MIN_NORMALIZED_HEIGHT {
        return MAX_THRUST_MULTIPLIER;
    }
    if normalized_height > MAX_NORMALIZED_HEIGHT {
        return 1.0;
    }

    // Below h̄ = 0.25 the image-rotor term is singular; saturate instead.
    let denominator = 1.0 - (1.0 / (4.0 * normalized_height)).powi(2);
    let base_factor = if denominator > 1.0 / MAX_THRUST_MULTIPLIER {
        1.0 / denominator
    } else {
        MAX_THRUST_MULTIPLIER
    };

    let thrust_correction = 1.0 + 0.1 * (thrust_coefficient.max(0.0) / 0.02).sqrt();

    let proximity = if normalized_height < PROXIMITY_HEIGHT {
        0.9 + 0.1 * (normalized_height / PROXIMITY_HEIGHT).sqrt()
    } else {
        1.0
    };

    (base_factor * thrust_correction * proximity).min(MAX_THRUST_MULTIPLIER)
}

fn recirculation_factor(normalized_height: f64, speed: f64, collective_pitch: f64) -> f64 {
    if normalized_height >= RECIRCULATION_HEIGHT {
        return 1.0;
    }

    let height_factor = (1.0 - normalized_height / RECIRCULATION_HEIGHT).sqrt();
    let velocity_factor = (-speed / RECIRCULATION_VELOCITY).exp();
    let pitch_factor = 1.0 + 0.15 * collective_pitch.sin().abs();

    1.0 - 0.2 * height_factor * velocity_factor * pitch_factor
}

fn induced_power_ratio(thrust_multiplier: f64, normalized_height: f64) -> f64 {
    let mut ratio = 1.0 / thrust_multiplier.powf(1.5);
    if normalized_height < PROXIMITY_HEIGHT {
        ratio += 0.15 * (1.0 - normalized_height / PROXIMITY_HEIGHT).powf(0.7);
    }
    ratio
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params() -> GroundEffectParams {
        GroundEffectParams {
            rotor_radius: 0.2,
            thrust_coefficient: 0.0085,
            collective_pitch: 0.2,
            velocity: Vector3::zeros(),
        }
    }

    fn multiplier_at(normalized_height: f64) -> f64 {
        calculate_ground_effect(&params(), normalized_height * 0.4).thrust_multiplier
    }

    #[test]
    fn test_multiplier_bounds_across_heights() {
        let mut h = 0.0;
        while h <= 3.0 {
            let multiplier = multiplier_at(h);
            assert!(
                (1.0..=1.4).contains(&multiplier),
                "multiplier {multiplier} out of bounds at h = {h}"
            );
            h += 0.01;
        }
    }

    #[test]
    fn test_near_ground_exceeds_free_air() {
        assert!(multiplier_at(0.05) > multiplier_at(2.0));
        assert!(multiplier_at(0.5) > multiplier_at(2.0));
        assert_relative_eq!(multiplier_at(2.5), 1.0);
    }

    #[test]
    fn test_recirculation_fades_with_speed() {
        let hover = calculate_ground_effect(&params(), 0.2);
        let mut moving = params();
        moving.velocity = Vector3::new(20.0, 0.0, 0.0);
        let cruise = calculate_ground_effect(&moving, 0.2);

        assert!(hover.recirculation_factor < cruise.recirculation_factor);
        assert!(cruise.thrust_multiplier >= hover.thrust_multiplier);
    }

    #[test]
    fn test_induced_power_ratio() {
        let free = calculate_ground_effect(&params(), 10.0);
        assert_relative_eq!(free.induced_power_ratio, 1.0);
        assert_relative_eq!(free.surface_normal, Vector3::y());

        let near = calculate_ground_effect(&params(), 0.3);
        assert!(near.induced_power_ratio < 1.0 + 0.15);
        assert!(near.thrust_multiplier > 1.0);
    }

    #[test]
    fn test_effective_height_in_metres() {
        let state = calculate_ground_effect(&params(), 0.3);
        assert_relative_eq!(state.effective_height, 0.3);

        let below = calculate_ground_effect(&params(), -0.5);
        assert_relative_eq!(below.effective_height, 0.0);
    }

    #[test]
    fn test_degenerate_radius() {
        let mut p = params();
        p.rotor_radius = 0.0;
        assert_eq!(calculate_ground_effect(&p, 0.1), GroundEffectState::default());
    }
}
