use nalgebra::Vector3;
use std::f64::consts::PI;

use crate::components::WallState;
use crate::utils::normalize_or_zero;

/// Rotor-to-wall separation, in radii, below which the wall pushes back.
const PROXIMITY_RATIO: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallParameters {
    /// Distance from the rotor hub to the wall [m]
    pub wall_distance: f64,
    /// Unit wall normal pointing back towards the rotor
    pub wall_normal: Vector3<f64>,
    /// Rotor radius [m]
    pub rotor_radius: f64,
    /// Rotor thrust [N]
    pub thrust: f64,
    pub thrust_coefficient: f64,
    /// Collective pitch [rad]
    pub collective_pitch: f64,
}

/// Image-rotor model of a vertical surface next to the rotor.
///
/// The mirror rotor behind the wall draws the rotor towards the wall. Close
/// in, the wall also pushes back along its normal with a force that fades
/// linearly to zero at two radii.
pub fn calculate_wall_effect(
    params: &WallParameters,
    rotor_position: &Vector3<f64>,
    rotor_velocity: &Vector3<f64>,
) -> WallState {
    if params.rotor_radius <= 0.0 || params.wall_distance <= 0.0 {
        return WallState::default();
    }

    let normal = normalize_or_zero(&params.wall_normal);
    let distance_ratio = params.wall_distance / params.rotor_radius;

    let pressure_coefficient = params.thrust_coefficient / (PI * distance_ratio * distance_ratio)
        * (-2.0 * distance_ratio).exp();
    let alignment = normal.dot(&normalize_or_zero(rotor_velocity));
    let interference_factor = (1.0 / (1.0 + distance_ratio)) * (1.0 + alignment.abs());

    let image_position = rotor_position + 2.0 * params.wall_distance * normal;
    let image_influence = normalize_or_zero(&(rotor_position - image_position)) * interference_factor;

    let pitch_factor = params.collective_pitch.sin().abs();
    let mut induced_force = image_influence * params.thrust * pressure_coefficient * pitch_factor;
    let induced_moment = (normal * params.rotor_radius).cross(&induced_force);

    if distance_ratio < PROXIMITY_RATIO {
        let normal_scale = 1.0 - distance_ratio / PROXIMITY_RATIO;
        induced_force += normal * params.thrust * normal_scale;
    }

    WallState {
        distance: params.wall_distance,
        distance_ratio,
        wall_normal: normal,
        pressure_coefficient,
        interference_factor,
        induced_force,
        induced_moment,
        in_proximity: distance_ratio < PROXIMITY_RATIO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn wall_ahead(distance: f64) -> WallParameters {
        WallParameters {
            wall_distance: distance,
            wall_normal: -Vector3::x(),
            rotor_radius: 0.2,
            thrust: 10.0,
            thrust_coefficient: 0.01,
            collective_pitch: 0.2,
        }
    }

    #[test]
    fn test_pressure_and_interference() {
        let state = calculate_wall_effect(&wall_ahead(0.2), &Vector3::zeros(), &Vector3::zeros());

        assert_relative_eq!(state.distance_ratio, 1.0);
        assert_relative_eq!(state.pressure_coefficient, 0.01 / PI * (-2.0f64).exp());
        assert_relative_eq!(state.interference_factor, 0.5);
        assert!(state.in_proximity);
    }

    #[test]
    fn test_close_wall_pushes_rotor_away() {
        let state = calculate_wall_effect(&wall_ahead(0.1), &Vector3::zeros(), &Vector3::zeros());
        // The normal term dominates the image suction this close.
        assert!(state.induced_force.x < 0.0);
        assert_relative_eq!(state.induced_force.y, 0.0);
    }

    #[test]
    fn test_distant_wall_draws_rotor_in() {
        let state = calculate_wall_effect(&wall_ahead(0.5), &Vector3::zeros(), &Vector3::zeros());
        assert!(!state.in_proximity);
        assert!(state.induced_force.x > 0.0);
        assert!(state.induced_force.norm() < 1e-3);
    }

    #[test]
    fn test_approach_velocity_raises_interference() {
        let at_rest = calculate_wall_effect(&wall_ahead(0.3), &Vector3::zeros(), &Vector3::zeros());
        let approaching =
            calculate_wall_effect(&wall_ahead(0.3), &Vector3::zeros(), &Vector3::new(2.0, 0.0, 0.0));
        assert_relative_eq!(
            approaching.interference_factor,
            2.0 * at_rest.interference_factor
        );
    }

    #[test]
    fn test_moment_is_perpendicular_to_arm() {
        let mut params = wall_ahead(0.5);
        params.wall_normal = Vector3::new(-1.0, 0.0, 1.0);
        let state = calculate_wall_effect(&params, &Vector3::zeros(), &Vector3::zeros());
        assert_relative_eq!(state.wall_normal.norm(), 1.0);
        assert_relative_eq!(state.induced_moment.dot(&state.wall_normal), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_inputs_are_neutral() {
        let mut params = wall_ahead(0.2);
        params.rotor_radius = 0.0;
        assert_eq!(
            calculate_wall_effect(&params, &Vector3::zeros(), &Vector3::zeros()),
            WallState::default()
        );
    }
}
