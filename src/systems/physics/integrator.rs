use crate::components::{PhysicsComponent, SpatialComponent};
use crate::resources::PhysicsConfig;
use bevy::prelude::*;
use nalgebra::{Matrix3, UnitQuaternion, Vector3};

/// Integrate every body over one fixed step, then apply damping and velocity
/// limits and clear the force accumulator for the next tick.
///
/// # Arguments
/// - `query`: entities with `PhysicsComponent` and `SpatialComponent`.
/// - `config`: physics configuration resource for the timestep and limits.
pub fn physics_integrator_system(
    mut query: Query<(&mut PhysicsComponent, &mut SpatialComponent)>,
    config: Res<PhysicsConfig>,
) {
    let dt = config.timestep;

    for (mut physics, mut spatial) in query.iter_mut() {
        integrate_state(&physics, &mut spatial, dt);
        apply_damping(
            &mut spatial,
            physics.linear_damping,
            physics.angular_damping,
            dt,
        );
        apply_velocity_limits(
            &mut spatial,
            config.max_velocity,
            config.max_angular_velocity,
        );
        physics.clear_forces();
    }
}

struct StateDerivatives {
    velocity: Vector3<f64>,
    acceleration: Vector3<f64>,
    angular_acceleration: Vector3<f64>,
}

/// Rigid-body derivatives with the inertia tensor rotated into the world frame.
fn calculate_derivatives(
    physics: &PhysicsComponent,
    velocity: &Vector3<f64>,
    attitude: &UnitQuaternion<f64>,
    angular_velocity: &Vector3<f64>,
) -> StateDerivatives {
    let acceleration = if physics.mass > 0.0 {
        physics.net_force / physics.mass
    } else {
        Vector3::zeros()
    };

    let rotation = attitude.to_rotation_matrix();
    let inertia_world: Matrix3<f64> = rotation.matrix() * physics.inertia * rotation.matrix().transpose();
    let inertia_world_inv: Matrix3<f64> =
        rotation.matrix() * physics.inertia_inv * rotation.matrix().transpose();

    let gyro_term = angular_velocity.cross(&(inertia_world * angular_velocity));
    let angular_acceleration = inertia_world_inv * (physics.net_moment - gyro_term);

    StateDerivatives {
        velocity: *velocity,
        acceleration,
        angular_acceleration,
    }
}

fn rotate(attitude: &UnitQuaternion<f64>, angular_velocity: &Vector3<f64>, dt: f64) -> UnitQuaternion<f64> {
    UnitQuaternion::from_scaled_axis(angular_velocity * dt) * attitude
}

/// Classic RK4 over one step with the net force and moment held constant.
pub fn integrate_state(physics: &PhysicsComponent, spatial: &mut SpatialComponent, dt: f64) {
    let p0 = spatial.position;
    let v0 = spatial.velocity;
    let q0 = spatial.attitude;
    let w0 = spatial.angular_velocity;

    let k1 = calculate_derivatives(physics, &v0, &q0, &w0);

    let v2 = v0 + k1.acceleration * (dt / 2.0);
    let w2 = w0 + k1.angular_acceleration * (dt / 2.0);
    let k2 = calculate_derivatives(physics, &v2, &rotate(&q0, &w2, dt / 2.0), &w2);

    let v3 = v0 + k2.acceleration * (dt / 2.0);
    let w3 = w0 + k2.angular_acceleration * (dt / 2.0);
    let k3 = calculate_derivatives(physics, &v3, &rotate(&q0, &w3, dt / 2.0), &w3);

    let v4 = v0 + k3.acceleration * dt;
    let w4 = w0 + k3.angular_acceleration * dt;
    let k4 = calculate_derivatives(physics, &v4, &rotate(&q0, &w4, dt), &w4);

    spatial.position =
        p0 + (dt / 6.0) * (k1.velocity + 2.0 * k2.velocity + 2.0 * k3.velocity + k4.velocity);
    spatial.velocity = v0
        + (dt / 6.0)
            * (k1.acceleration + 2.0 * k2.acceleration + 2.0 * k3.acceleration + k4.acceleration);
    spatial.angular_velocity = w0
        + (dt / 6.0)
            * (k1.angular_acceleration
                + 2.0 * k2.angular_acceleration
                + 2.0 * k3.angular_acceleration
                + k4.angular_acceleration);

    let omega_avg = (w0 + 2.0 * w2 + 2.0 * w3 + w4) / 6.0;
    if omega_avg.norm() > 0.0 {
        spatial.attitude = rotate(&q0, &omega_avg, dt);
        spatial.attitude.renormalize();
    }
}

/// Velocity decay `v *= (1 - d)^dt`, with `d` the fraction lost per second.
pub fn apply_damping(spatial: &mut SpatialComponent, linear: f64, angular: f64, dt: f64) {
    spatial.velocity *= (1.0 - linear.clamp(0.0, 1.0)).powf(dt);
    spatial.angular_velocity *= (1.0 - angular.clamp(0.0, 1.0)).powf(dt);
}

/// Scale velocities back onto the configured limits.
pub fn apply_velocity_limits(
    spatial: &mut SpatialComponent,
    max_velocity: f64,
    max_angular_velocity: f64,
) {
    let velocity_norm = spatial.velocity.norm();
    if velocity_norm > max_velocity {
        spatial.velocity *= max_velocity / velocity_norm;
    }

    let angular_velocity_norm = spatial.angular_velocity.norm();
    if angular_velocity_norm > max_angular_velocity {
        spatial.angular_velocity *= max_angular_velocity / angular_velocity_norm;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const G: f64 = 9.80665;

    fn body(mass: f64) -> PhysicsComponent {
        PhysicsComponent::new(mass, Matrix3::identity() * mass)
    }

    #[test]
    fn test_free_fall_matches_kinematics() {
        let mut physics = body(1.0);
        physics.net_force = Vector3::new(0.0, -G, 0.0);
        let mut spatial = SpatialComponent::at_position(Vector3::new(0.0, 100.0, 0.0));

        for _ in 0..60 {
            integrate_state(&physics, &mut spatial, 1.0 / 60.0);
        }

        assert_relative_eq!(spatial.velocity.y, -G, epsilon = 1e-9);
        assert_relative_eq!(spatial.position.y, 100.0 - 0.5 * G, epsilon = 1e-9);
    }

    #[test]
    fn test_energy_conservation() {
        let mass = 2.0;
        let mut physics = body(mass);
        physics.net_force = Vector3::new(0.0, -G * mass, 0.0);
        let mut spatial = SpatialComponent {
            position: Vector3::new(0.0, 50.0, 0.0),
            velocity: Vector3::new(10.0, 5.0, 0.0),
            ..Default::default()
        };
        let energy = |s: &SpatialComponent| 0.5 * mass * s.velocity.norm_squared() + mass * G * s.position.y;
        let initial = energy(&spatial);

        for _ in 0..200 {
            integrate_state(&physics, &mut spatial, 0.01);
            let error = (energy(&spatial) - initial).abs() / initial;
            assert!(error < 1e-6, "energy drifted by {error}");
        }
    }

    #[test]
    fn test_constant_rotation() {
        let physics = body(1.0);
        let rate = Vector3::new(0.1, 0.05, -0.03);
        let mut spatial = SpatialComponent {
            angular_velocity: rate,
            ..Default::default()
        };

        for _ in 0..100 {
            integrate_state(&physics, &mut spatial, 0.01);
        }

        let expected = UnitQuaternion::from_scaled_axis(rate * 1.0);
        assert!(spatial.attitude.angle_to(&expected) < 1e-9);
        assert_relative_eq!(spatial.attitude.as_ref().norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_numerical_stability() {
        for dt in [0.001, 0.01, 0.1] {
            let mut physics = PhysicsComponent::rotor_disc(0.5, 0.2);
            physics.net_force = Vector3::new(1.0, 0.5, -2.0);
            physics.net_moment = Vector3::new(0.001, -0.0005, 0.00025);
            let mut spatial = SpatialComponent {
                velocity: Vector3::new(10.0, 1.0, 0.5),
                attitude: UnitQuaternion::from_euler_angles(0.1, 0.2, 0.3),
                angular_velocity: Vector3::new(0.5, 1.0, -0.3),
                ..Default::default()
            };

            for _ in 0..(10.0 / dt) as usize {
                integrate_state(&physics, &mut spatial, dt);
                apply_velocity_limits(&mut spatial, 100.0, 50.0);
                assert!(spatial.position.iter().all(|v| v.is_finite()));
                assert!(spatial.angular_velocity.iter().all(|v| v.is_finite()));
                assert_relative_eq!(spatial.attitude.as_ref().norm(), 1.0, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_damping_decay() {
        let mut spatial = SpatialComponent {
            velocity: Vector3::new(10.0, 0.0, 0.0),
            angular_velocity: Vector3::new(0.0, 4.0, 0.0),
            ..Default::default()
        };

        for _ in 0..60 {
            apply_damping(&mut spatial, 0.1, 0.5, 1.0 / 60.0);
        }

        assert_relative_eq!(spatial.velocity.x, 9.0, epsilon = 1e-9);
        assert_relative_eq!(spatial.angular_velocity.y, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_velocity_limits() {
        let mut spatial = SpatialComponent {
            velocity: Vector3::new(300.0, 400.0, 0.0),
            angular_velocity: Vector3::new(0.0, 0.0, 80.0),
            ..Default::default()
        };

        apply_velocity_limits(&mut spatial, 100.0, 50.0);

        assert_relative_eq!(spatial.velocity, Vector3::new(60.0, 80.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(spatial.angular_velocity.z, 50.0);
    }
}
