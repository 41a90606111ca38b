use rotorsim::components::{PhysicsComponent, RotorComponent, SpatialComponent};

/// Assert that a spatial component's state is valid
#[track_caller]
pub fn assert_spatial_valid(spatial: &SpatialComponent) {
    assert!(
        spatial.position.iter().all(|x| x.is_finite()),
        "Position is not finite: {:?}",
        spatial.position
    );
    assert!(
        spatial.velocity.iter().all(|x| x.is_finite()),
        "Velocity is not finite: {:?}",
        spatial.velocity
    );
    assert!(
        spatial.angular_velocity.iter().all(|x| x.is_finite()),
        "Angular velocity is not finite: {:?}",
        spatial.angular_velocity
    );
    assert!(
        (spatial.attitude.norm() - 1.0).abs() < 1e-9,
        "Attitude is not a unit quaternion"
    );
}

/// Assert that a physics component's state is valid
#[track_caller]
pub fn assert_physics_valid(physics: &PhysicsComponent) {
    assert!(physics.mass > 0.0, "Mass must be positive");
    assert!(physics.mass.is_finite(), "Mass must be finite");
    assert!(
        physics.inertia_inv.iter().all(|x| x.is_finite()),
        "Inverse inertia matrix contains non-finite values"
    );
    assert!(
        (0.0..=1.0).contains(&physics.linear_damping)
            && (0.0..=1.0).contains(&physics.angular_damping),
        "Damping outside [0, 1]"
    );
}

/// Assert the invariants every rotor holds after a tick
#[track_caller]
pub fn assert_rotor_state_valid(rotor: &RotorComponent) {
    let state = &rotor.state;
    assert!(state.thrust.is_finite() && state.thrust >= 0.0, "Thrust {}", state.thrust);
    assert!(state.power.is_finite() && state.power >= 0.0, "Power {}", state.power);
    assert!(
        (1.0..=1.4).contains(&state.ground_effect.thrust_multiplier),
        "Ground effect multiplier {}",
        state.ground_effect.thrust_multiplier
    );
    assert!(
        (state.blade.tip_path_plane.norm() - 1.0).abs() < 1e-9,
        "Tip-path plane is not a unit vector"
    );
    assert!(
        (0.0..=0.95).contains(&state.motor.efficiency),
        "Motor efficiency {}",
        state.motor.efficiency
    );
    assert!(
        state.motor.winding_temperature.is_finite(),
        "Winding temperature is not finite"
    );
}

/// Assert `actual / reference` lies within `tolerance` of `expected_ratio`
#[track_caller]
pub fn assert_ratio_within(actual: f64, reference: f64, expected_ratio: f64, tolerance: f64) {
    let ratio = actual / reference;
    let low = expected_ratio * (1.0 - tolerance);
    let high = expected_ratio * (1.0 + tolerance);
    assert!(
        (low..=high).contains(&ratio),
        "Ratio {ratio} outside [{low}, {high}]"
    );
}
