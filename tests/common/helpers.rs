use nalgebra::Vector3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rotorsim::{
    components::{RotorComponent, RotorConfig},
    physics::RigidBodyHandle,
    resources::RotorPhysicsConfig,
    systems::rotor::{update_rotor, RotorTickInputs, RotorTickReport},
};

pub const TEST_SEED: u64 = 42;
pub const TEST_TIMESTEP: f64 = 1.0 / 60.0;

/// Hover height well clear of ground effect [m]
pub const FREE_AIR_HEIGHT: f64 = 10.0;

pub fn test_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(TEST_SEED)
}

/// Draw `count` shaft speeds uniformly from `low..high`.
pub fn random_rpms(rng: &mut ChaCha8Rng, count: usize, low: f64, high: f64) -> Vec<f64> {
    (0..count).map(|_| rng.gen_range(low..high)).collect()
}

pub fn create_test_rotor(rpm: f64) -> RotorComponent {
    let mut rotor = RotorComponent::new(RotorConfig::default()).expect("default rotor is valid");
    rotor.set_rpm(rpm);
    rotor
}

pub fn free_air_position() -> Vector3<f64> {
    Vector3::new(0.0, FREE_AIR_HEIGHT, 0.0)
}

/// Run a single isolated tick with no walls and no neighbours.
pub fn tick_isolated(
    rotor: &mut RotorComponent,
    body: &mut dyn RigidBodyHandle,
    config: &RotorPhysicsConfig,
) -> RotorTickReport {
    let inputs = RotorTickInputs {
        dt: TEST_TIMESTEP,
        config,
        collision_world: None,
        wash_sources: &[],
    };
    update_rotor(rotor, body, &inputs).expect("tick in free air succeeds")
}
