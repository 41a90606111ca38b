use bevy::prelude::*;
use nalgebra::Vector3;
use rotorsim::{
    components::RotorConfig,
    physics::WallColliders,
    plugins::{rotor_bundle, PhysicsPlugin, RotorPhysicsPlugin},
    resources::{PhysicsConfig, RotorPhysicsConfig},
};

struct RotorSpawn {
    config: RotorConfig,
    position: Vector3<f64>,
    rpm: f64,
}

// Builder for creating a test application with customizable configuration
#[derive(Default)]
pub struct TestAppBuilder {
    rotors: Vec<RotorSpawn>,
    physics_config: Option<PhysicsConfig>,
    rotor_config: Option<RotorPhysicsConfig>,
    walls: Option<WallColliders>,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rotor(mut self, config: RotorConfig, position: Vector3<f64>, rpm: f64) -> Self {
        self.rotors.push(RotorSpawn {
            config,
            position,
            rpm,
        });
        self
    }

    pub fn with_physics(mut self, config: PhysicsConfig) -> Self {
        self.physics_config = Some(config);
        self
    }

    pub fn with_rotor_physics(mut self, config: RotorPhysicsConfig) -> Self {
        self.rotor_config = Some(config);
        self
    }

    pub fn with_walls(mut self, walls: WallColliders) -> Self {
        self.walls = Some(walls);
        self
    }

    pub fn build(self) -> TestApp {
        let mut app = App::new();

        app.add_plugins(MinimalPlugins)
            .add_plugins(PhysicsPlugin::with_config(
                self.physics_config.unwrap_or_default(),
            ))
            .add_plugins(RotorPhysicsPlugin::with_config(
                self.rotor_config.unwrap_or_default(),
            ));

        if let Some(walls) = self.walls {
            app.insert_resource(walls);
        }

        let rotors = self
            .rotors
            .into_iter()
            .map(|spawn| {
                let bundle = rotor_bundle(spawn.config, spawn.position, spawn.rpm)
                    .expect("test rotor config is valid");
                app.world_mut().spawn(bundle).id()
            })
            .collect();

        TestApp { app, rotors }
    }
}

/// Main test application wrapper
pub struct TestApp {
    pub app: App,
    /// Rotor entities in the order they were added to the builder
    pub rotors: Vec<Entity>,
}

impl TestApp {
    /// Run `steps` fixed physics ticks.
    pub fn run_steps(&mut self, steps: usize) {
        for _ in 0..steps {
            self.app.world_mut().run_schedule(FixedUpdate);
        }
    }

    pub fn get<T: Component>(&self, index: usize) -> Option<&T> {
        let entity = *self.rotors.get(index)?;
        self.app.world().get::<T>(entity)
    }

    pub fn get_mut<T: Component>(&mut self, index: usize) -> Option<Mut<T>> {
        let entity = *self.rotors.get(index)?;
        self.app.world_mut().get_mut::<T>(entity)
    }

    pub fn get_resource<T: Resource>(&self) -> Option<&T> {
        self.app.world().get_resource::<T>()
    }
}
