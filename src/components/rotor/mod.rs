mod config;
mod state;

pub use config::*;
pub use state::*;

use bevy::prelude::*;

use crate::utils::{rpm_to_omega, RotorError, MAX_RPM};

/// A rotor attached to an entity: static properties, commanded RPM and the
/// dynamic state threaded through every sub-model each tick.
#[derive(Component, Debug, Clone)]
pub struct RotorComponent {
    pub config: RotorConfig,
    pub blade: BladeProperties,
    pub motor: MotorParameters,
    pub state: RotorDynamicState,
    rpm: f64,
}

impl RotorComponent {
    pub fn new(config: RotorConfig) -> Result<Self, RotorError> {
        config.validate()?;
        let blade = initialize_blade_properties(&config);
        let motor = initialize_motor_parameters();

        Ok(Self {
            config,
            blade,
            motor,
            state: RotorDynamicState::default(),
            rpm: 0.0,
        })
    }

    pub fn rpm(&self) -> f64 {
        self.rpm
    }

    /// Rotor speed [rad/s]
    pub fn omega(&self) -> f64 {
        rpm_to_omega(self.rpm)
    }

    /// Command a new shaft speed, clamped to [0, MAX_RPM].
    pub fn set_rpm(&mut self, rpm: f64) {
        let clamped = if rpm.is_nan() { 0.0 } else { rpm.clamp(0.0, MAX_RPM) };
        if clamped != rpm {
            warn!("Rotor RPM command {rpm} clamped to {clamped}");
        }
        self.rpm = clamped;
    }

    /// Thrust cached by the latest tick [N]
    pub fn thrust(&self) -> f64 {
        self.state.thrust
    }

    pub fn is_spinning(&self) -> bool {
        self.rpm > 0.0
    }
}
