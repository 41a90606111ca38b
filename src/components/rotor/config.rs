use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::utils::RotorError;

/// Blade-element formulation used for thrust and torque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AeroModel {
    /// Single pass, 2π lift slope, no tip loss or stall.
    Basic,
    /// Tapered/twisted blade with tip loss, stall and Reynolds corrections.
    #[default]
    Detailed,
}

/// Direction of rotation seen from above the rotor disc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RotorSpin {
    Clockwise,
    #[default]
    CounterClockwise,
}

impl RotorSpin {
    /// +1 when the spin vector is aligned with the rotor normal.
    pub fn sign(&self) -> f64 {
        match self {
            RotorSpin::Clockwise => -1.0,
            RotorSpin::CounterClockwise => 1.0,
        }
    }
}

/// Initialization inputs for a rotor body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotorConfig {
    /// Rotor mass [kg]
    pub mass: f64,
    /// Blade radius [m]
    pub blade_radius: f64,
    pub blade_count: u32,
    /// Collective blade pitch [rad]
    pub blade_pitch: f64,
    /// Disc area [m^2]
    pub disc_area: f64,
    /// Thrust axis in the body frame
    pub rotor_normal: Vector3<f64>,
    #[serde(default)]
    pub spin: RotorSpin,
    #[serde(default)]
    pub aero_model: AeroModel,
    /// Cyclic pitch amplitude [rad]
    #[serde(default)]
    pub cyclic_pitch: f64,
    /// Forward shaft tilt [rad], negative tilts the disc nose down
    #[serde(default)]
    pub shaft_tilt: f64,
}

impl Default for RotorConfig {
    fn default() -> Self {
        Self::with_radius(0.2)
    }
}

impl RotorConfig {
    /// Two-bladed 0.1 kg rotor with the disc area matching `radius`.
    pub fn with_radius(radius: f64) -> Self {
        Self {
            mass: 0.1,
            blade_radius: radius,
            blade_count: 2,
            blade_pitch: 0.2,
            disc_area: PI * radius * radius,
            rotor_normal: Vector3::y(),
            spin: RotorSpin::default(),
            aero_model: AeroModel::default(),
            cyclic_pitch: 0.0,
            shaft_tilt: 0.0,
        }
    }

    pub fn validate(&self) -> Result<(), RotorError> {
        require_positive("mass", self.mass)?;
        require_positive("blade radius", self.blade_radius)?;
        require_positive("disc area", self.disc_area)?;
        if self.blade_count == 0 {
            return Err(RotorError::InvalidConfig(
                "a rotor needs at least one blade".to_string(),
            ));
        }
        if self.rotor_normal.norm() < 1e-9 {
            return Err(RotorError::InvalidConfig(
                "rotor normal must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn unit_normal(&self) -> Vector3<f64> {
        self.rotor_normal
            .try_normalize(1e-9)
            .unwrap_or_else(Vector3::y)
    }
}

fn require_positive(name: &str, value: f64) -> Result<(), RotorError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(RotorError::InvalidConfig(format!(
            "{name} must be positive, got {value}"
        )))
    }
}

/// Static per-blade properties used by the flapping model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BladeProperties {
    /// Mass of a single blade [kg]
    pub mass: f64,
    /// Flap hinge offset from the hub [m]
    pub hinge_offset: f64,
    pub lock_number: f64,
    /// Flap spring stiffness [N·m/rad]
    pub spring_constant: f64,
    /// Non-rotating flap frequency [rad/s]
    pub natural_frequency: f64,
    /// Blade length outboard of the hinge [m]
    pub blade_grip: f64,
}

impl BladeProperties {
    /// Flap inertia of a uniform blade about its hinge.
    pub fn moment_of_inertia(&self) -> f64 {
        self.mass * self.blade_grip * self.blade_grip / 3.0
    }

    pub fn tip_radius(&self) -> f64 {
        self.hinge_offset + self.blade_grip
    }
}

/// Electrical, mechanical and thermal constants of a brushless motor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotorParameters {
    /// Speed constant [RPM/V]
    pub kv: f64,
    /// Winding resistance at 20 °C [Ω]
    pub resistance: f64,
    /// Winding inductance [H]
    pub inductance: f64,
    /// Rotor inertia [kg·m^2]
    pub inertia: f64,
    /// Winding-to-ambient thermal resistance [K/W]
    pub thermal_resistance: f64,
    /// Winding thermal capacity [J/K]
    pub thermal_capacity: f64,
    /// Supply voltage [V]
    pub voltage: f64,
    /// Current limit [A]
    pub max_current: f64,
}

impl Default for MotorParameters {
    fn default() -> Self {
        Self {
            kv: 1000.0,
            resistance: 0.1,
            inductance: 1e-4,
            inertia: 1e-4,
            thermal_resistance: 10.0,
            thermal_capacity: 100.0,
            voltage: 11.1,
            max_current: 30.0,
        }
    }
}

pub const HINGE_OFFSET_RATIO: f64 = 0.05;
pub const BLADE_GRIP_RATIO: f64 = 0.95;
pub const DEFAULT_LOCK_NUMBER: f64 = 5.0;
pub const DEFAULT_FLAP_SPRING: f64 = 1000.0;

/// Derive the blade properties of a rotor from its mass and radius.
pub fn initialize_blade_properties(config: &RotorConfig) -> BladeProperties {
    let blade_count = config.blade_count.max(1) as f64;
    let mut blade = BladeProperties {
        mass: config.mass / blade_count,
        hinge_offset: HINGE_OFFSET_RATIO * config.blade_radius,
        lock_number: DEFAULT_LOCK_NUMBER,
        spring_constant: DEFAULT_FLAP_SPRING,
        natural_frequency: 0.0,
        blade_grip: BLADE_GRIP_RATIO * config.blade_radius,
    };

    let inertia = blade.moment_of_inertia();
    blade.natural_frequency = if inertia > 0.0 {
        (blade.spring_constant / inertia).sqrt()
    } else {
        0.0
    };
    blade
}

pub fn initialize_motor_parameters() -> MotorParameters {
    MotorParameters::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_blade_properties_from_rotor() {
        let config = RotorConfig::default();
        let blade = initialize_blade_properties(&config);

        assert_relative_eq!(blade.mass, 0.05);
        assert_relative_eq!(blade.hinge_offset, 0.01);
        assert_relative_eq!(blade.blade_grip, 0.19);
        assert_relative_eq!(blade.lock_number, 5.0);
        assert_relative_eq!(blade.tip_radius(), 0.2);

        let inertia: f64 = 0.05 * 0.19 * 0.19 / 3.0;
        assert_relative_eq!(blade.natural_frequency, (1000.0 / inertia).sqrt());
    }

    #[test]
    fn test_motor_defaults() {
        let motor = initialize_motor_parameters();
        assert_relative_eq!(motor.kv, 1000.0);
        assert_relative_eq!(motor.voltage, 11.1);
        assert_relative_eq!(motor.max_current, 30.0);
        assert_relative_eq!(motor.thermal_capacity, 100.0);
    }

    #[test]
    fn test_validation() {
        assert!(RotorConfig::default().validate().is_ok());

        let mut config = RotorConfig::default();
        config.blade_count = 0;
        assert!(config.validate().is_err());

        let mut config = RotorConfig::default();
        config.blade_radius = -0.1;
        assert!(config.validate().is_err());

        let mut config = RotorConfig::default();
        config.rotor_normal = Vector3::zeros();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_spin_sign() {
        assert_eq!(RotorSpin::CounterClockwise.sign(), 1.0);
        assert_eq!(RotorSpin::Clockwise.sign(), -1.0);
    }
}
