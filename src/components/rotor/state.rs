use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::utils::ISA_SEA_LEVEL_TEMP;

/// Flapping state of a representative blade. Carried forward between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BladeState {
    /// Steady coning angle β0 [rad]
    pub coning_angle: f64,
    /// Flapping angle β [rad]
    pub flapping_angle: f64,
    /// Flapping rate β̇ [rad/s]
    pub flapping_rate: f64,
    /// Coriolis lead-lag angle [rad]
    pub lead_lag_angle: f64,
    /// Blade azimuth ψ in [0, 2π)
    pub azimuth: f64,
    /// Unit normal of the tip-path plane
    pub tip_path_plane: Vector3<f64>,
    /// Disk loading [N/m^2]
    pub disk_loading: f64,
}

impl Default for BladeState {
    fn default() -> Self {
        Self {
            coning_angle: 0.0,
            flapping_angle: 0.0,
            flapping_rate: 0.0,
            lead_lag_angle: 0.0,
            azimuth: 0.0,
            tip_path_plane: Vector3::y(),
            disk_loading: 0.0,
        }
    }
}

/// Trailing tip vortex system. Wake age is carried forward between ticks.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VortexState {
    /// Bound circulation at the tip [m^2/s]
    pub circulation: f64,
    /// Viscous core radius [m]
    pub core_radius: f64,
    /// Time since the wake was shed [s]
    pub wake_age: f64,
    pub dissipation_factor: f64,
    /// Vortex Reynolds number Γ/ν
    pub reynolds_number: f64,
    /// Velocity induced one radius below the hub [m/s]
    pub induced_velocity: Vector3<f64>,
    /// Current vortex point of each blade, world frame
    pub positions: Vec<Vector3<f64>>,
}

/// Electro-thermal motor state. Winding temperature is carried forward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotorState {
    pub rpm: f64,
    /// Back-EMF [V]
    pub back_emf: f64,
    /// Phase current [A]
    pub current: f64,
    /// Shaft torque [N·m]
    pub torque: f64,
    /// Electrical input power [W]
    pub input_power: f64,
    /// Mechanical output power [W]
    pub output_power: f64,
    pub efficiency: f64,
    /// I²R loss [W]
    pub copper_loss: f64,
    /// Hysteresis plus eddy loss [W]
    pub iron_loss: f64,
    /// Friction, windage and bearing loss [W]
    pub mechanical_loss: f64,
    /// Winding temperature [K]
    pub winding_temperature: f64,
}

impl Default for MotorState {
    fn default() -> Self {
        Self::at_ambient(ISA_SEA_LEVEL_TEMP)
    }
}

impl MotorState {
    pub fn at_ambient(temperature: f64) -> Self {
        Self {
            rpm: 0.0,
            back_emf: 0.0,
            current: 0.0,
            torque: 0.0,
            input_power: 0.0,
            output_power: 0.0,
            efficiency: 0.0,
            copper_loss: 0.0,
            iron_loss: 0.0,
            mechanical_loss: 0.0,
            winding_temperature: temperature,
        }
    }

    pub fn total_loss(&self) -> f64 {
        self.copper_loss + self.iron_loss + self.mechanical_loss
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundEffectState {
    /// Thrust multiplier in [1.0, 1.4]
    pub thrust_multiplier: f64,
    pub induced_power_ratio: f64,
    /// Height of the disc above the ground plane [m]
    pub effective_height: f64,
    pub recirculation_factor: f64,
    pub surface_normal: Vector3<f64>,
}

impl Default for GroundEffectState {
    fn default() -> Self {
        Self {
            thrust_multiplier: 1.0,
            induced_power_ratio: 1.0,
            effective_height: f64::INFINITY,
            recirculation_factor: 1.0,
            surface_normal: Vector3::y(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WallState {
    /// Distance to the wall [m]
    pub distance: f64,
    pub distance_ratio: f64,
    /// Wall normal pointing back towards the rotor
    pub wall_normal: Vector3<f64>,
    pub pressure_coefficient: f64,
    pub interference_factor: f64,
    /// Force the wall induces on the rotor [N]
    pub induced_force: Vector3<f64>,
    /// Moment the wall induces on the rotor [N·m]
    pub induced_moment: Vector3<f64>,
    pub in_proximity: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TurbulenceState {
    /// Gust velocity [m/s]
    pub velocity: Vector3<f64>,
    /// Gust angular velocity [rad/s]
    pub angular_velocity: Vector3<f64>,
    /// Turbulence intensity σ/U
    pub intensity: f64,
    /// Longitudinal, lateral and vertical length scales [m]
    pub length_scales: Vector3<f64>,
    /// Longitudinal integral time scale [s]
    pub time_scale: f64,
    /// Static stability in [-1, 1], positive is stable
    pub stability: f64,
    pub wind_shear_factor: f64,
}

/// Downwash field shed by a rotor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PropWashField {
    /// Wash velocity along the downwash direction [m/s]
    pub velocity: Vector3<f64>,
    /// Tip-vortex vorticity [1/s]
    pub vorticity: Vector3<f64>,
    pub intensity: f64,
    /// Momentum-theory induced velocity [m/s]
    pub induced_velocity: f64,
    /// Blade circulation [m^2/s]
    pub circulation: f64,
    pub vortex_strength: f64,
    /// Wash origin, world frame
    pub origin: Vector3<f64>,
    /// Unit downwash direction
    pub direction: Vector3<f64>,
    /// Rotor radius the field was shed from [m]
    pub radius: f64,
}

/// Pitt-Peters inflow states, normalized by tip speed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InflowState {
    /// λ0
    pub mean_inflow: f64,
    /// λ1s
    pub longitudinal_inflow: f64,
    /// λ1c
    pub lateral_inflow: f64,
    pub induced_velocity: Vector3<f64>,
    /// Wake skew angle χ [rad]
    pub wake_skew: f64,
    pub advance_ratio: f64,
    /// Tip-path-plane tilt implied by the inflow distribution [rad]
    pub dynamic_tpp_tilt: f64,
}

/// Everything about a rotor that changes from tick to tick.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RotorDynamicState {
    /// Cached thrust of the latest tick [N]
    pub thrust: f64,
    /// Aerodynamic shaft torque [N·m]
    pub torque: f64,
    /// Aerodynamic power [W]
    pub power: f64,
    pub thrust_coefficient: f64,
    /// Momentum-theory induced velocity [m/s]
    pub induced_velocity: f64,
    pub blade: BladeState,
    pub vortex: VortexState,
    pub motor: MotorState,
    pub ground_effect: GroundEffectState,
    pub wall: WallState,
    pub turbulence: TurbulenceState,
    /// Field this rotor sheds
    pub prop_wash: PropWashField,
    /// Wash force received from other rotors [N]
    pub wash_force: Vector3<f64>,
    /// Wash torque received from other rotors [N·m]
    pub wash_torque: Vector3<f64>,
    pub inflow: InflowState,
    /// Simulation time accumulated by this rotor [s]
    pub elapsed_time: f64,
    pub ticks: u64,
}
