use crate::components::{MotorParameters, MotorState};
use crate::utils::{rpm_to_omega, RPM_TO_RAD};

/// Copper temperature coefficient [1/K]
const COPPER_TEMP_COEFFICIENT: f64 = 0.004;
/// Temperature at which the winding resistance is specified [K]
const RESISTANCE_REFERENCE_TEMP: f64 = 293.15;
const PEAK_EFFICIENCY: f64 = 0.95;
/// Torque lost at full speed and full load.
const SPEED_LOAD_DERATING: f64 = 0.2;

const POLE_PAIRS: f64 = 7.0;
const HYSTERESIS_COEFFICIENT: f64 = 0.01;
const EDDY_COEFFICIENT: f64 = 1e-4;
const FRICTION_COEFFICIENT: f64 = 0.001;
const WINDAGE_COEFFICIENT: f64 = 1e-8;
const BEARING_COEFFICIENT: f64 = 0.001;

/// RPM at which forced cooling is referenced.
const COOLING_REFERENCE_RPM: f64 = 10_000.0;

/// Advance the electro-thermal motor model by `dt`.
///
/// The electrical and mechanical quantities are algebraic in the commanded
/// speed. Only the winding temperature is integrated, starting from
/// `previous.winding_temperature`.
///
/// # Arguments
/// - `params`: motor constants
/// - `previous`: state from the previous tick
/// - `rpm`: shaft speed [RPM]
/// - `load_torque`: aerodynamic load on the shaft [N·m]
/// - `ambient_temperature`: air temperature [K]
/// - `dt`: tick length [s]
pub fn calculate_motor_state(
    params: &MotorParameters,
    previous: &MotorState,
    rpm: f64,
    load_torque: f64,
    ambient_temperature: f64,
    dt: f64,
) -> MotorState {
    let winding_temperature = previous.winding_temperature;
    let back_emf = back_emf(rpm, params.kv);
    let resistance = compensated_resistance(params.resistance, winding_temperature);

    let current = if resistance > 0.0 {
        ((params.voltage - back_emf) / resistance).clamp(-params.max_current, params.max_current)
    } else {
        0.0
    };

    let kt = torque_constant(params.kv);
    let speed_factor = speed_factor(rpm, params);
    let load_factor = load_factor(load_torque, kt, params.max_current);
    let torque = current * kt * efficiency_factor(speed_factor, load_factor);

    let omega = rpm_to_omega(rpm);
    let input_power = params.voltage * current;
    let output_power = torque * omega;

    let copper_loss = current * current * resistance;
    let iron_loss = iron_loss(back_emf, rpm);
    let mechanical_loss = mechanical_loss(rpm, torque);
    let heat = copper_loss + iron_loss + mechanical_loss;

    let efficiency = if input_power > 0.0 {
        (output_power / input_power).clamp(0.0, PEAK_EFFICIENCY)
    } else {
        0.0
    };

    let thermal_resistance = effective_thermal_resistance(params.thermal_resistance, rpm);
    let temperature_rate = if params.thermal_capacity > 0.0 {
        (heat * thermal_resistance - (winding_temperature - ambient_temperature))
            / params.thermal_capacity
    } else {
        0.0
    };

    MotorState {
        rpm,
        back_emf,
        current,
        torque,
        input_power,
        output_power,
        efficiency,
        copper_loss,
        iron_loss,
        mechanical_loss,
        winding_temperature: winding_temperature + temperature_rate * dt,
    }
}

/// A stopped, unpowered motor: no electrical or mechanical output, the
/// winding relaxes towards ambient.
pub fn calculate_idle_motor_state(
    params: &MotorParameters,
    previous: &MotorState,
    ambient_temperature: f64,
    dt: f64,
) -> MotorState {
    let cooling = if params.thermal_capacity > 0.0 {
        (ambient_temperature - previous.winding_temperature) / params.thermal_capacity
    } else {
        0.0
    };
    MotorState::at_ambient(previous.winding_temperature + cooling * dt)
}

/// Back-EMF [V] of a motor with speed constant `kv` [RPM/V].
pub fn back_emf(rpm: f64, kv: f64) -> f64 {
    if kv <= 0.0 {
        return 0.0;
    }
    rpm_to_omega(rpm) / (kv * RPM_TO_RAD)
}

/// Torque constant [N·m/A].
pub fn torque_constant(kv: f64) -> f64 {
    if kv <= 0.0 {
        return 0.0;
    }
    60.0 / (2.0 * std::f64::consts::PI * kv)
}

pub fn compensated_resistance(resistance: f64, winding_temperature: f64) -> f64 {
    resistance
        * (1.0 + COPPER_TEMP_COEFFICIENT * (winding_temperature - RESISTANCE_REFERENCE_TEMP))
            .max(0.0)
}

/// Fraction of the no-load speed.
fn speed_factor(rpm: f64, params: &MotorParameters) -> f64 {
    let no_load_rpm = params.kv * params.voltage;
    if no_load_rpm <= 0.0 {
        return 0.0;
    }
    (rpm.abs() / no_load_rpm).min(1.0)
}

/// Fraction of the stall torque.
fn load_factor(load_torque: f64, kt: f64, max_current: f64) -> f64 {
    let stall_torque = kt * max_current;
    if stall_torque <= 0.0 {
        return 0.0;
    }
    (load_torque.abs() / stall_torque).min(1.0)
}

fn efficiency_factor(speed_factor: f64, load_factor: f64) -> f64 {
    PEAK_EFFICIENCY * (1.0 - SPEED_LOAD_DERATING * speed_factor * load_factor)
}

/// Hysteresis plus eddy-current loss [W].
fn iron_loss(back_emf: f64, rpm: f64) -> f64 {
    let electrical_frequency = POLE_PAIRS * rpm.abs() / 60.0;
    let emf_sq = back_emf * back_emf;
    HYSTERESIS_COEFFICIENT * emf_sq + EDDY_COEFFICIENT * emf_sq * electrical_frequency
}

/// Friction, windage and bearing loss [W].
fn mechanical_loss(rpm: f64, torque: f64) -> f64 {
    FRICTION_COEFFICIENT * rpm.abs()
        + WINDAGE_COEFFICIENT * rpm * rpm
        + BEARING_COEFFICIENT * (torque * rpm_to_omega(rpm)).abs()
}

/// Thermal resistance with forced cooling from the spinning rotor [K/W].
fn effective_thermal_resistance(thermal_resistance: f64, rpm: f64) -> f64 {
    thermal_resistance / (1.0 + 0.5 * (rpm.abs() / COOLING_REFERENCE_RPM).powf(0.7))
}
