use serde::{Deserialize, Serialize};

use crate::utils::{
    AtmosphereError, AIR_GAMMA, AIR_GAS_CONSTANT, GRAVITY, ISA_LAPSE_RATE, ISA_MAX_ALTITUDE,
    ISA_SEA_LEVEL_PRESSURE, ISA_SEA_LEVEL_TEMP, ISA_TROPOPAUSE_ALTITUDE, ISA_TROPOPAUSE_TEMP,
    SUTHERLAND_CONSTANT, SUTHERLAND_REF_TEMP, SUTHERLAND_REF_VISCOSITY,
};

/// Air properties at a point, recomputed on every call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtmosphericConditions {
    /// Density [kg/m^3]
    pub density: f64,
    /// Static temperature [K]
    pub temperature: f64,
    /// Static pressure [Pa]
    pub pressure: f64,
    /// Dynamic viscosity [Pa·s]
    pub viscosity: f64,
    /// Flight Mach number
    pub mach_factor: f64,
    /// Speed of sound [m/s]
    pub speed_of_sound: f64,
}

impl AtmosphericConditions {
    /// Kinematic viscosity [m^2/s]
    pub fn kinematic_viscosity(&self) -> f64 {
        if self.density > 0.0 {
            self.viscosity / self.density
        } else {
            0.0
        }
    }
}

/// International Standard Atmosphere up to 86 km.
///
/// # Arguments
/// - `altitude`: geometric altitude above sea level [m], within [0, 86000]
/// - `velocity`: airspeed used for the Mach number [m/s]
///
/// # Errors
/// `InvalidArgument` below sea level, `OutOfRange` above the model ceiling.
pub fn calculate_atmospheric_conditions(
    altitude: f64,
    velocity: f64,
) -> Result<AtmosphericConditions, AtmosphereError> {
    if altitude.is_nan() || altitude < 0.0 {
        return Err(AtmosphereError::InvalidArgument(altitude));
    }
    if altitude > ISA_MAX_ALTITUDE {
        return Err(AtmosphereError::OutOfRange(altitude));
    }

    let troposphere_exponent = -GRAVITY / (AIR_GAS_CONSTANT * ISA_LAPSE_RATE);

    let (temperature, pressure) = if altitude <= ISA_TROPOPAUSE_ALTITUDE {
        let temperature = ISA_SEA_LEVEL_TEMP + ISA_LAPSE_RATE * altitude;
        let pressure = ISA_SEA_LEVEL_PRESSURE
            * (temperature / ISA_SEA_LEVEL_TEMP).powf(troposphere_exponent);
        (temperature, pressure)
    } else {
        let tropopause_pressure = ISA_SEA_LEVEL_PRESSURE
            * (ISA_TROPOPAUSE_TEMP / ISA_SEA_LEVEL_TEMP).powf(troposphere_exponent);
        let exponent = -GRAVITY * (altitude - ISA_TROPOPAUSE_ALTITUDE)
            / (AIR_GAS_CONSTANT * ISA_TROPOPAUSE_TEMP);
        (ISA_TROPOPAUSE_TEMP, tropopause_pressure * exponent.exp())
    };

    let density = pressure / (AIR_GAS_CONSTANT * temperature);
    let viscosity = sutherland_viscosity(temperature);
    let speed_of_sound = (AIR_GAMMA * AIR_GAS_CONSTANT * temperature).sqrt();
    let mach_factor = if speed_of_sound > 0.0 {
        velocity / speed_of_sound
    } else {
        0.0
    };

    Ok(AtmosphericConditions {
        density,
        temperature,
        pressure,
        viscosity,
        mach_factor,
        speed_of_sound,
    })
}

/// Dynamic viscosity of air from Sutherland's law [Pa·s]
pub fn sutherland_viscosity(temperature: f64) -> f64 {
    SUTHERLAND_REF_VISCOSITY
        * (temperature / SUTHERLAND_REF_TEMP).powf(1.5)
        * ((SUTHERLAND_REF_TEMP + SUTHERLAND_CONSTANT) / (temperature + SUTHERLAND_CONSTANT))
}
