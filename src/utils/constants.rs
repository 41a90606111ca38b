use std::f64::consts::PI;

// Earth and air
pub const GRAVITY: f64 = 9.80665; // m/s^2
pub const AIR_GAS_CONSTANT: f64 = 287.05287; // J/(kg·K)
pub const AIR_GAMMA: f64 = 1.4;

// International Standard Atmosphere
pub const ISA_SEA_LEVEL_TEMP: f64 = 288.15; // K
pub const ISA_SEA_LEVEL_PRESSURE: f64 = 101325.0; // Pa
pub const ISA_SEA_LEVEL_DENSITY: f64 = 1.225; // kg/m^3
pub const ISA_LAPSE_RATE: f64 = -0.0065; // K/m
pub const ISA_TROPOPAUSE_ALTITUDE: f64 = 11000.0; // m
pub const ISA_TROPOPAUSE_TEMP: f64 = 216.65; // K
pub const ISA_MAX_ALTITUDE: f64 = 86000.0; // m

// Sutherland's law
pub const SUTHERLAND_REF_TEMP: f64 = 273.15; // K
pub const SUTHERLAND_CONSTANT: f64 = 110.4; // K
pub const SUTHERLAND_REF_VISCOSITY: f64 = 1.716e-5; // Pa·s

// Rotor limits
pub const MAX_RPM: f64 = 15000.0;
pub const RPM_TO_RAD: f64 = PI / 30.0;
