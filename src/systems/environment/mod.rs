mod atmosphere;
mod turbulence;

pub use atmosphere::{calculate_atmospheric_conditions, sutherland_viscosity, AtmosphericConditions};
pub use turbulence::{calculate_turbulence, pseudo_random, stability_parameter, wind_shear_factor};
