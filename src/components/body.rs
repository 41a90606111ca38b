use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// The closed set of physical parts a multirotor is assembled from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BodyKind {
    Fuselage,
    Rotor,
    Wing {
        area: f64,
        span: f64,
        lift_coefficient: f64,
        drag_coefficient: f64,
    },
    Battery {
        /// Capacity [Ah]
        capacity: f64,
        /// Nominal voltage [V]
        voltage: f64,
        /// Fraction of charge lost per hour at rest
        self_discharge_rate: f64,
        /// Internal resistance [Ω]
        internal_resistance: f64,
        c_rating: f64,
    },
}

impl BodyKind {
    pub fn produces_thrust(&self) -> bool {
        matches!(self, BodyKind::Rotor)
    }

    /// Maximum continuous discharge current [A] for battery parts.
    pub fn max_discharge_current(&self) -> Option<f64> {
        match self {
            BodyKind::Battery {
                capacity, c_rating, ..
            } => Some(capacity * c_rating),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BodyKind::Fuselage => "fuselage",
            BodyKind::Rotor => "rotor",
            BodyKind::Wing { .. } => "wing",
            BodyKind::Battery { .. } => "battery",
        }
    }
}

#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct BodyComponent {
    pub mass: f64,
    pub kind: BodyKind,
}

impl BodyComponent {
    pub fn new(mass: f64, kind: BodyKind) -> Self {
        Self { mass, kind }
    }
}
