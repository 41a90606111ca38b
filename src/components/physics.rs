use bevy::prelude::*;
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

/// Force and moment accumulator for a rigid body.
///
/// Rotor systems push forces into the accumulator during a tick; the force
/// calculator reduces them to `net_force`/`net_moment` and the integrator
/// consumes the result.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsComponent {
    /// [kg]
    pub mass: f64,
    /// Body-frame inertia tensor [kg·m^2]
    pub inertia: Matrix3<f64>,
    pub inertia_inv: Matrix3<f64>,
    pub net_force: Vector3<f64>,
    pub net_moment: Vector3<f64>,
    pub forces: Vec<Force>,
    pub moments: Vec<Moment>,
    /// Fraction of linear velocity lost per second
    pub linear_damping: f64,
    /// Fraction of angular velocity lost per second
    pub angular_damping: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Force {
    pub vector: Vector3<f64>,
    /// Body-frame application point; `None` acts through the centre of mass
    pub point: Option<Vector3<f64>>,
    pub frame: ReferenceFrame,
    pub category: ForceCategory,
}

impl Force {
    /// World-frame force through the centre of mass.
    pub fn central(vector: Vector3<f64>, category: ForceCategory) -> Self {
        Self {
            vector,
            point: None,
            frame: ReferenceFrame::Inertial,
            category,
        }
    }

    /// Body-frame force applied at a body-frame offset.
    pub fn body_at(vector: Vector3<f64>, point: Vector3<f64>, category: ForceCategory) -> Self {
        Self {
            vector,
            point: Some(point),
            frame: ReferenceFrame::Body,
            category,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Moment {
    pub vector: Vector3<f64>,
    pub frame: ReferenceFrame,
    pub category: ForceCategory,
}

impl Moment {
    pub fn world(vector: Vector3<f64>, category: ForceCategory) -> Self {
        Self {
            vector,
            frame: ReferenceFrame::Inertial,
            category,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ReferenceFrame {
    Body,
    Inertial,
}

/// Source of an applied load, kept for per-effect breakdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForceCategory {
    /// Rotor thrust and shaft reaction torque
    Propulsive,
    Aerodynamic,
    Turbulence,
    PropWash,
    WallEffect,
}

impl PhysicsComponent {
    /// Body with no pending loads. A singular inertia falls back to identity.
    pub fn new(mass: f64, inertia: Matrix3<f64>) -> Self {
        let inertia_inv = inertia.try_inverse().unwrap_or(Matrix3::identity());
        Self {
            mass,
            inertia,
            inertia_inv,
            net_force: Vector3::zeros(),
            net_moment: Vector3::zeros(),
            forces: Vec::new(),
            moments: Vec::new(),
            linear_damping: 0.0,
            angular_damping: 0.0,
        }
    }

    /// Solid-disc approximation of a rotor body about its spin axis (Y).
    pub fn rotor_disc(mass: f64, radius: f64) -> Self {
        let planar = 0.25 * mass * radius * radius;
        let axial = 0.5 * mass * radius * radius;
        Self::new(mass, Matrix3::from_diagonal(&Vector3::new(planar, axial, planar)))
    }

    pub fn add_force(&mut self, force: Force) {
        self.forces.push(force);
    }

    pub fn add_moment(&mut self, moment: Moment) {
        self.moments.push(moment);
    }

    /// Drop every pending load once the integrator has consumed it.
    pub fn clear_forces(&mut self) {
        self.forces.clear();
        self.moments.clear();
        self.net_force = Vector3::zeros();
        self.net_moment = Vector3::zeros();
    }

    /// Sum of all pending forces of one category, in the frame they were added.
    pub fn total_force(&self, category: ForceCategory) -> Vector3<f64> {
        self.forces
            .iter()
            .filter(|force| force.category == category)
            .fold(Vector3::zeros(), |acc, force| acc + force.vector)
    }

    pub fn total_moment(&self, category: ForceCategory) -> Vector3<f64> {
        self.moments
            .iter()
            .filter(|moment| moment.category == category)
            .fold(Vector3::zeros(), |acc, moment| acc + moment.vector)
    }
}
