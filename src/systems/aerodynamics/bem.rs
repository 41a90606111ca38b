use std::f64::consts::PI;

use crate::components::AeroModel;
use crate::utils::deg_to_rad;

pub const BLADE_ELEMENTS: usize = 10;

// Detailed blade geometry and section model
const ROOT_CHORD_RATIO: f64 = 0.15;
const TIP_CHORD_RATIO: f64 = 0.08;
const ROOT_WASHIN_DEG: f64 = 10.0;
const LIFT_SLOPE: f64 = 6.2;
const STALL_ANGLE_DEG: f64 = 12.0;
const POST_STALL_LOSS: f64 = 0.4;
const REFERENCE_REYNOLDS: f64 = 1.0e5;
const PROFILE_DRAG: f64 = 0.015;
const INDUCED_DRAG_SLOPE: f64 = 0.015;

// Momentum inflow refinement
const MAX_INFLOW_ITERATIONS: usize = 20;
const INFLOW_RELAXATION: f64 = 0.5;
const INFLOW_TOLERANCE: f64 = 1e-4;

// Basic estimator
const BASIC_CHORD_RATIO: f64 = 0.1;
const BASIC_MAX_LIFT: f64 = 1.5;

/// Operating point of a rotor for one blade-element evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BemInput {
    /// Rotor speed [rad/s]
    pub omega: f64,
    /// Blade radius [m]
    pub radius: f64,
    /// Collective pitch at the tip [rad]
    pub blade_pitch: f64,
    pub blade_count: u32,
    /// Disc area [m^2]
    pub disc_area: f64,
    /// Body velocity along the rotor normal [m/s], positive when climbing
    pub axial_velocity: f64,
    /// Body speed [m/s]
    pub forward_speed: f64,
    /// Thrust guess used to seed the momentum inflow [N]
    pub thrust_estimate: f64,
    /// Air density [kg/m^3]
    pub density: f64,
    /// Dynamic viscosity [Pa·s]
    pub viscosity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BemSolution {
    /// Rotor thrust [N]
    pub thrust: f64,
    /// Aerodynamic shaft torque [N·m]
    pub torque: f64,
    /// Momentum-theory induced velocity [m/s]
    pub induced_velocity: f64,
    /// T / (ρ A (ΩR)²)
    pub thrust_coefficient: f64,
    pub iterations: usize,
}

/// Blade-element solver shared by every thrust path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BemSolver {
    pub model: AeroModel,
}

impl BemSolver {
    pub fn new(model: AeroModel) -> Self {
        Self { model }
    }

    pub fn solve(&self, input: &BemInput) -> BemSolution {
        if input.omega <= 0.0
            || input.radius <= 0.0
            || input.disc_area <= 0.0
            || input.density <= 0.0
            || input.blade_count == 0
        {
            return BemSolution::default();
        }

        match self.model {
            AeroModel::Basic => solve_basic(input),
            AeroModel::Detailed => solve_detailed(input),
        }
    }
}

/// Momentum-theory hover induced velocity for a given thrust.
pub fn momentum_induced_velocity(thrust: f64, density: f64, disc_area: f64) -> f64 {
    if density <= 0.0 || disc_area <= 0.0 {
        return 0.0;
    }
    (thrust.max(0.0) / (2.0 * density * disc_area)).sqrt()
}

pub fn thrust_coefficient(thrust: f64, density: f64, disc_area: f64, tip_speed: f64) -> f64 {
    let denominator = density * disc_area * tip_speed * tip_speed;
    if denominator > 0.0 {
        thrust / denominator
    } else {
        0.0
    }
}

/// Prandtl tip-loss factor at radius `r`.
pub fn prandtl_tip_loss(blade_count: u32, radius: f64, r: f64, inflow_angle: f64) -> f64 {
    let sin_phi = inflow_angle.sin().abs();
    if sin_phi < 1e-6 || r <= 0.0 {
        return 1.0;
    }
    let f = blade_count as f64 / 2.0 * (radius - r) / (r * sin_phi);
    (2.0 / PI) * (-f).exp().clamp(0.0, 1.0).acos()
}

/// Section lift coefficient with linear range, post-stall loss and
/// Reynolds scaling.
pub fn lift_coefficient(alpha: f64, reynolds: f64) -> f64 {
    let stall = deg_to_rad(STALL_ANGLE_DEG);
    let base = if alpha.abs() <= stall {
        LIFT_SLOPE * alpha.sin()
    } else {
        let overshoot = ((alpha.abs() - stall) / stall).min(1.0);
        LIFT_SLOPE * stall.sin() * alpha.signum() * (1.0 - POST_STALL_LOSS * overshoot)
    };
    base * reynolds_lift_factor(reynolds)
}

pub fn drag_coefficient(alpha: f64, reynolds: f64) -> f64 {
    let skin_friction = if reynolds > 1.0 {
        0.074 / reynolds.powf(0.2)
    } else {
        0.0
    };
    PROFILE_DRAG + INDUCED_DRAG_SLOPE * alpha.abs() + skin_friction
}

fn reynolds_lift_factor(reynolds: f64) -> f64 {
    if reynolds <= 0.0 {
        return 0.7;
    }
    (reynolds / REFERENCE_REYNOLDS).powf(0.1).clamp(0.7, 1.0)
}

/// Integrate thrust and torque over the detailed blade for a fixed induced
/// velocity.
fn integrate_detailed(input: &BemInput, induced_velocity: f64) -> (f64, f64) {
    let radius = input.radius;
    let dr = radius / BLADE_ELEMENTS as f64;
    let washin = deg_to_rad(ROOT_WASHIN_DEG);
    let axial = induced_velocity + input.axial_velocity;

    let mut thrust = 0.0;
    let mut torque = 0.0;
    for i in 0..BLADE_ELEMENTS {
        let r = (i as f64 + 0.5) * dr;
        let x = r / radius;
        let chord = radius * (ROOT_CHORD_RATIO + (TIP_CHORD_RATIO - ROOT_CHORD_RATIO) * x);
        let twist = input.blade_pitch + washin * (1.0 - x);

        let tangential = input.omega * r;
        let phi = axial.atan2(tangential);
        let alpha = twist - phi;
        let local_speed_sq = tangential * tangential + axial * axial;
        let reynolds = if input.viscosity > 0.0 {
            input.density * local_speed_sq.sqrt() * chord / input.viscosity
        } else {
            0.0
        };

        let tip_loss = prandtl_tip_loss(input.blade_count, radius, r, phi);
        let cl = lift_coefficient(alpha, reynolds) * tip_loss;
        let cd = drag_coefficient(alpha, reynolds) * tip_loss;

        let q = 0.5 * input.density * local_speed_sq;
        let lift = q * chord * cl * dr;
        let drag = q * chord * cd * dr;

        thrust += lift * phi.cos() - drag * phi.sin();
        torque += (lift * phi.sin() + drag * phi.cos()) * r;
    }

    let blades = input.blade_count as f64;
    (thrust * blades, torque * blades)
}

fn solve_detailed(input: &BemInput) -> BemSolution {
    let tip_speed = input.omega * input.radius;
    let tolerance = INFLOW_TOLERANCE * tip_speed;

    let mut induced =
        momentum_induced_velocity(input.thrust_estimate, input.density, input.disc_area);
    let (mut thrust, mut torque) = integrate_detailed(input, induced);
    let mut iterations = 1;

    while iterations < MAX_INFLOW_ITERATIONS {
        let target = momentum_induced_velocity(thrust, input.density, input.disc_area);
        if (target - induced).abs() < tolerance {
            break;
        }
        induced += INFLOW_RELAXATION * (target - induced);
        (thrust, torque) = integrate_detailed(input, induced);
        iterations += 1;
    }

    BemSolution {
        thrust,
        torque,
        induced_velocity: induced,
        thrust_coefficient: thrust_coefficient(thrust, input.density, input.disc_area, tip_speed),
        iterations,
    }
}

fn solve_basic(input: &BemInput) -> BemSolution {
    let radius = input.radius;
    let dr = radius / BLADE_ELEMENTS as f64;
    let chord = BASIC_CHORD_RATIO * radius;
    let inflow = input.forward_speed;

    let mut thrust = 0.0;
    for i in 0..BLADE_ELEMENTS {
        let r = (i as f64 + 0.5) * dr;
        let local_pitch = input.blade_pitch * (1.0 - r / radius);
        let tangential = input.omega * r;
        let speed_sq = tangential * tangential + inflow * inflow;

        let alpha = local_pitch - inflow.atan2(tangential);
        let cl = (2.0 * PI * alpha).clamp(-BASIC_MAX_LIFT, BASIC_MAX_LIFT);
        thrust += 0.5 * input.density * speed_sq * chord * cl * dr;
    }
    thrust *= input.blade_count as f64;

    let induced_velocity = momentum_induced_velocity(thrust, input.density, input.disc_area);
    let tip_speed = input.omega * radius;
    BemSolution {
        thrust,
        torque: thrust.max(0.0) * induced_velocity / input.omega,
        induced_velocity,
        thrust_coefficient: thrust_coefficient(thrust, input.density, input.disc_area, tip_speed),
        iterations: 1,
    }
}
