use nalgebra::{UnitQuaternion, Vector3};
use std::f64::consts::{PI, TAU};

use crate::components::{BladeProperties, BladeState};
use crate::utils::GRAVITY;

const AERO_STATIONS: usize = 10;
const CHORD_RATIO: f64 = 0.1;
const MAX_SECTION_ALPHA: f64 = 0.3; // rad
const MIN_COMPRESSIBILITY: f64 = 0.5;
/// Largest eigenvalue × step accepted by the sub-stepped RK4.
const STABILITY_LIMIT: f64 = 0.5;
const MAX_SUBSTEPS: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlappingInputs {
    /// Rotor speed Ω [rad/s]
    pub rotor_speed: f64,
    /// Airspeed [m/s]
    pub forward_velocity: f64,
    /// Air density [kg/m^3]
    pub air_density: f64,
    /// Speed of sound [m/s]
    pub speed_of_sound: f64,
    /// Collective pitch [rad]
    pub collective_pitch: f64,
    /// Cyclic pitch amplitude [rad]
    pub cyclic_pitch: f64,
    /// Shaft tilt [rad]
    pub shaft_tilt: f64,
}

/// Advance the blade flapping state by one tick.
///
/// The flap equation
/// `β̈ = −ω_n²(β − β0) − (γΩ/8)·β̇ + M_aero/(m·e²)`
/// is integrated with classic RK4, sub-stepped so the stiffest mode stays
/// inside the stability region, while the azimuth advances at Ω.
///
/// # Arguments
/// - `props`: static blade properties
/// - `previous`: state from the previous tick
/// - `inputs`: rotor operating point
/// - `dt`: tick length [s]
pub fn calculate_blade_state(
    props: &BladeProperties,
    previous: &BladeState,
    inputs: &FlappingInputs,
    dt: f64,
) -> BladeState {
    let omega = inputs.rotor_speed;
    if omega <= 0.0 || dt <= 0.0 {
        return BladeState {
            azimuth: previous.azimuth,
            ..Default::default()
        };
    }

    let coning = coning_angle(props, inputs.collective_pitch, omega);
    let steps = substeps(props, inputs, previous, dt);
    let h = dt / steps as f64;

    let mut beta = previous.flapping_angle;
    let mut rate = previous.flapping_rate;
    let mut azimuth = previous.azimuth;

    for _ in 0..steps {
        let half_azimuth = azimuth + 0.5 * omega * h;
        let k1 = flap_derivatives(props, inputs, coning, azimuth, beta, rate);
        let k2 = flap_derivatives(
            props,
            inputs,
            coning,
            half_azimuth,
            beta + 0.5 * h * k1.0,
            rate + 0.5 * h * k1.1,
        );
        let k3 = flap_derivatives(
            props,
            inputs,
            coning,
            half_azimuth,
            beta + 0.5 * h * k2.0,
            rate + 0.5 * h * k2.1,
        );
        let k4 = flap_derivatives(
            props,
            inputs,
            coning,
            azimuth + omega * h,
            beta + h * k3.0,
            rate + h * k3.1,
        );

        beta += h / 6.0 * (k1.0 + 2.0 * k2.0 + 2.0 * k3.0 + k4.0);
        rate += h / 6.0 * (k1.1 + 2.0 * k2.1 + 2.0 * k3.1 + k4.1);
        azimuth = (azimuth + omega * h).rem_euclid(TAU);
    }

    let radius = props.tip_radius();
    let disk_loading = if radius > 0.0 {
        props.mass * GRAVITY / (PI * radius * radius)
    } else {
        0.0
    };

    BladeState {
        coning_angle: coning,
        flapping_angle: beta,
        flapping_rate: rate,
        lead_lag_angle: -2.0 * beta * rate / omega,
        azimuth,
        tip_path_plane: tip_path_plane(inputs.shaft_tilt, beta),
        disk_loading,
    }
}

/// Steady coning from the balance of aerodynamic and centrifugal moments.
pub fn coning_angle(props: &BladeProperties, collective_pitch: f64, omega: f64) -> f64 {
    (props.lock_number * collective_pitch / 6.0)
        .atan2(props.mass * omega * omega * props.hinge_offset)
}

/// Unit normal of the tip-path plane: the up axis rotated by the shaft tilt
/// and then by the flapping angle, both about the lateral axis.
pub fn tip_path_plane(shaft_tilt: f64, flapping_angle: f64) -> Vector3<f64> {
    let shaft = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), shaft_tilt);
    let flap = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), flapping_angle);
    (shaft * flap) * Vector3::y()
}

/// Aerodynamic flap moment about the hinge from a strip over the blade grip.
pub fn aerodynamic_moment(
    props: &BladeProperties,
    inputs: &FlappingInputs,
    azimuth: f64,
    flapping_angle: f64,
) -> f64 {
    let chord = CHORD_RATIO * props.tip_radius();
    let dr = props.blade_grip / AERO_STATIONS as f64;
    let pitch = inputs.collective_pitch + inputs.cyclic_pitch * azimuth.sin();
    let perpendicular = inputs.forward_velocity * flapping_angle.sin();

    let mut moment = 0.0;
    for i in 0..AERO_STATIONS {
        let arm = (i as f64 + 0.5) * dr;
        let tangential = inputs.rotor_speed * (props.hinge_offset + arm);
        let alpha = (pitch - perpendicular.atan2(tangential))
            .clamp(-MAX_SECTION_ALPHA, MAX_SECTION_ALPHA);
        let speed_sq = tangential * tangential + perpendicular * perpendicular;

        let mach = if inputs.speed_of_sound > 0.0 {
            speed_sq.sqrt() / inputs.speed_of_sound
        } else {
            0.0
        };
        let lift_slope = TAU / (1.0 - mach * mach).max(MIN_COMPRESSIBILITY).sqrt();

        moment += 0.5 * inputs.air_density * speed_sq * chord * lift_slope * alpha * dr * arm;
    }
    moment
}

/// Returns (β̇, β̈).
fn flap_derivatives(
    props: &BladeProperties,
    inputs: &FlappingInputs,
    coning: f64,
    azimuth: f64,
    beta: f64,
    rate: f64,
) -> (f64, f64) {
    let hinge_inertia = props.mass * props.hinge_offset * props.hinge_offset;
    let forcing = if hinge_inertia > 0.0 {
        aerodynamic_moment(props, inputs, azimuth, beta) / hinge_inertia
    } else {
        0.0
    };

    let stiffness = props.natural_frequency * props.natural_frequency;
    let damping = props.lock_number * inputs.rotor_speed / 8.0;
    (rate, -stiffness * (beta - coning) - damping * rate + forcing)
}

fn substeps(
    props: &BladeProperties,
    inputs: &FlappingInputs,
    previous: &BladeState,
    dt: f64,
) -> usize {
    let hinge_inertia = props.mass * props.hinge_offset * props.hinge_offset;
    let aero_stiffness = if hinge_inertia > 0.0 {
        let delta = 1e-4;
        let beta = previous.flapping_angle;
        let m0 = aerodynamic_moment(props, inputs, previous.azimuth, beta);
        let m1 = aerodynamic_moment(props, inputs, previous.azimuth, beta + delta);
        ((m1 - m0) / delta / hinge_inertia).abs()
    } else {
        0.0
    };

    let fastest = props
        .natural_frequency
        .max(props.lock_number * inputs.rotor_speed / 8.0)
        .max(inputs.rotor_speed)
        .max(aero_stiffness.sqrt());

    ((dt * fastest / STABILITY_LIMIT).ceil() as usize).clamp(1, MAX_SUBSTEPS)
}
