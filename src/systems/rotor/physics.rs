use nalgebra::Vector3;

use crate::components::{
    ForceCategory, GroundEffectState, InflowState, PropWashField, RotorComponent,
    TurbulenceState, VortexState, WallState,
};
use crate::physics::{BodyKinematics, CollisionWorld, RigidBodyHandle};
use crate::resources::RotorPhysicsConfig;
use crate::systems::aerodynamics::{
    calculate_blade_state, calculate_ground_effect, calculate_inflow, calculate_prop_wash,
    calculate_prop_wash_influence, calculate_tip_vortex, calculate_wall_effect, thrust_coefficient,
    BemInput, BemSolver, FlappingInputs, GroundEffectParams, InflowInputs, PropWashSource,
    VortexFlow, VortexParameters, WallParameters,
};
use crate::systems::environment::{
    calculate_atmospheric_conditions, calculate_turbulence, AtmosphericConditions,
};
use crate::systems::propulsion::{calculate_idle_motor_state, calculate_motor_state};
use crate::utils::RotorError;

/// Profile drag coefficient of the blade sections.
const PROFILE_DRAG_COEFFICIENT: f64 = 0.012;
/// Equivalent flat-plate drag coefficient of the rotor hub.
const PARASITE_DRAG_COEFFICIENT: f64 = 0.002;
const VORTEX_CHORD_RATIO: f64 = 0.1;
const WASH_FORCE_FACTOR: f64 = 0.5;
const WASH_TORQUE_FACTOR: f64 = 0.3;

/// Rotor thrust at the current operating point, ground effect included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrustSolution {
    /// Thrust along the rotor normal [N]
    pub thrust: f64,
    /// Aerodynamic shaft torque [N·m]
    pub torque: f64,
    pub thrust_coefficient: f64,
    /// Momentum-theory induced velocity [m/s]
    pub induced_velocity: f64,
    pub ground_effect: GroundEffectState,
}

impl Default for ThrustSolution {
    fn default() -> Self {
        Self {
            thrust: 0.0,
            torque: 0.0,
            thrust_coefficient: 0.0,
            induced_velocity: 0.0,
            ground_effect: GroundEffectState::default(),
        }
    }
}

/// Per-tick context shared by every rotor.
pub struct RotorTickInputs<'a> {
    /// Tick length [s]
    pub dt: f64,
    pub config: &'a RotorPhysicsConfig,
    pub collision_world: Option<&'a dyn CollisionWorld>,
    /// Start-of-tick snapshots of every other rotor
    pub wash_sources: &'a [PropWashSource],
}

/// What one rotor applied to its body during a tick, world frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotorTickReport {
    pub thrust_force: Vector3<f64>,
    pub reaction_torque: Vector3<f64>,
    pub wall_force: Vector3<f64>,
    pub wall_moment: Vector3<f64>,
    pub turbulence_force: Vector3<f64>,
    pub turbulence_torque: Vector3<f64>,
    pub wash_force: Vector3<f64>,
    pub wash_torque: Vector3<f64>,
}

impl RotorTickReport {
    pub fn total_force(&self) -> Vector3<f64> {
        self.thrust_force + self.wall_force + self.turbulence_force + self.wash_force
    }

    pub fn total_torque(&self) -> Vector3<f64> {
        self.reaction_torque + self.wall_moment + self.turbulence_torque + self.wash_torque
    }
}

/// Rotor normal in the world frame.
pub fn world_normal(rotor: &RotorComponent, kinematics: &BodyKinematics) -> Vector3<f64> {
    kinematics.to_world(&rotor.config.unit_normal())
}

/// Solve the blade elements with the rotor's aero model and apply ground
/// effect at the body's height.
pub fn calculate_thrust(
    rotor: &RotorComponent,
    kinematics: &BodyKinematics,
    conditions: &AtmosphericConditions,
) -> ThrustSolution {
    let omega = rotor.omega();
    if omega <= 0.0 {
        return ThrustSolution::default();
    }

    let config = &rotor.config;
    let normal = world_normal(rotor, kinematics);
    let input = BemInput {
        omega,
        radius: config.blade_radius,
        blade_pitch: config.blade_pitch,
        blade_count: config.blade_count,
        disc_area: config.disc_area,
        axial_velocity: kinematics.linear_velocity.dot(&normal),
        forward_speed: kinematics.speed(),
        thrust_estimate: rotor.state.thrust,
        density: conditions.density,
        viscosity: conditions.viscosity,
    };
    let solution = BemSolver::new(config.aero_model).solve(&input);

    let ground_effect = calculate_ground_effect(
        &GroundEffectParams {
            rotor_radius: config.blade_radius,
            thrust_coefficient: solution.thrust_coefficient,
            collective_pitch: config.blade_pitch,
            velocity: kinematics.linear_velocity,
        },
        kinematics.altitude(),
    );
    let thrust = solution.thrust * ground_effect.thrust_multiplier;

    ThrustSolution {
        thrust,
        torque: solution.torque,
        thrust_coefficient: thrust_coefficient(
            thrust,
            conditions.density,
            config.disc_area,
            omega * config.blade_radius,
        ),
        induced_velocity: solution.induced_velocity,
        ground_effect,
    }
}

/// Induced plus profile plus parasite power [W].
pub fn calculate_power(
    rotor: &RotorComponent,
    solution: &ThrustSolution,
    conditions: &AtmosphericConditions,
    speed: f64,
) -> f64 {
    let omega = rotor.omega();
    if omega <= 0.0 {
        return 0.0;
    }

    let rho = conditions.density;
    let tip_speed = omega * rotor.config.blade_radius;
    let induced = solution.thrust * solution.induced_velocity
        * solution.ground_effect.induced_power_ratio;
    let profile = rho * rotor.config.disc_area * PROFILE_DRAG_COEFFICIENT * tip_speed.powi(3) / 8.0;
    let parasite = 0.5 * rho * speed.powi(3) * PARASITE_DRAG_COEFFICIENT;

    induced + profile + parasite
}

pub fn update_blade_state(
    rotor: &mut RotorComponent,
    conditions: &AtmosphericConditions,
    speed: f64,
    dt: f64,
) {
    let inputs = FlappingInputs {
        rotor_speed: rotor.omega(),
        forward_velocity: speed,
        air_density: conditions.density,
        speed_of_sound: conditions.speed_of_sound,
        collective_pitch: rotor.config.blade_pitch,
        cyclic_pitch: rotor.config.cyclic_pitch,
        shaft_tilt: rotor.config.shaft_tilt,
    };
    rotor.state.blade = calculate_blade_state(&rotor.blade, &rotor.state.blade, &inputs, dt);
}

/// Advance the tip vortices and sample them one radius below the hub.
pub fn update_vortex_state(
    rotor: &mut RotorComponent,
    kinematics: &BodyKinematics,
    conditions: &AtmosphericConditions,
    dt: f64,
) {
    let radius = rotor.config.blade_radius;
    let params = VortexParameters {
        blade_count: rotor.config.blade_count,
        blade_span: radius,
        blade_chord: VORTEX_CHORD_RATIO * radius,
        effective_aoa: rotor.config.blade_pitch,
    };
    let flow = VortexFlow {
        rotor_speed: rotor.omega(),
        forward_velocity: kinematics.speed(),
        kinematic_viscosity: conditions.kinematic_viscosity(),
    };
    let evaluation_point = kinematics.position - Vector3::new(0.0, radius, 0.0);

    rotor.state.vortex = calculate_tip_vortex(
        &params,
        std::mem::take(&mut rotor.state.vortex),
        &flow,
        &kinematics.position,
        &evaluation_point,
        dt,
    );
}

/// Drive the motor with the aerodynamic load `power / Ω`.
pub fn update_motor_state(rotor: &mut RotorComponent, conditions: &AtmosphericConditions, dt: f64) {
    let omega = rotor.omega();
    rotor.state.motor = if omega > 0.0 {
        calculate_motor_state(
            &rotor.motor,
            &rotor.state.motor,
            rotor.rpm(),
            rotor.state.power / omega,
            conditions.temperature,
            dt,
        )
    } else {
        calculate_idle_motor_state(&rotor.motor, &rotor.state.motor, conditions.temperature, dt)
    };
}

pub fn update_inflow_state(
    rotor: &mut RotorComponent,
    kinematics: &BodyKinematics,
    conditions: &AtmosphericConditions,
    dt: f64,
) {
    let inputs = InflowInputs {
        thrust_coefficient: rotor.state.thrust_coefficient,
        disk_loading: rotor.state.thrust / rotor.config.disc_area,
        forward_velocity: kinematics.speed(),
        rotor_radius: rotor.config.blade_radius,
        rotor_speed: rotor.omega(),
        air_density: conditions.density,
        rotor_normal: world_normal(rotor, kinematics),
        collective_pitch: rotor.config.blade_pitch,
    };
    rotor.state.inflow = calculate_inflow(&inputs, &rotor.state.inflow, dt);
}

/// Ray-cast along the body's forward axis and apply the wall's image-rotor
/// force and moment. Returns the applied (force, moment).
pub fn apply_wall_effects(
    rotor: &mut RotorComponent,
    body: &mut dyn RigidBodyHandle,
    world: Option<&dyn CollisionWorld>,
    kinematics: &BodyKinematics,
    detection_range: f64,
) -> (Vector3<f64>, Vector3<f64>) {
    rotor.state.wall = WallState::default();

    let Some(world) = world else {
        return (Vector3::zeros(), Vector3::zeros());
    };

    let length = detection_range * rotor.config.blade_radius;
    let from = kinematics.position;
    let to = from + kinematics.to_world(&Vector3::x()) * length;
    let Some(hit) = world.ray_cast(&from, &to) else {
        return (Vector3::zeros(), Vector3::zeros());
    };

    let params = WallParameters {
        wall_distance: hit.fraction * length,
        wall_normal: hit.normal,
        rotor_radius: rotor.config.blade_radius,
        thrust: rotor.state.thrust,
        thrust_coefficient: rotor.state.thrust_coefficient,
        collective_pitch: rotor.config.blade_pitch,
    };
    let wall = calculate_wall_effect(&params, &kinematics.position, &kinematics.linear_velocity);

    body.apply_tagged_force(wall.induced_force, ForceCategory::WallEffect);
    body.apply_tagged_torque(wall.induced_moment, ForceCategory::WallEffect);
    rotor.state.wall = wall;
    (wall.induced_force, wall.induced_moment)
}

/// Apply the gust at the rotor's elapsed time. Returns (force, torque).
pub fn apply_turbulence(
    rotor: &mut RotorComponent,
    body: &mut dyn RigidBodyHandle,
    kinematics: &BodyKinematics,
    conditions: &AtmosphericConditions,
) -> (Vector3<f64>, Vector3<f64>) {
    let turbulence = calculate_turbulence(
        kinematics.altitude(),
        kinematics.speed(),
        conditions,
        rotor.state.elapsed_time,
    );

    let mass = rotor.config.mass;
    let force = turbulence.velocity * mass;
    let torque = turbulence.angular_velocity * mass * rotor.config.blade_radius;
    body.apply_tagged_force(force, ForceCategory::Turbulence);
    body.apply_tagged_torque(torque, ForceCategory::Turbulence);

    rotor.state.turbulence = turbulence;
    (force, torque)
}

/// Accumulate the wash of the other rotors at this rotor's hub.
pub fn apply_prop_wash(
    rotor: &mut RotorComponent,
    body: &mut dyn RigidBodyHandle,
    kinematics: &BodyKinematics,
    conditions: &AtmosphericConditions,
    sources: &[PropWashSource],
) -> (Vector3<f64>, Vector3<f64>) {
    let mass = rotor.config.mass;
    let radius = rotor.config.blade_radius;

    let (force, torque) = sources.iter().fold(
        (Vector3::zeros(), Vector3::zeros()),
        |(force, torque), source| {
            let field = calculate_prop_wash(source, conditions.density);
            let influence = calculate_prop_wash_influence(&field, &kinematics.position);
            (
                force + field.velocity * influence * mass * WASH_FORCE_FACTOR,
                torque + field.vorticity * influence * mass * radius * WASH_TORQUE_FACTOR,
            )
        },
    );

    if force.norm_squared() > 0.0 || torque.norm_squared() > 0.0 {
        body.apply_tagged_force(force, ForceCategory::PropWash);
        body.apply_tagged_torque(torque, ForceCategory::PropWash);
    }

    rotor.state.wash_force = force;
    rotor.state.wash_torque = torque;
    (force, torque)
}

/// Wash source of `rotor` for a given thrust.
pub fn prop_wash_source(
    rotor: &RotorComponent,
    kinematics: &BodyKinematics,
    thrust: f64,
) -> PropWashSource {
    PropWashSource {
        position: kinematics.position,
        normal: world_normal(rotor, kinematics),
        rotor_speed: rotor.omega(),
        radius: rotor.config.blade_radius,
        disc_area: rotor.config.disc_area,
        blade_count: rotor.config.blade_count,
        thrust,
    }
}

/// Snapshot a rotor for the cross-rotor pass, with its thrust recomputed at
/// the current pose.
pub fn snapshot_prop_wash_source(
    rotor: &RotorComponent,
    kinematics: &BodyKinematics,
) -> Result<PropWashSource, RotorError> {
    let conditions = calculate_atmospheric_conditions(kinematics.altitude(), kinematics.speed())?;
    let thrust = calculate_thrust(rotor, kinematics, &conditions).thrust;
    Ok(prop_wash_source(rotor, kinematics, thrust))
}

/// Run every sub-model for one rotor and apply the result to its body.
///
/// # Errors
/// Fails only when the body's altitude is outside the standard atmosphere;
/// nothing is applied to the body in that case.
pub fn update_rotor(
    rotor: &mut RotorComponent,
    body: &mut dyn RigidBodyHandle,
    inputs: &RotorTickInputs,
) -> Result<RotorTickReport, RotorError> {
    let kinematics = body.kinematics();
    let conditions = calculate_atmospheric_conditions(kinematics.altitude(), kinematics.speed())?;
    let config = inputs.config;
    let dt = inputs.dt;

    rotor.state.elapsed_time += dt;
    rotor.state.ticks += 1;

    let solution = calculate_thrust(rotor, &kinematics, &conditions);
    rotor.state.thrust = solution.thrust;
    rotor.state.torque = solution.torque;
    rotor.state.thrust_coefficient = solution.thrust_coefficient;
    rotor.state.induced_velocity = solution.induced_velocity;
    rotor.state.ground_effect = solution.ground_effect;
    rotor.state.power = calculate_power(rotor, &solution, &conditions, kinematics.speed());

    update_blade_state(rotor, &conditions, kinematics.speed(), dt);
    update_vortex_state(rotor, &kinematics, &conditions, dt);
    update_motor_state(rotor, &conditions, dt);

    let mut report = RotorTickReport::default();

    if !rotor.is_spinning() {
        rotor.state.inflow = InflowState::default();
        rotor.state.vortex = VortexState::default();
        rotor.state.wall = WallState::default();
        rotor.state.turbulence = TurbulenceState::default();
        rotor.state.prop_wash = PropWashField::default();
        rotor.state.wash_force = Vector3::zeros();
        rotor.state.wash_torque = Vector3::zeros();
        body.set_damping(config.linear_damping, config.angular_damping);
        return Ok(report);
    }

    if config.enable_dynamic_inflow {
        update_inflow_state(rotor, &kinematics, &conditions, dt);
    }

    if config.enable_wall_effect {
        (report.wall_force, report.wall_moment) = apply_wall_effects(
            rotor,
            body,
            inputs.collision_world,
            &kinematics,
            config.wall_detection_range,
        );
    } else {
        rotor.state.wall = WallState::default();
    }

    if config.enable_turbulence {
        (report.turbulence_force, report.turbulence_torque) =
            apply_turbulence(rotor, body, &kinematics, &conditions);
    } else {
        rotor.state.turbulence = TurbulenceState::default();
    }

    rotor.state.prop_wash = calculate_prop_wash(
        &prop_wash_source(rotor, &kinematics, solution.thrust),
        conditions.density,
    );
    if config.enable_prop_wash {
        (report.wash_force, report.wash_torque) =
            apply_prop_wash(rotor, body, &kinematics, &conditions, inputs.wash_sources);
    } else {
        rotor.state.wash_force = Vector3::zeros();
        rotor.state.wash_torque = Vector3::zeros();
    }

    let normal = world_normal(rotor, &kinematics);
    report.thrust_force = normal * solution.thrust;
    report.reaction_torque = -normal * (rotor.config.spin.sign() * solution.torque);
    body.apply_tagged_force(report.thrust_force, ForceCategory::Propulsive);
    body.apply_tagged_torque(report.reaction_torque, ForceCategory::Propulsive);
    body.set_damping(config.linear_damping, config.angular_damping);

    Ok(report)
}
