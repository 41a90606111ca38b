mod motor;

pub use motor::{
    back_emf, calculate_idle_motor_state, calculate_motor_state, compensated_resistance,
    torque_constant,
};
