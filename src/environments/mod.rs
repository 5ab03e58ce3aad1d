pub mod pendulum;

pub use pendulum::{finite_torque, pendulum_catalog, pendulum_interpreter, Pendulum, OBSERVATION_SIZE};
