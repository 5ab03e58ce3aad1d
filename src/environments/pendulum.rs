use crate::engines::evaluation::interpreter::Interpreter;
use crate::engines::evaluation::rollout::{Environment, Step};
use crate::error::Result;
use crate::functions::catalog::{Catalog, FunctionSpec, TerminalSpec};
use crate::functions::registry::PrimitiveRegistry;
use crate::types::TypeToken;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::sync::Arc;

const GRAVITY: f64 = 10.0;
const MASS: f64 = 1.0;
const LENGTH: f64 = 1.0;
const DT: f64 = 0.05;
const MAX_TORQUE: f64 = 2.0;
const MAX_SPEED: f64 = 8.0;

/// Number of components in a pendulum observation
pub const OBSERVATION_SIZE: usize = 3;

/// Torque-controlled inverted pendulum.
///
/// Observation is `[cos θ, sin θ, θ̇]`, the action is a torque clipped to
/// `±2`. The episode never ends by itself; bound it with `TimeLimit`.
pub struct Pendulum {
    theta: f64,
    theta_dot: f64,
    rng: StdRng,
}

impl Pendulum {
    pub fn new(seed: u64) -> Self {
        Self {
            theta: 0.0,
            theta_dot: 0.0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn state(&self) -> (f64, f64) {
        (self.theta, self.theta_dot)
    }

    fn observation(&self) -> Vec<f64> {
        vec![self.theta.cos(), self.theta.sin(), self.theta_dot]
    }
}

/// Typed symbol set for pendulum controllers.
///
/// Readings and arithmetic live in `obs`; programs return an `action`
/// torque, chosen through `iflte` between fixed pushes.
pub fn pendulum_catalog(registry: &PrimitiveRegistry) -> Result<Catalog> {
    let obs = TypeToken::from("obs");
    let action = TypeToken::from("action");

    let mut terminals = BTreeMap::new();
    for name in ["cos_theta", "sin_theta", "theta_dot", "zero", "one"] {
        terminals.insert(name.to_string(), TerminalSpec::new(obs.clone()));
    }
    for name in ["push_left", "hold", "push_right"] {
        terminals.insert(name.to_string(), TerminalSpec::new(action.clone()));
    }

    let mut functions = BTreeMap::new();
    functions.insert(
        "iflte".to_string(),
        FunctionSpec::new(
            action.clone(),
            vec![obs.clone(), obs.clone(), action.clone(), action],
        ),
    );
    for name in ["add", "sub", "mul", "div", "neg"] {
        if let Some(spec) = registry.homogeneous_spec(name, &obs) {
            functions.insert(name.to_string(), spec);
        }
    }

    Catalog::new(terminals, functions)
}

/// Evaluator binding every terminal of [`pendulum_catalog`]
pub fn pendulum_interpreter(registry: Arc<PrimitiveRegistry>) -> Interpreter {
    Interpreter::new(registry)
        .bind_observation("cos_theta", 0)
        .bind_observation("sin_theta", 1)
        .bind_observation("theta_dot", 2)
        .bind_constant("zero", 0.0)
        .bind_constant("one", 1.0)
        .bind_constant("push_left", -MAX_TORQUE)
        .bind_constant("hold", 0.0)
        .bind_constant("push_right", MAX_TORQUE)
}

/// Torque actually applied for a program output. NaN, which arithmetic
/// over unchecked catalogs can produce, counts as no push.
pub fn finite_torque(torque: f64) -> f64 {
    if torque.is_nan() {
        0.0
    } else {
        torque
    }
}

fn angle_normalize(x: f64) -> f64 {
    (x + PI).rem_euclid(2.0 * PI) - PI
}

impl Environment for Pendulum {
    type Observation = Vec<f64>;
    type Action = f64;

    fn reset(&mut self) -> anyhow::Result<Vec<f64>> {
        self.theta = self.rng.gen_range(-PI..PI);
        self.theta_dot = self.rng.gen_range(-1.0..1.0);
        Ok(self.observation())
    }

    fn step(&mut self, action: f64) -> anyhow::Result<Step<Vec<f64>>> {
        if action.is_nan() {
            anyhow::bail!("torque is NaN");
        }
        let u = action.clamp(-MAX_TORQUE, MAX_TORQUE);
        let cost = angle_normalize(self.theta).powi(2)
            + 0.1 * self.theta_dot.powi(2)
            + 0.001 * u.powi(2);

        let accel = -3.0 * GRAVITY / (2.0 * LENGTH) * (self.theta + PI).sin()
            + 3.0 / (MASS * LENGTH.powi(2)) * u;
        let new_theta_dot = self.theta_dot + accel * DT;
        self.theta += new_theta_dot * DT;
        self.theta_dot = new_theta_dot.clamp(-MAX_SPEED, MAX_SPEED);

        Ok(Step::new(self.observation(), -cost, false))
    }

    fn render(&mut self) -> anyhow::Result<()> {
        log::info!(
            "pendulum θ={:+.3} θ̇={:+.3}",
            angle_normalize(self.theta),
            self.theta_dot
        );
        Ok(())
    }
}
