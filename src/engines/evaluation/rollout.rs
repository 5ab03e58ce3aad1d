use crate::error::{GpError, Result};
use crate::types::Program;
use std::collections::HashMap;

/// Outcome of a single environment step
#[derive(Debug, Clone, PartialEq)]
pub struct Step<O> {
    pub observation: O,
    pub reward: f64,
    pub done: bool,
    pub info: HashMap<String, String>,
}

impl<O> Step<O> {
    pub fn new(observation: O, reward: f64, done: bool) -> Self {
        Self {
            observation,
            reward,
            done,
            info: HashMap::new(),
        }
    }
}

/// Episodic environment driven by a program.
///
/// All three calls are treated as opaque and possibly blocking.
pub trait Environment {
    type Observation;
    type Action;

    fn reset(&mut self) -> anyhow::Result<Self::Observation>;

    fn step(&mut self, action: Self::Action) -> anyhow::Result<Step<Self::Observation>>;

    fn render(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Maps a program and the current observation to an action
pub trait Evaluator<O, A> {
    fn evaluate(&self, program: &Program, observation: &O) -> Result<A>;
}

impl<O, A, F> Evaluator<O, A> for F
where
    F: Fn(&Program, &O) -> Result<A>,
{
    fn evaluate(&self, program: &Program, observation: &O) -> Result<A> {
        self(program, observation)
    }
}

/// Run one episode from reset until the environment signals `done` and
/// return the cumulative reward.
///
/// There is no step ceiling here: an environment that never finishes keeps
/// this loop running. Wrap it in [`TimeLimit`] to bound the episode.
pub fn run_episode<E, V>(
    env: &mut E,
    program: &Program,
    evaluator: &V,
    render: bool,
) -> Result<f64>
where
    E: Environment + ?Sized,
    V: Evaluator<E::Observation, E::Action> + ?Sized,
{
    let mut observation = env.reset().map_err(GpError::Environment)?;
    let mut net_reward = 0.0;
    let mut steps = 0usize;

    loop {
        if render {
            env.render().map_err(GpError::Environment)?;
        }

        let action = evaluator.evaluate(program, &observation)?;
        let step = env.step(action).map_err(GpError::Environment)?;
        net_reward += step.reward;
        steps += 1;
        observation = step.observation;

        if step.done {
            break;
        }
    }

    log::trace!("episode finished after {} steps, reward {:.4}", steps, net_reward);
    Ok(net_reward)
}

/// Mean cumulative reward over `episodes` consecutive episodes
pub fn mean_episode_reward<E, V>(
    env: &mut E,
    program: &Program,
    evaluator: &V,
    episodes: usize,
    render: bool,
) -> Result<f64>
where
    E: Environment + ?Sized,
    V: Evaluator<E::Observation, E::Action> + ?Sized,
{
    if episodes == 0 {
        return Err(GpError::Configuration(
            "At least one episode is required".to_string(),
        ));
    }

    let mut total = 0.0;
    for _ in 0..episodes {
        total += run_episode(env, program, evaluator, render)?;
    }
    Ok(total / episodes as f64)
}

/// Ends every episode after `max_steps` steps by forcing `done`
pub struct TimeLimit<E> {
    inner: E,
    max_steps: usize,
    elapsed: usize,
}

impl<E> TimeLimit<E> {
    pub fn new(inner: E, max_steps: usize) -> Self {
        Self {
            inner,
            max_steps,
            elapsed: 0,
        }
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }

    pub fn into_inner(self) -> E {
        self.inner
    }
}

impl<E: Environment> Environment for TimeLimit<E> {
    type Observation = E::Observation;
    type Action = E::Action;

    fn reset(&mut self) -> anyhow::Result<Self::Observation> {
        self.elapsed = 0;
        self.inner.reset()
    }

    fn step(&mut self, action: Self::Action) -> anyhow::Result<Step<Self::Observation>> {
        let mut step = self.inner.step(action)?;
        self.elapsed += 1;
        if self.elapsed >= self.max_steps && !step.done {
            step.done = true;
            step.info
                .insert("truncated".to_string(), "true".to_string());
        }
        Ok(step)
    }

    fn render(&mut self) -> anyhow::Result<()> {
        self.inner.render()
    }
}
