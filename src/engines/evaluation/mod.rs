pub mod rollout;
pub mod interpreter;

pub use rollout::{mean_episode_reward, run_episode, Environment, Evaluator, Step, TimeLimit};
pub use interpreter::{Interpreter, TerminalBinding};
