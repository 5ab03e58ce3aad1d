use super::rollout::Evaluator;
use crate::{
    error::{GpError, Result},
    functions::{catalog::Catalog, registry::PrimitiveRegistry},
    types::Program,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// What a terminal evaluates to.
///
/// In a config file: `x = { observation = 0 }` or `one = { constant = 1.0 }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerminalBinding {
    /// Component `i` of the current observation
    Observation(usize),
    Constant(f64),
}

/// Tree-walking evaluator for numeric programs over `Vec<f64>` observations
pub struct Interpreter {
    registry: Arc<PrimitiveRegistry>,
    bindings: HashMap<String, TerminalBinding>,
}

impl Interpreter {
    pub fn new(registry: Arc<PrimitiveRegistry>) -> Self {
        Self {
            registry,
            bindings: HashMap::new(),
        }
    }

    pub fn bind_observation(mut self, name: impl Into<String>, index: usize) -> Self {
        self.bindings
            .insert(name.into(), TerminalBinding::Observation(index));
        self
    }

    pub fn bind_constant(mut self, name: impl Into<String>, value: f64) -> Self {
        self.bindings
            .insert(name.into(), TerminalBinding::Constant(value));
        self
    }

    /// Add or replace bindings, e.g. from the `[bindings]` config table
    pub fn with_bindings<I>(mut self, bindings: I) -> Self
    where
        I: IntoIterator<Item = (String, TerminalBinding)>,
    {
        self.bindings.extend(bindings);
        self
    }

    /// Startup check that every catalog symbol can be evaluated against
    /// observations of `observation_len` components: each terminal is bound
    /// to a constant or an in-range component, and each function is a
    /// registered primitive of the declared arity.
    pub fn check_catalog(&self, catalog: &Catalog, observation_len: usize) -> Result<()> {
        for name in catalog.terminals().keys() {
            match self.bindings.get(name) {
                None => {
                    return Err(GpError::Configuration(format!(
                        "Terminal '{}' has no binding",
                        name
                    )))
                }
                Some(TerminalBinding::Observation(i)) if *i >= observation_len => {
                    return Err(GpError::Configuration(format!(
                        "Terminal '{}' reads observation[{}] but observations have {} components",
                        name, i, observation_len
                    )))
                }
                Some(_) => {}
            }
        }

        for (name, spec) in catalog.functions() {
            let primitive = self.registry.get_primitive(name).ok_or_else(|| {
                GpError::Configuration(format!("Function '{}' is not a known primitive", name))
            })?;
            if primitive.arity() != spec.arity {
                return Err(GpError::Configuration(format!(
                    "Function '{}' declares arity {} but the primitive takes {}",
                    name,
                    spec.arity,
                    primitive.arity()
                )));
            }
        }

        Ok(())
    }

    pub fn eval(&self, program: &Program, observation: &[f64]) -> Result<f64> {
        match program {
            Program::Atom(name) => self.eval_terminal(name, observation),
            Program::Call { function, args } => self.eval_call(function, args, observation),
        }
    }

    fn eval_terminal(&self, name: &str, observation: &[f64]) -> Result<f64> {
        match self.bindings.get(name) {
            Some(TerminalBinding::Constant(value)) => Ok(*value),
            Some(TerminalBinding::Observation(i)) => observation
                .get(*i)
                .copied()
                .ok_or_else(|| GpError::UnknownSymbol(format!("{}[{}]", name, i))),
            None => Err(GpError::UnknownSymbol(name.to_string())),
        }
    }

    fn eval_call(&self, function: &str, args: &[Program], observation: &[f64]) -> Result<f64> {
        let primitive = self
            .registry
            .get_primitive(function)
            .ok_or_else(|| GpError::UnknownSymbol(function.to_string()))?;

        if args.len() != primitive.arity() {
            return Err(GpError::ArityMismatch {
                function: function.to_string(),
                arity: primitive.arity(),
                actual: args.len(),
            });
        }

        let values = args
            .iter()
            .map(|arg| self.eval(arg, observation))
            .collect::<Result<Vec<f64>>>()?;
        Ok(primitive.execute(&values))
    }
}

impl Evaluator<Vec<f64>, f64> for Interpreter {
    fn evaluate(&self, program: &Program, observation: &Vec<f64>) -> Result<f64> {
        self.eval(program, observation)
    }
}
