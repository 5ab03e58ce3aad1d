use super::random::RandomSource;
use crate::error::{GpError, Result};
use crate::functions::catalog::Catalog;
use crate::types::{Program, TypeToken};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tree generation method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMethod {
    /// May stop at any level with probability `terminal_rate`
    Grow,
    /// Expands through functions until the depth budget runs out
    Full,
}

impl fmt::Display for GenerationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationMethod::Grow => f.write_str("grow"),
            GenerationMethod::Full => f.write_str("full"),
        }
    }
}

impl FromStr for GenerationMethod {
    type Err = GpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "grow" => Ok(GenerationMethod::Grow),
            "full" => Ok(GenerationMethod::Full),
            other => Err(GpError::Configuration(format!(
                "Unknown generation method: {}",
                other
            ))),
        }
    }
}

/// Recursively build a program of `result_type` whose height is at most
/// `depth`.
///
/// A terminal is forced at depth 0, or under `Grow` when a uniform draw
/// falls below `terminal_rate`. When no function returns `result_type`
/// the generator falls back to a terminal whatever the remaining depth.
pub fn generate_program<R: RandomSource + ?Sized>(
    catalog: &Catalog,
    depth: usize,
    method: GenerationMethod,
    terminal_rate: f64,
    result_type: &TypeToken,
    rng: &mut R,
) -> Result<Program> {
    let force_terminal =
        depth == 0 || (method == GenerationMethod::Grow && rng.uniform() < terminal_rate);

    if !force_terminal {
        let functions = catalog.functions_of(result_type);
        if let Some(&name) = rng.choose(&functions) {
            let spec = catalog
                .function(name)
                .ok_or_else(|| GpError::UnknownSymbol(name.to_string()))?;

            let args = spec
                .arg_types
                .iter()
                .map(|arg_type| {
                    generate_program(catalog, depth - 1, method, terminal_rate, arg_type, rng)
                })
                .collect::<Result<Vec<_>>>()?;

            log::trace!("generated call {} at depth budget {}", name, depth);
            return Ok(Program::call(name, args));
        }
    }

    choose_terminal(catalog, result_type, rng)
}

fn choose_terminal<R: RandomSource + ?Sized>(
    catalog: &Catalog,
    result_type: &TypeToken,
    rng: &mut R,
) -> Result<Program> {
    let terminals = catalog.terminals_of(result_type);
    rng.choose(&terminals)
        .map(|&name| Program::atom(name))
        .ok_or_else(|| GpError::NoMatchingTerminal(result_type.clone()))
}
