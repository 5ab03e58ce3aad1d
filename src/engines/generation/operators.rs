use super::generator::{generate_program, GenerationMethod};
use super::random::RandomSource;
use crate::error::{GpError, Result};
use crate::functions::catalog::Catalog;
use crate::types::Program;

/// Subtree mutation
///
/// An atom is replaced by a freshly generated program of the atom's type.
/// For a call, one argument position is picked uniformly and regenerated
/// with `terminal_rate` pinned to 1.0; every other argument is carried
/// over and the function symbol is kept. The input is left untouched.
pub fn mutate<R: RandomSource + ?Sized>(
    program: &Program,
    catalog: &Catalog,
    depth: usize,
    method: GenerationMethod,
    terminal_rate: f64,
    rng: &mut R,
) -> Result<Program> {
    match program {
        Program::Atom(name) => {
            let spec = catalog
                .terminal(name)
                .ok_or_else(|| GpError::UnknownSymbol(name.clone()))?;
            generate_program(catalog, depth, method, terminal_rate, &spec.ty, rng)
        }
        Program::Call { function, args } => {
            let spec = catalog
                .function(function)
                .ok_or_else(|| GpError::UnknownSymbol(function.clone()))?;
            if spec.arity == 0 || args.len() != spec.arity {
                return Err(GpError::ArityMismatch {
                    function: function.clone(),
                    arity: spec.arity,
                    actual: args.len(),
                });
            }

            let position = rng.integer(0, spec.arity - 1);
            let arg_type = spec.arg_types.get(position).ok_or_else(|| GpError::ArityMismatch {
                function: function.clone(),
                arity: spec.arity,
                actual: spec.arg_types.len(),
            })?;
            // Rate pinned to 1.0: under grow the replaced argument becomes a single leaf.
            let replacement = generate_program(catalog, depth, method, 1.0, arg_type, rng)?;

            let mut new_args = args.clone();
            new_args[position] = replacement;

            log::trace!("mutated argument {} of {}", position, function);
            Ok(Program::call(function.clone(), new_args))
        }
    }
}

/// Weights used by roulette selection.
///
/// When the first score is negative the whole vector is assumed negative
/// and every score becomes `1 / |s|`, so scores closer to zero weigh more.
/// Mixed-sign vectors are not handled specially.
pub fn roulette_weights(scores: &[f64]) -> Vec<f64> {
    match scores.first() {
        Some(&first) if first < 0.0 => scores.iter().map(|s| 1.0 / s.abs()).collect(),
        _ => scores.to_vec(),
    }
}

/// Roulette wheel selection: index drawn with probability proportional to
/// its weight
pub fn roulette_selection_index<R: RandomSource + ?Sized>(
    scores: &[f64],
    rng: &mut R,
) -> Result<usize> {
    let weights = roulette_weights(scores);
    let total: f64 = weights.iter().sum();

    if !total.is_finite() || total <= 0.0 {
        return Err(GpError::SelectionExhausted);
    }

    let spin = rng.uniform_range(0.0, total);

    let mut acc = 0.0;
    for (i, weight) in weights.iter().enumerate() {
        acc += weight;
        if acc > spin {
            return Ok(i);
        }
    }

    Err(GpError::SelectionExhausted)
}

/// Roulette wheel selection over a population with parallel fitness scores
pub fn roulette_selection<'a, R: RandomSource + ?Sized>(
    population: &'a [Program],
    scores: &[f64],
    rng: &mut R,
) -> Result<&'a Program> {
    if population.len() != scores.len() {
        return Err(GpError::PopulationMismatch {
            programs: population.len(),
            scores: scores.len(),
        });
    }

    let idx = roulette_selection_index(scores, rng)?;
    Ok(&population[idx])
}
