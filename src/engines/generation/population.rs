use super::generator::{generate_program, GenerationMethod};
use super::random::RandomSource;
use crate::error::Result;
use crate::functions::catalog::Catalog;
use crate::types::{Program, TypeToken};

/// Draw `size` independent programs. Duplicates are allowed.
pub fn build_population<R: RandomSource + ?Sized>(
    size: usize,
    catalog: &Catalog,
    depth: usize,
    method: GenerationMethod,
    terminal_rate: f64,
    result_type: &TypeToken,
    rng: &mut R,
) -> Result<Vec<Program>> {
    let population = (0..size)
        .map(|_| generate_program(catalog, depth, method, terminal_rate, result_type, rng))
        .collect::<Result<Vec<_>>>()?;

    if !population.is_empty() {
        let mean_height = population.iter().map(Program::height).sum::<usize>() as f64
            / population.len() as f64;
        log::debug!(
            "built population of {} ({} method, depth {}), mean height {:.2}",
            population.len(),
            method,
            depth,
            mean_height
        );
    }

    Ok(population)
}
