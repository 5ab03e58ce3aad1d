use crate::config::{ConfigSection, EvolutionConfig};
use crate::engines::evaluation::rollout::{mean_episode_reward, Environment, Evaluator};
use crate::engines::generation::{
    hall_of_fame::{EliteProgram, HallOfFame},
    operators::{mutate, roulette_selection},
    population::build_population,
};
use crate::error::{GpError, Result};
use crate::functions::catalog::Catalog;
use crate::types::Program;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Fitness summary of one generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationStats {
    pub generation: usize,
    pub best_fitness: f64,
    pub mean_fitness: f64,
    pub mean_height: f64,
}

/// Generation loop: build, evaluate, select, mutate.
///
/// Each member is scored by its mean episode reward. The best
/// `elitism_count` programs survive unchanged; the rest of the next
/// generation is mutated roulette picks. Any error aborts the run.
pub struct EvolutionEngine {
    config: EvolutionConfig,
    catalog: Catalog,
    hall_of_fame: HallOfFame,
    history: Vec<GenerationStats>,
    rng: StdRng,
}

pub trait ProgressCallback {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(
        &mut self,
        generation: usize,
        best_fitness: f64,
        mean_fitness: f64,
        hall_of_fame_size: usize,
    );
    fn on_program_evaluated(&mut self, program_num: usize, total: usize, fitness: f64);
}

impl EvolutionEngine {
    pub fn new(config: EvolutionConfig, catalog: Catalog) -> Result<Self> {
        config.validate()?;
        catalog.validate()?;

        if catalog.terminals_of(&config.result_type).is_empty() {
            return Err(GpError::NoMatchingTerminal(config.result_type.clone()));
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let hall_of_fame = HallOfFame::new(config.hall_of_fame_size);

        Ok(Self {
            config,
            catalog,
            hall_of_fame,
            history: Vec::new(),
            rng,
        })
    }

    /// Run the evolution process
    pub fn run<E, V, C>(
        &mut self,
        env: &mut E,
        evaluator: &V,
        mut callback: C,
    ) -> Result<Vec<EliteProgram>>
    where
        E: Environment + ?Sized,
        V: Evaluator<E::Observation, E::Action> + ?Sized,
        C: ProgressCallback,
    {
        let mut population = self.initialize_population()?;

        for generation in 0..self.config.num_generations {
            callback.on_generation_start(generation);

            let fitness = self.evaluate_population(&population, env, evaluator, &mut callback)?;

            for (program, score) in population.iter().zip(&fitness) {
                self.hall_of_fame
                    .try_add(EliteProgram::new(program.clone(), *score, generation));
            }

            let stats = summarize(generation, &population, &fitness);
            callback.on_generation_complete(
                generation,
                stats.best_fitness,
                stats.mean_fitness,
                self.hall_of_fame.len(),
            );
            self.history.push(stats);

            if generation + 1 == self.config.num_generations {
                break;
            }

            population = self.create_next_generation(&population, &fitness)?;
        }

        Ok(self.hall_of_fame.get_all().to_vec())
    }

    fn initialize_population(&mut self) -> Result<Vec<Program>> {
        build_population(
            self.config.population_size,
            &self.catalog,
            self.config.max_depth,
            self.config.method,
            self.config.terminal_rate,
            &self.config.result_type,
            &mut self.rng,
        )
    }

    fn evaluate_population<E, V, C>(
        &self,
        population: &[Program],
        env: &mut E,
        evaluator: &V,
        callback: &mut C,
    ) -> Result<Vec<f64>>
    where
        E: Environment + ?Sized,
        V: Evaluator<E::Observation, E::Action> + ?Sized,
        C: ProgressCallback,
    {
        let mut results = Vec::with_capacity(population.len());

        for (i, program) in population.iter().enumerate() {
            let fitness = mean_episode_reward(
                env,
                program,
                evaluator,
                self.config.episodes_per_evaluation,
                self.config.render,
            )?;
            log::trace!("  [{}] {} -> {:.4}", i + 1, program, fitness);
            callback.on_program_evaluated(i + 1, population.len(), fitness);
            results.push(fitness);
        }

        Ok(results)
    }

    fn create_next_generation(
        &mut self,
        population: &[Program],
        fitness: &[f64],
    ) -> Result<Vec<Program>> {
        let mut next_generation = Vec::with_capacity(self.config.population_size);

        // Elitism: copy top performers
        let mut ranked: Vec<usize> = (0..population.len()).collect();
        ranked.sort_by(|&a, &b| {
            fitness[b].partial_cmp(&fitness[a]).unwrap_or(std::cmp::Ordering::Equal)
        });
        for &idx in ranked.iter().take(self.config.elitism_count) {
            next_generation.push(population[idx].clone());
        }

        while next_generation.len() < self.config.population_size {
            let parent = roulette_selection(population, fitness, &mut self.rng)?;
            let child = mutate(
                parent,
                &self.catalog,
                self.config.mutation_depth,
                self.config.method,
                self.config.terminal_rate,
                &mut self.rng,
            )?;
            next_generation.push(child);
        }

        Ok(next_generation)
    }

    pub fn get_hall_of_fame(&self) -> &HallOfFame {
        &self.hall_of_fame
    }

    pub fn history(&self) -> &[GenerationStats] {
        &self.history
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

fn summarize(generation: usize, population: &[Program], fitness: &[f64]) -> GenerationStats {
    let best_fitness = fitness
        .iter()
        .copied()
        .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .unwrap_or(0.0);
    let count = fitness.len().max(1) as f64;
    let mean_fitness = fitness.iter().sum::<f64>() / count;
    let mean_height = population.iter().map(Program::height).sum::<usize>() as f64
        / population.len().max(1) as f64;

    GenerationStats {
        generation,
        best_fitness,
        mean_fitness,
        mean_height,
    }
}
