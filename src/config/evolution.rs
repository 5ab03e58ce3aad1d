use super::traits::ConfigSection;
use crate::engines::generation::GenerationMethod;
use crate::error::GpError;
use crate::types::TypeToken;
use serde::{Deserialize, Serialize};

/// Largest depth budget accepted; generation and mutation recurse once per level.
pub const MAX_DEPTH_BUDGET: usize = 256;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub num_generations: usize,
    pub max_depth: usize,
    pub method: GenerationMethod,
    pub terminal_rate: f64,
    /// Depth budget handed to the mutation operator
    pub mutation_depth: usize,
    pub elitism_count: usize,
    pub hall_of_fame_size: usize,
    pub episodes_per_evaluation: usize,
    /// Root type of every evolved program
    pub result_type: TypeToken,
    pub seed: Option<u64>,
    pub render: bool,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            num_generations: 20,
            max_depth: 5,
            method: GenerationMethod::Grow,
            terminal_rate: 0.4,
            mutation_depth: 3,
            elitism_count: 2,
            hall_of_fame_size: 5,
            episodes_per_evaluation: 1,
            result_type: TypeToken::from("action"),
            seed: None,
            render: false,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), GpError> {
        if self.population_size < 2 {
            return Err(GpError::Configuration(
                "Population size must be at least 2".to_string()
            ));
        }
        if self.num_generations == 0 {
            return Err(GpError::Configuration(
                "At least one generation is required".to_string()
            ));
        }
        if !(0.0..=1.0).contains(&self.terminal_rate) {
            return Err(GpError::Configuration(
                "Terminal rate must be between 0 and 1".to_string()
            ));
        }
        if self.max_depth > MAX_DEPTH_BUDGET || self.mutation_depth > MAX_DEPTH_BUDGET {
            return Err(GpError::Configuration(format!(
                "Depth budgets must not exceed {}",
                MAX_DEPTH_BUDGET
            )));
        }
        if self.elitism_count >= self.population_size {
            return Err(GpError::Configuration(
                "Elitism count must be smaller than the population".to_string()
            ));
        }
        if self.episodes_per_evaluation == 0 {
            return Err(GpError::Configuration(
                "At least one episode per evaluation is required".to_string()
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(EvolutionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        let bad_rate = EvolutionConfig { terminal_rate: 1.5, ..Default::default() };
        assert!(bad_rate.validate().is_err());

        let deep = EvolutionConfig { max_depth: MAX_DEPTH_BUDGET + 1, ..Default::default() };
        assert!(deep.validate().is_err());

        let all_elite = EvolutionConfig {
            population_size: 4,
            elitism_count: 4,
            ..Default::default()
        };
        assert!(all_elite.validate().is_err());

        let no_episodes = EvolutionConfig { episodes_per_evaluation: 0, ..Default::default() };
        assert!(no_episodes.validate().is_err());
    }
}
