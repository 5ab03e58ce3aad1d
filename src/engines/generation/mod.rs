pub mod random;
pub mod generator;
pub mod population;
pub mod operators;
pub mod hall_of_fame;
pub mod evolution_engine;
pub mod progress;

pub use random::RandomSource;
pub use generator::{generate_program, GenerationMethod};
pub use population::build_population;
pub use operators::{mutate, roulette_selection, roulette_selection_index, roulette_weights};
pub use hall_of_fame::{HallOfFame, EliteProgram};
pub use evolution_engine::{EvolutionEngine, GenerationStats, ProgressCallback};
pub use progress::{LogProgressCallback, SilentProgressCallback};
