use gpgym::config::EvolutionConfig;
use gpgym::engines::evaluation::TimeLimit;
use gpgym::engines::generation::{
    EvolutionEngine, GenerationMethod, ProgressCallback, SilentProgressCallback,
};
use gpgym::environments::{pendulum_catalog, pendulum_interpreter, Pendulum};
use gpgym::functions::PrimitiveRegistry;
use gpgym::report::RunReport;
use gpgym::{GpError, Program, TypeToken};
use std::sync::Arc;

/// Simple progress callback for testing
#[derive(Default)]
struct TestProgressCallback {
    generations_started: usize,
    generations_completed: usize,
    evaluated: usize,
}

impl ProgressCallback for &mut TestProgressCallback {
    fn on_generation_start(&mut self, _generation: usize) {
        self.generations_started += 1;
    }

    fn on_generation_complete(&mut self, generation: usize, best: f64, mean: f64, hof: usize) {
        self.generations_completed += 1;
        println!(
            "Generation {}: Best Fitness = {:.4}, Mean = {:.4}, Hall Size = {}",
            generation + 1,
            best,
            mean,
            hof
        );
    }

    fn on_program_evaluated(&mut self, _program_num: usize, _total: usize, _fitness: f64) {
        self.evaluated += 1;
    }
}

/// Create a minimal evolution config for fast testing
fn create_test_evolution_config() -> EvolutionConfig {
    EvolutionConfig {
        population_size: 12,
        num_generations: 4,
        max_depth: 3,
        method: GenerationMethod::Grow,
        terminal_rate: 0.3,
        mutation_depth: 2,
        elitism_count: 2,
        hall_of_fame_size: 5,
        episodes_per_evaluation: 1,
        result_type: TypeToken::from("action"),
        seed: Some(42), // Fixed seed for reproducibility
        render: false,
    }
}

fn run_once(config: EvolutionConfig) -> (Vec<gpgym::engines::generation::EliteProgram>, Vec<f64>) {
    let registry = Arc::new(PrimitiveRegistry::new());
    let catalog = pendulum_catalog(&registry).unwrap();
    let interpreter = pendulum_interpreter(Arc::clone(&registry));
    let evaluator = |p: &Program, obs: &Vec<f64>| interpreter.eval(p, obs);
    let mut env = TimeLimit::new(Pendulum::new(7), 50);

    let mut engine = EvolutionEngine::new(config, catalog).unwrap();
    let hof = engine.run(&mut env, &evaluator, SilentProgressCallback).unwrap();
    let best_per_generation = engine.history().iter().map(|s| s.best_fitness).collect();
    (hof, best_per_generation)
}

#[test]
fn test_evolution_basic() {
    let config = create_test_evolution_config();
    let registry = Arc::new(PrimitiveRegistry::new());
    let catalog = pendulum_catalog(&registry).unwrap();
    let interpreter = pendulum_interpreter(Arc::clone(&registry));
    let evaluator = |p: &Program, obs: &Vec<f64>| interpreter.eval(p, obs);
    let mut env = TimeLimit::new(Pendulum::new(1), 50);

    let mut callback = TestProgressCallback::default();
    let mut engine = EvolutionEngine::new(config.clone(), catalog).unwrap();
    let hall_of_fame = engine.run(&mut env, &evaluator, &mut callback).unwrap();

    assert_eq!(callback.generations_started, config.num_generations);
    assert_eq!(callback.generations_completed, config.num_generations);
    assert_eq!(
        callback.evaluated,
        config.num_generations * config.population_size
    );

    assert!(!hall_of_fame.is_empty());
    assert!(hall_of_fame.len() <= config.hall_of_fame_size);
    for pair in hall_of_fame.windows(2) {
        assert!(pair[0].fitness >= pair[1].fitness);
    }
    for elite in &hall_of_fame {
        engine
            .catalog()
            .check(&elite.program, &config.result_type)
            .unwrap();
        // pendulum rewards are never positive
        assert!(elite.fitness <= 0.0);
    }
    assert_eq!(engine.history().len(), config.num_generations);
}

#[test]
fn test_evolution_is_reproducible_with_seed() {
    let (hof_a, best_a) = run_once(create_test_evolution_config());
    let (hof_b, best_b) = run_once(create_test_evolution_config());

    assert_eq!(best_a, best_b);
    let programs_a: Vec<_> = hof_a.iter().map(|e| e.program.clone()).collect();
    let programs_b: Vec<_> = hof_b.iter().map(|e| e.program.clone()).collect();
    assert_eq!(programs_a, programs_b);
}

#[test]
fn test_full_method_run_records_every_generation() {
    let (hall_of_fame, best) = run_once(EvolutionConfig {
        method: GenerationMethod::Full,
        num_generations: 3,
        ..create_test_evolution_config()
    });
    assert_eq!(best.len(), 3);
    assert!(best.iter().all(|f| f.is_finite()));
    assert!(!hall_of_fame.is_empty());
}

#[test]
fn test_engine_rejects_missing_result_type() {
    let registry = PrimitiveRegistry::new();
    let catalog = pendulum_catalog(&registry).unwrap();
    let config = EvolutionConfig {
        result_type: TypeToken::from("colour"),
        ..create_test_evolution_config()
    };
    assert!(matches!(
        EvolutionEngine::new(config, catalog),
        Err(GpError::NoMatchingTerminal(_))
    ));
}

#[test]
fn test_report_round_trip() {
    let (hall_of_fame, _) = run_once(create_test_evolution_config());
    let report = RunReport {
        started_at: chrono::Utc::now(),
        finished_at: chrono::Utc::now(),
        config: create_test_evolution_config(),
        history: Vec::new(),
        hall_of_fame,
    };

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    report.write_json(&path).unwrap();
    let loaded = RunReport::read_json(&path).unwrap();

    assert_eq!(
        loaded.best().map(|e| e.program.clone()),
        report.best().map(|e| e.program.clone())
    );
}
