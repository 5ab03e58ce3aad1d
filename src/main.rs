use anyhow::Context;
use gpgym::config::ConfigManager;
use gpgym::engines::evaluation::TimeLimit;
use gpgym::engines::generation::{EvolutionEngine, LogProgressCallback};
use gpgym::environments::{
    finite_torque, pendulum_catalog, pendulum_interpreter, Pendulum, OBSERVATION_SIZE,
};
use gpgym::functions::PrimitiveRegistry;
use gpgym::report::RunReport;
use gpgym::Program;
use std::env;
use std::sync::Arc;

const EPISODE_STEPS: usize = 200;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // gpgym [config.toml|config.json] [report.json]
    let args: Vec<String> = env::args().collect();

    let manager = ConfigManager::new();
    if let Some(path) = args.get(1) {
        manager
            .load_from_file(path)
            .with_context(|| format!("loading config {}", path))?;
    }
    let config = manager.get()?;

    let registry = Arc::new(PrimitiveRegistry::new());
    let catalog = match config.load_catalog()? {
        Some(catalog) => catalog,
        None => pendulum_catalog(&registry)?,
    };
    let interpreter =
        pendulum_interpreter(Arc::clone(&registry)).with_bindings(config.bindings.clone());
    interpreter.check_catalog(&catalog, OBSERVATION_SIZE)?;

    log::info!(
        "Evolving {} programs for {} generations ({} method, depth {})",
        config.evolution.population_size,
        config.evolution.num_generations,
        config.evolution.method,
        config.evolution.max_depth
    );

    let started_at = chrono::Utc::now();
    let mut env = TimeLimit::new(Pendulum::new(config.evolution.seed.unwrap_or(0)), EPISODE_STEPS);
    let evaluator = |program: &Program, obs: &Vec<f64>| -> gpgym::Result<f64> {
        interpreter.eval(program, obs).map(finite_torque)
    };

    let mut engine = EvolutionEngine::new(config.evolution.clone(), catalog)?;
    let hall_of_fame = engine.run(&mut env, &evaluator, LogProgressCallback)?;

    let report = RunReport {
        started_at,
        finished_at: chrono::Utc::now(),
        config: config.evolution.clone(),
        history: engine.history().to_vec(),
        hall_of_fame,
    };

    match report.best() {
        Some(best) => log::info!("Best program ({:.4}): {}", best.fitness, best.program),
        None => log::warn!("No program entered the hall of fame"),
    }

    if let Some(path) = args.get(2) {
        report
            .write_json(path)
            .with_context(|| format!("writing report {}", path))?;
        log::info!("Report written to {}", path);
    }

    Ok(())
}
