use super::evolution_engine::ProgressCallback;

/// Reports progress through the `log` facade
pub struct LogProgressCallback;

impl ProgressCallback for LogProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        log::info!("Generation {} starting...", generation + 1);
    }

    fn on_generation_complete(
        &mut self,
        generation: usize,
        best_fitness: f64,
        mean_fitness: f64,
        hall_of_fame_size: usize,
    ) {
        log::info!(
            "Generation {} complete. Best fitness: {:.4}, mean: {:.4}, Hall of Fame size: {}",
            generation + 1,
            best_fitness,
            mean_fitness,
            hall_of_fame_size
        );
    }

    fn on_program_evaluated(&mut self, program_num: usize, total: usize, fitness: f64) {
        if program_num % 10 == 0 || program_num == total {
            log::debug!("  Evaluated {}/{} programs (last fitness {:.4})", program_num, total, fitness);
        }
    }
}

/// Discards all progress events
pub struct SilentProgressCallback;

impl ProgressCallback for SilentProgressCallback {
    fn on_generation_start(&mut self, _generation: usize) {}

    fn on_generation_complete(&mut self, _generation: usize, _best: f64, _mean: f64, _size: usize) {}

    fn on_program_evaluated(&mut self, _program_num: usize, _total: usize, _fitness: f64) {}
}
