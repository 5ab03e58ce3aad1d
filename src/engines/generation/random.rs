use rand::Rng;

/// Random source threaded explicitly through generation, mutation and
/// selection.
///
/// Every `rand::Rng` is a source, so a `StdRng::seed_from_u64(..)` gives a
/// reproducible stream. Nothing in the engine touches `thread_rng`.
pub trait RandomSource {
    /// Uniform draw in `[0, 1)`
    fn uniform(&mut self) -> f64;

    /// Uniform draw in `[low, high)`; returns `low` for an empty range
    fn uniform_range(&mut self, low: f64, high: f64) -> f64;

    /// Uniform integer in `[low, high_inclusive]`
    fn integer(&mut self, low: usize, high_inclusive: usize) -> usize;

    /// Uniformly pick one element, `None` for an empty slice
    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.integer(0, items.len() - 1);
        items.get(idx)
    }
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn uniform(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn uniform_range(&mut self, low: f64, high: f64) -> f64 {
        if high <= low {
            return low;
        }
        self.gen_range(low..high)
    }

    fn integer(&mut self, low: usize, high_inclusive: usize) -> usize {
        if high_inclusive <= low {
            return low;
        }
        self.gen_range(low..=high_inclusive)
    }
}
