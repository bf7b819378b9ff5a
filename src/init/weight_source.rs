use rand::rngs::ThreadRng;
use rand::Rng;

/// Default upper bound of re-randomized weights.
pub const DEFAULT_INIT_RANGE: f64 = 0.1;

/// Supplies fresh connection weights whenever training re-randomizes them.
pub trait WeightSource {
    /// Next weight, drawn from `[0, range)` for random sources.
    fn next_weight(&mut self, range: f64) -> f64;
}

/// Uniform weights in `[0, range)` drawn from any `rand` generator.
pub struct UniformWeights<R: Rng> {
    rng: R,
}

impl<R: Rng> UniformWeights<R> {
    pub fn new(rng: R) -> Self {
        UniformWeights { rng }
    }
}

impl UniformWeights<ThreadRng> {
    pub fn thread_local() -> Self {
        UniformWeights::new(rand::thread_rng())
    }
}

impl<R: Rng> WeightSource for UniformWeights<R> {
    fn next_weight(&mut self, range: f64) -> f64 {
        self.rng.gen::<f64>() * range
    }
}

/// Always hands out the same weight; ignores the range.
///
/// Makes a training run fully predictable, which is what the tests use it for.
#[derive(Debug, Clone, Copy)]
pub struct ConstantWeights(pub f64);

impl WeightSource for ConstantWeights {
    fn next_weight(&mut self, _range: f64) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod test_weight_source {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn uniform_is_bounded_and_seedable() {
        let mut a = UniformWeights::new(StdRng::seed_from_u64(11));
        let mut b = UniformWeights::new(StdRng::seed_from_u64(11));
        for _ in 0..1000 {
            let w = a.next_weight(DEFAULT_INIT_RANGE);
            assert!((0.0..DEFAULT_INIT_RANGE).contains(&w));
            assert_eq!(w, b.next_weight(DEFAULT_INIT_RANGE));
        }
    }

    #[test]
    fn constant_ignores_range() {
        let mut c = ConstantWeights(0.05);
        assert_eq!(c.next_weight(0.1), 0.05);
        assert_eq!(c.next_weight(10.0), 0.05);
    }
}
