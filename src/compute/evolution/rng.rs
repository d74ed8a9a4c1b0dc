//! Seedable random stream shared by selection and walk generation.

use rand::prelude::*;

/// Random number generator threaded explicitly through the search.
///
/// A run consumes exactly one stream, so a fixed seed reproduces the run.
#[derive(Debug, Clone)]
pub struct SearchRng {
    rng: StdRng,
}

impl SearchRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create with random seed.
    pub fn random() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Uniform draw in `[0, 1)`.
    #[inline]
    pub fn uniform(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }

    /// Uniform draw in `[lo, hi]`.
    #[inline]
    pub fn uniform_in(&mut self, lo: f64, hi: f64) -> f64 {
        self.rng.gen_range(lo..=hi)
    }

    /// Uniform index in `[0, n)`. `n` must be non-zero.
    #[inline]
    pub fn index(&mut self, n: usize) -> usize {
        self.rng.gen_range(0..n)
    }

    /// Fair coin: true when a uniform draw falls below 0.5.
    #[inline]
    pub fn coin(&mut self) -> bool {
        self.uniform() < 0.5
    }

    /// Unit step of a random walk: +1 when a uniform draw exceeds 0.5, else -1.
    #[inline]
    pub fn step(&mut self) -> f64 {
        if self.uniform() > 0.5 { 1.0 } else { -1.0 }
    }
}
