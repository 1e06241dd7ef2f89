use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

/// Seeded random source for the pricer.
///
/// Passed explicitly into every pricing call so tests can pin the seed.
/// The same seed always yields the same sequence of draws.
pub struct PricerRng {
    inner: StdRng,
    seed: u64,
}

impl PricerRng {
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Fresh seed from OS entropy. The seed is kept so the run can be reproduced.
    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random::<u64>())
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Standard normal variate (Ziggurat via `rand_distr`).
    #[inline]
    pub fn gen_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.inner)
    }

    /// Fills a pre-allocated buffer with i.i.d. standard normals.
    pub fn fill_normal(&mut self, buffer: &mut [f64]) {
        for x in buffer.iter_mut() {
            *x = self.gen_normal();
        }
    }

    /// Child stream seeded from this one. Used to hand each parallel trial
    /// its own non-overlapping generator while keeping the run reproducible
    /// from the parent seed alone.
    pub fn derive_stream(&mut self) -> PricerRng {
        PricerRng::from_seed(self.inner.gen::<u64>())
    }
}
