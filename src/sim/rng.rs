//! Seeded random source for gameplay rolls
//!
//! Item drops and item kinds are decided by a uniform roll in `1..=100`.
//! Keeping the generator seeded makes whole sessions reproducible in tests.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

#[derive(Debug, Clone)]
pub struct GameRng {
    seed: u64,
    inner: Pcg32,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed from the thread RNG (used when settings don't pin a seed)
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform integer in `1..=100`
    pub fn roll_percent(&mut self) -> u32 {
        self.inner.random_range(1..=100)
    }

    /// True with `percent`% probability
    pub fn chance(&mut self, percent: u32) -> bool {
        self.roll_percent() <= percent
    }
}
