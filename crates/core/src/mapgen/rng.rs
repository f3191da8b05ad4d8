//! Bounded random-draw seam so generation stays deterministic per seed and
//! tests can script exact sequences.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

/// Source of uniform draws over a half-open range `[min, max)`.
pub trait RandomSource {
    fn next_between(&mut self, min: u32, max: u32) -> u32;
}

/// Production source backed by a seeded ChaCha8 stream.
pub struct ChaChaSource {
    rng: ChaCha8Rng,
}

impl ChaChaSource {
    pub fn seeded(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }
}

impl RandomSource for ChaChaSource {
    fn next_between(&mut self, min: u32, max: u32) -> u32 {
        debug_assert!(min < max);
        min + self.rng.next_u32() % (max - min)
    }
}
