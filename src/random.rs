//! Injectable randomness for tie-breaks and bracket shuffles.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

/// Source of the two random decisions the engine makes.
pub trait RandomSource {
    /// Fair 50/50 draw. `true` selects the first player.
    fn coin_flip(&mut self) -> bool;

    /// Uniform random permutation of `ids` in place.
    fn shuffle_ids(&mut self, ids: &mut [Uuid]);
}

/// `StdRng`-backed source. Seed it for reproducible brackets.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn from_seed_u64(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn coin_flip(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }

    fn shuffle_ids(&mut self, ids: &mut [Uuid]) {
        ids.shuffle(&mut self.rng);
    }
}
