//! Dice rolling system
//!
//! Every random draw in the game goes through a single [`Dice`] so a session
//! can be replayed from its seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The process-wide pseudo-random source
#[derive(Debug, Clone)]
pub struct Dice {
    rng: StdRng,
}

impl Dice {
    /// Create dice with a fixed seed (deterministic replays and tests)
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create dice seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create dice from an optional seed, falling back to entropy
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    /// Roll a uniform integer in `[min, max]`.
    /// An inverted range collapses to `min`.
    pub fn range(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..=max)
    }

    /// Returns true with probability `p` (clamped into `[0, 1]`)
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.random_bool(p.clamp(0.0, 1.0))
    }

    /// Pick a uniformly random index below `len`
    pub fn index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.rng.random_range(0..len))
        }
    }

    /// Pick a uniformly random element of a slice
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        self.index(items.len()).map(|i| &items[i])
    }
}
