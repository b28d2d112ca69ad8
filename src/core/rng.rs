//! Deterministic random number generation for the opening shuffle.
//!
//! The same seed always produces the same deck order, so a match can be
//! recreated from its `MatchConfig` alone.
//!
//! ```
//! use cuttle_engine::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//!
//! let mut x: Vec<u8> = (0..10).collect();
//! let mut y = x.clone();
//! a.shuffle(&mut x);
//! b.shuffle(&mut y);
//! assert_eq!(x, y);
//! ```

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seeded RNG.
///
/// Uses ChaCha8 for speed while keeping uniform, reproducible permutations.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Shuffle a slice in place (Fisher-Yates, uniform).
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }
}
