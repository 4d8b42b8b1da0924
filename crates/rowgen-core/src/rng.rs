//! RNG construction helpers.
//!
//! Every generation call takes `&mut dyn RngCore`, so callers decide whether
//! randomness is seeded. Fields never construct their own generator; the
//! exact draw order within one generation pass (stored field order, then the
//! per-variant draw sequence) is what makes a seeded run reproducible.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Deterministic generator for tests and reproducible runs.
pub fn seeded(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// OS-entropy generator for normal use.
pub fn from_entropy() -> ChaCha8Rng {
    ChaCha8Rng::from_os_rng()
}
