//! Deterministic pseudo-random multiplier generation for the sketch module.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The default seed used across sketches and the LZ fingerprinting module
/// when the caller does not supply their own, chosen for reproducibility
/// rather than any cryptographic property.
pub const DEFAULT_SEED: u64 = 147;

/// A small seeded generator of random 32-bit multipliers with every nibble
/// forced non-zero, as required by [`crate::sketch::count_min::CountMinSketch`]'s
/// hash family.
pub struct NonZeroNibbleGen {
    rng: ChaCha8Rng,
}

impl NonZeroNibbleGen {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Draws a random `u32` whose every nibble is in `1..=15`.
    pub fn next_multiplier(&mut self) -> u32 {
        let mut m = 0u32;
        for nibble in 0..8 {
            let v: u32 = self.rng.gen_range(1..=15);
            m |= v << (nibble * 4);
        }
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multipliers_have_no_zero_nibbles() {
        let mut gen = NonZeroNibbleGen::new(DEFAULT_SEED);
        for _ in 0..100 {
            let m = gen.next_multiplier();
            for nibble in 0..8 {
                assert_ne!((m >> (nibble * 4)) & 0xF, 0);
            }
        }
    }

    #[test]
    fn same_seed_reproduces_sequence() {
        let mut a = NonZeroNibbleGen::new(42);
        let mut b = NonZeroNibbleGen::new(42);
        for _ in 0..10 {
            assert_eq!(a.next_multiplier(), b.next_multiplier());
        }
    }
}
