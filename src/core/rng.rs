//! Deterministic random numbers and id generation for round expansion.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical `next`/`next_gid` sequences
//! - **Cheap**: one `sin` per draw; not cryptographically secure
//! - **Independent streams**: a ChaCha8 stream derived from the seed, for
//!   randomness that must not disturb id generation
//!
//! ```
//! use rust_tabletop::core::Random;
//!
//! let mut a = Random::new(42);
//! let mut b = Random::new(42);
//! assert_eq!(a.next_gid(), b.next_gid());
//! assert_eq!(a.next(), b.next());
//! ```

use std::hash::Hasher;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;

use super::gid::Gid;

/// Largest seed whose every increment is exactly representable as `f64`.
pub const MAX_SAFE_SEED: u64 = (1 << 53) - 1;

/// Seeded generator for reproducible shuffles and ids.
///
/// State is the seed itself, incremented on every draw. Output is the
/// fractional part of `sin(state) * 10000`.
#[derive(Clone, Debug)]
pub struct Random {
    origin: u64,
    state: f64,
}

impl Random {
    /// Create a generator. Seeds above [`MAX_SAFE_SEED`] are masked down.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let origin = seed & MAX_SAFE_SEED;
        Self {
            origin,
            state: origin as f64,
        }
    }

    /// The seed this generator started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.origin
    }

    /// Next float in `[0, 1)`.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> f64 {
        let x = self.state.sin() * 10_000.0;
        self.state += 1.0;
        let frac = x - x.floor();
        // floor of a tiny negative product can round the difference up to 1.0
        if frac >= 1.0 {
            0.0
        } else {
            frac
        }
    }

    /// Next identifier: eight draws, each scaled into `0..128`.
    pub fn next_gid(&mut self) -> Gid {
        let mut bytes = [0u8; Gid::LEN];
        for byte in &mut bytes {
            *byte = (128.0 * self.next()).floor() as u8;
        }
        Gid::from_bytes(bytes)
    }

    /// Fisher-Yates shuffle driven by this generator.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        let mut i = slice.len();
        while i > 0 {
            let j = (self.next() * i as f64).floor() as usize;
            i -= 1;
            slice.swap(i, j.min(i));
        }
    }

    /// Create an independent ChaCha8 stream for a specific context.
    ///
    /// Does not advance this generator. The same seed and context always
    /// produce the same stream.
    #[must_use]
    pub fn independent_stream(&self, context: &str) -> ChaCha8Rng {
        let mut hasher = FxHasher::default();
        hasher.write_u64(self.origin);
        hasher.write(context.as_bytes());
        ChaCha8Rng::seed_from_u64(hasher.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::seq::SliceRandom;

    #[test]
    fn test_known_values() {
        let mut rng = Random::new(0);

        // sin(0) == 0
        assert_eq!(rng.next(), 0.0);
        // sin(1) * 10000 = 8414.709848...
        assert!((rng.next() - 0.709_848_078_965).abs() < 1e-6);
    }

    #[test]
    fn test_determinism() {
        let mut rng1 = Random::new(42);
        let mut rng2 = Random::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.next(), rng2.next());
        }
        assert_eq!(rng1.next_gid(), rng2.next_gid());
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = Random::new(1);
        let mut rng2 = Random::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.next_gid()).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.next_gid()).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_range() {
        let mut rng = Random::new(7);
        for _ in 0..10_000 {
            let x = rng.next();
            assert!((0.0..1.0).contains(&x), "{x} out of range");
        }
    }

    #[test]
    fn test_gid_shape() {
        let mut rng = Random::new(42);
        for _ in 0..100 {
            let gid = rng.next_gid();
            assert!(gid.bytes().iter().all(|&b| b < 128));
            assert_eq!(gid.to_string().len(), 12);
        }
    }

    #[test]
    fn test_gids_are_distinct() {
        let mut rng = Random::new(42);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(rng.next_gid()));
        }
    }

    #[test]
    fn test_large_seed_is_masked() {
        let rng = Random::new(u64::MAX);
        assert_eq!(rng.seed(), MAX_SAFE_SEED);
    }

    #[test]
    fn test_shuffle() {
        let mut rng = Random::new(42);
        let mut data: Vec<u32> = (1..=10).collect();
        let original = data.clone();

        rng.shuffle(&mut data);

        assert_ne!(data, original);
        data.sort();
        assert_eq!(data, original);
    }

    #[test]
    fn test_independent_stream_does_not_advance() {
        let mut with_stream = Random::new(42);
        let mut plain = Random::new(42);

        let mut stream = with_stream.independent_stream("shuffle");
        let mut data: Vec<u32> = (0..20).collect();
        data.shuffle(&mut stream);

        assert_eq!(with_stream.next_gid(), plain.next_gid());
    }

    #[test]
    fn test_independent_stream_is_deterministic() {
        let a = Random::new(42);
        let b = Random::new(42);

        let mut data_a: Vec<u32> = (0..20).collect();
        let mut data_b = data_a.clone();
        data_a.shuffle(&mut a.independent_stream("deck"));
        data_b.shuffle(&mut b.independent_stream("deck"));
        assert_eq!(data_a, data_b);

        let mut data_c: Vec<u32> = (0..20).collect();
        data_c.shuffle(&mut a.independent_stream("other"));
        assert_ne!(data_a, data_c);
    }
}
