//! Test doubles for code that consumes generators.
//!
//! [`StepEngine`] yields an arithmetic sequence, so tests can dictate exact
//! raw words. [`Counting`] wraps any engine and counts `advance` calls, which
//! is how tests prove an operation consumed no randomness.
//!
//! ```
//! use fortress_random::engines::SplitMix64;
//! use fortress_random::mock::{Counting, StepEngine};
//! use fortress_random::rng::Rng;
//!
//! let mut step = StepEngine::new(2, 1);
//! assert_eq!([step.next_u64(), step.next_u64(), step.next_u64()], [2, 3, 4]);
//!
//! let mut counted = Counting::new(SplitMix64::new(0));
//! let _ = counted.next_u32();
//! let _ = counted.next_uint(4, 4);
//! assert_eq!(counted.advances(), 1);
//! ```

use crate::engine::Engine;

/// A mock engine yielding `initial`, `initial + increment`, ... with wrapping
/// arithmetic. An increment of 0 yields a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StepEngine {
    value: u64,
    increment: u64,
}

impl StepEngine {
    /// Creates an engine starting at `initial` and stepping by `increment`.
    #[must_use]
    pub const fn new(initial: u64, increment: u64) -> Self {
        Self {
            value: initial,
            increment,
        }
    }
}

/// Counts up from zero.
impl Default for StepEngine {
    fn default() -> Self {
        Self::new(0, 1)
    }
}

impl Engine for StepEngine {
    type Word = u64;
    const SEED_WORDS: usize = 2;
    const NAME: &'static str = "Step";

    #[inline]
    fn advance(&mut self) -> u64 {
        let result = self.value;
        self.value = self.value.wrapping_add(self.increment);
        result
    }

    /// Loads `[initial, increment]`.
    fn load_seed(&mut self, seed: &[u64]) {
        if let [initial, increment, ..] = *seed {
            *self = Self::new(initial, increment);
        }
    }
}

/// An engine wrapper that counts calls to `advance`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counting<E> {
    inner: E,
    advances: u64,
}

impl<E: Engine> Counting<E> {
    /// Wraps `inner` with a zeroed counter.
    #[must_use]
    pub const fn new(inner: E) -> Self {
        Self { inner, advances: 0 }
    }

    /// Number of `advance` calls since construction or the last reset.
    #[must_use]
    pub const fn advances(&self) -> u64 {
        self.advances
    }

    /// Zeroes the counter.
    pub fn reset_count(&mut self) {
        self.advances = 0;
    }

    /// Returns the wrapped engine.
    #[must_use]
    pub const fn inner(&self) -> &E {
        &self.inner
    }
}

impl<E: Engine> Engine for Counting<E> {
    type Word = E::Word;
    const SEED_WORDS: usize = E::SEED_WORDS;
    const NAME: &'static str = E::NAME;

    #[inline]
    fn advance(&mut self) -> E::Word {
        self.advances += 1;
        self.inner.advance()
    }

    fn load_seed(&mut self, seed: &[E::Word]) {
        self.inner.load_seed(seed);
    }
}

#[cfg(test)]
#[allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing
)]
mod tests {
    use super::*;
    use crate::engines::Jsf32;
    use crate::rng::Rng;

    #[test]
    fn test_step_engine_sequence() {
        let mut rng = StepEngine::new(u64::MAX, 2);
        assert_eq!(rng.advance(), u64::MAX);
        assert_eq!(rng.advance(), 1);
        rng.set_seed(&[10, 0]).unwrap();
        assert_eq!(rng.advance(), 10);
        assert_eq!(rng.advance(), 10);
    }

    #[test]
    fn test_counting_tracks_word_width() {
        let mut rng = Counting::new(Jsf32::new(1));
        let _ = rng.next_u64();
        assert_eq!(rng.advances(), 2);
        let _ = rng.next_u32();
        assert_eq!(rng.advances(), 3);
        rng.reset_count();
        let mut buf = [0u8; 9];
        rng.fill_bytes(&mut buf);
        assert_eq!(rng.advances(), 3);
        assert_eq!(rng.algorithm_name(), "JSF 32-bit");
    }

    #[test]
    fn test_counting_is_transparent() {
        let mut plain = Jsf32::new(5);
        let mut counted = Counting::new(Jsf32::new(5));
        for _ in 0..10 {
            assert_eq!(plain.next_u32(), counted.next_u32());
        }
        assert_eq!(counted.inner(), &plain);
    }
}
