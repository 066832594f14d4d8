//! The contract every generator family implements.
//!
//! An [`Engine`] owns a fixed-size state and knows three things: how to
//! advance that state by one step (yielding one native word), how to load a
//! seed, and its own name. Everything else, from bytes and bounded integers
//! to distributions and shuffles, is derived in [`crate::rng`] from
//! `advance()` through the word-width adaptation in [`NativeWord`].
//!
//! # Seeding
//!
//! Seeds are slices of native words. [`Engine::set_seed`] rejects empty or
//! undersized slices and truncates longer ones to [`Engine::SEED_WORDS`]
//! before handing them to the family's [`Engine::load_seed`], which applies
//! algorithm-specific fix-ups (odd increments, non-zero xorshift registers,
//! warm-up rounds).
//!
//! ```rust
//! use fortress_random::engine::Engine;
//! use fortress_random::engines::Sfc64;
//!
//! let mut rng = Sfc64::default();
//! rng.set_seed(&[1, 2, 3]).unwrap();
//! assert!(rng.set_seed(&[]).is_err());
//! assert!(rng.set_seed(&[1, 2]).is_err());
//! ```

use crate::engines::SplitMix64;
use crate::entropy::{EntropySource, OsEntropy};
use crate::error::RandomError;
use crate::{
    report_violation,
    telemetry::{ViolationKind, ViolationSeverity},
};
use std::fmt;

mod sealed {
    pub trait Sealed {}
    impl Sealed for u32 {}
    impl Sealed for u64 {}
}

/// Native output word of an engine: `u32` or `u64`.
///
/// The associated functions implement the word-width adaptation layer, so a
/// family only ever provides `advance()`.
pub trait NativeWord:
    sealed::Sealed + Copy + Default + Eq + fmt::Debug + fmt::LowerHex + Send + Sync + 'static
{
    /// Width of the word in bytes.
    const BYTES: usize;

    /// Decodes a little-endian chunk of exactly [`Self::BYTES`] bytes.
    fn from_le_chunk(chunk: &[u8]) -> Self;

    /// Draws one word from a SplitMix64 stream (high half for 32-bit words).
    fn from_splitmix(mixer: &mut SplitMix64) -> Self;

    /// Returns `true` for the zero word.
    fn is_zero(self) -> bool;

    /// 32 bits from the engine.
    fn next_u32<E: Engine<Word = Self> + ?Sized>(engine: &mut E) -> u32;

    /// 64 bits from the engine.
    fn next_u64<E: Engine<Word = Self> + ?Sized>(engine: &mut E) -> u64;

    /// `true` iff the top bit of one word is zero.
    fn next_bool<E: Engine<Word = Self> + ?Sized>(engine: &mut E) -> bool;

    /// Top 8 bits of one word.
    fn next_byte<E: Engine<Word = Self> + ?Sized>(engine: &mut E) -> u8;

    /// Fills `dest` with little-endian words; the last word contributes only its low bytes.
    fn fill_bytes<E: Engine<Word = Self> + ?Sized>(engine: &mut E, dest: &mut [u8]);
}

impl NativeWord for u32 {
    const BYTES: usize = 4;

    fn from_le_chunk(chunk: &[u8]) -> Self {
        chunk
            .iter()
            .rev()
            .fold(0, |acc, &byte| (acc << 8) | Self::from(byte))
    }

    fn from_splitmix(mixer: &mut SplitMix64) -> Self {
        (mixer.next_word() >> 32) as Self
    }

    fn is_zero(self) -> bool {
        self == 0
    }

    #[inline]
    fn next_u32<E: Engine<Word = Self> + ?Sized>(engine: &mut E) -> u32 {
        engine.advance()
    }

    #[inline]
    fn next_u64<E: Engine<Word = Self> + ?Sized>(engine: &mut E) -> u64 {
        let high = u64::from(engine.advance());
        let low = u64::from(engine.advance());
        (high << 32) | low
    }

    #[inline]
    fn next_bool<E: Engine<Word = Self> + ?Sized>(engine: &mut E) -> bool {
        engine.advance() >> 31 == 0
    }

    #[inline]
    fn next_byte<E: Engine<Word = Self> + ?Sized>(engine: &mut E) -> u8 {
        (engine.advance() >> 24) as u8
    }

    fn fill_bytes<E: Engine<Word = Self> + ?Sized>(engine: &mut E, dest: &mut [u8]) {
        let mut chunks = dest.chunks_exact_mut(4);
        for chunk in chunks.by_ref() {
            chunk.copy_from_slice(&engine.advance().to_le_bytes());
        }
        let remainder = chunks.into_remainder();
        if !remainder.is_empty() {
            let val = engine.advance().to_le_bytes();
            if let Some(val_slice) = val.get(..remainder.len()) {
                remainder.copy_from_slice(val_slice);
            }
        }
    }
}

impl NativeWord for u64 {
    const BYTES: usize = 8;

    fn from_le_chunk(chunk: &[u8]) -> Self {
        chunk
            .iter()
            .rev()
            .fold(0, |acc, &byte| (acc << 8) | Self::from(byte))
    }

    fn from_splitmix(mixer: &mut SplitMix64) -> Self {
        mixer.next_word()
    }

    fn is_zero(self) -> bool {
        self == 0
    }

    #[inline]
    fn next_u32<E: Engine<Word = Self> + ?Sized>(engine: &mut E) -> u32 {
        (engine.advance() >> 32) as u32
    }

    #[inline]
    fn next_u64<E: Engine<Word = Self> + ?Sized>(engine: &mut E) -> u64 {
        engine.advance()
    }

    #[inline]
    fn next_bool<E: Engine<Word = Self> + ?Sized>(engine: &mut E) -> bool {
        engine.advance() >> 63 == 0
    }

    #[inline]
    fn next_byte<E: Engine<Word = Self> + ?Sized>(engine: &mut E) -> u8 {
        (engine.advance() >> 56) as u8
    }

    fn fill_bytes<E: Engine<Word = Self> + ?Sized>(engine: &mut E, dest: &mut [u8]) {
        let mut chunks = dest.chunks_exact_mut(8);
        for chunk in chunks.by_ref() {
            chunk.copy_from_slice(&engine.advance().to_le_bytes());
        }
        let remainder = chunks.into_remainder();
        if !remainder.is_empty() {
            let val = engine.advance().to_le_bytes();
            if let Some(val_slice) = val.get(..remainder.len()) {
                remainder.copy_from_slice(val_slice);
            }
        }
    }
}

/// A raw state-advance algorithm.
///
/// Implementors are plain data: no interior mutability, no I/O, no hidden
/// globals. `advance` must be a total function of the current state.
pub trait Engine: Clone + Default {
    /// The native output word.
    type Word: NativeWord;

    /// Number of words [`Engine::load_seed`] consumes.
    const SEED_WORDS: usize;

    /// Human-readable algorithm label.
    const NAME: &'static str;

    /// Advances the state by one step and returns the next native word.
    fn advance(&mut self) -> Self::Word;

    /// Resets the state from exactly [`Self::SEED_WORDS`] words.
    ///
    /// Called by [`Engine::set_seed`] after validation; applies the family's
    /// fix-ups and warm-up rounds.
    fn load_seed(&mut self, seed: &[Self::Word]);

    /// Returns the algorithm label.
    fn algorithm_name(&self) -> &'static str {
        Self::NAME
    }

    /// Resets the state from a seed slice.
    ///
    /// Fails with [`RandomError::EmptySeed`] for an empty slice and
    /// [`RandomError::SeedTooShort`] when fewer than [`Self::SEED_WORDS`] words
    /// are given. Extra words are ignored.
    fn set_seed(&mut self, seed: &[Self::Word]) -> Result<(), RandomError> {
        let words = seed_prefix(seed, Self::SEED_WORDS)?;
        self.load_seed(words);
        Ok(())
    }

    /// Reseeds from an entropy source.
    ///
    /// Requests exactly `SEED_WORDS * BYTES` non-zero bytes in one call and
    /// decodes them as little-endian words.
    fn reseed<S: EntropySource + ?Sized>(&mut self, source: &mut S) -> Result<(), RandomError> {
        let words = draw_seed_words::<Self::Word, S>(source, Self::SEED_WORDS)?;
        tracing::trace!(
            algorithm = Self::NAME,
            words = words.len(),
            "reseeding from entropy source"
        );
        self.set_seed(&words)
    }

    /// Creates an engine from a seed slice.
    fn from_seed_words(seed: &[Self::Word]) -> Result<Self, RandomError> {
        let mut engine = Self::default();
        engine.set_seed(seed)?;
        Ok(engine)
    }

    /// Creates an engine from one `u64`, expanded through SplitMix64 into
    /// [`Self::SEED_WORDS`] words.
    ///
    /// Different seeds produce different (statistically independent) sequences.
    #[must_use]
    fn seed_from_u64(seed: u64) -> Self {
        let words = expand_seed::<Self::Word>(seed, Self::SEED_WORDS);
        match Self::from_seed_words(&words) {
            Ok(engine) => engine,
            Err(err) => {
                report_violation!(
                    ViolationSeverity::Error,
                    ViolationKind::InternalError,
                    Self::NAME,
                    "rejected its own expanded seed ({}); using the default state",
                    err
                );
                Self::default()
            },
        }
    }

    /// Creates an engine seeded from the operating system.
    fn from_entropy() -> Result<Self, RandomError> {
        let mut engine = Self::default();
        engine.reseed(&mut OsEntropy)?;
        Ok(engine)
    }
}

/// Object-friendly reseeding, implemented for every [`Engine`] and for
/// runtime-selected generators.
pub trait Reseed {
    /// Returns the algorithm label.
    fn name(&self) -> &'static str;

    /// Reseeds from an entropy source.
    fn reseed_with(&mut self, source: &mut dyn EntropySource) -> Result<(), RandomError>;
}

impl<E: Engine> Reseed for E {
    fn name(&self) -> &'static str {
        self.algorithm_name()
    }

    fn reseed_with(&mut self, source: &mut dyn EntropySource) -> Result<(), RandomError> {
        self.reseed(source)
    }
}

/// Validates a seed slice and returns its first `required` words.
#[doc(hidden)]
pub fn seed_prefix<W>(seed: &[W], required: usize) -> Result<&[W], RandomError> {
    if seed.is_empty() {
        return Err(RandomError::EmptySeed);
    }
    seed.get(..required).ok_or(RandomError::SeedTooShort {
        required,
        provided: seed.len(),
    })
}

/// Draws `count` words worth of non-zero bytes and decodes them little-endian.
pub(crate) fn draw_seed_words<W: NativeWord, S: EntropySource + ?Sized>(
    source: &mut S,
    count: usize,
) -> Result<Vec<W>, RandomError> {
    let mut bytes = vec![0u8; count * W::BYTES];
    source.fill_non_zero(&mut bytes)?;
    Ok(bytes.chunks_exact(W::BYTES).map(W::from_le_chunk).collect())
}

/// Expands `seed` into `count` words with SplitMix64.
#[doc(hidden)]
pub fn expand_seed<W: NativeWord>(seed: u64, count: usize) -> Vec<W> {
    let mut mixer = SplitMix64::new(seed);
    (0..count).map(|_| W::from_splitmix(&mut mixer)).collect()
}

/// Fills `state` from SplitMix64(0) when every word is zero and reports the fix-up.
///
/// Returns `true` if the state was replaced.
#[doc(hidden)]
pub fn repair_zero_state<W: NativeWord>(algorithm: &'static str, state: &mut [W]) -> bool {
    if !state.iter().all(|w| w.is_zero()) {
        return false;
    }
    let mut mixer = SplitMix64::new(0);
    for word in state.iter_mut() {
        *word = W::from_splitmix(&mut mixer);
    }
    report_violation!(
        ViolationSeverity::Warning,
        ViolationKind::DegenerateSeed,
        algorithm,
        "cannot run from an all-zero state; substituted SplitMix64(0) expansion"
    );
    true
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
    use crate::engines::{Jsf32, SplitMix64};
    use crate::entropy::ReplayEntropy;

    #[test]
    fn test_seed_prefix_validation() {
        let empty: [u64; 0] = [];
        assert_eq!(seed_prefix(&empty, 2), Err(RandomError::EmptySeed));
        assert_eq!(
            seed_prefix(&[1u64], 2),
            Err(RandomError::SeedTooShort {
                required: 2,
                provided: 1
            })
        );
        assert_eq!(seed_prefix(&[1u64, 2, 3], 2).unwrap(), &[1, 2]);
    }

    #[test]
    fn test_le_chunk_decoding() {
        assert_eq!(u32::from_le_chunk(&[0x01, 0x02, 0x03, 0x04]), 0x0403_0201);
        assert_eq!(
            u64::from_le_chunk(&[1, 0, 0, 0, 0, 0, 0, 0x80]),
            0x8000_0000_0000_0001
        );
    }

    #[test]
    fn test_expand_seed_uses_splitmix() {
        let words: Vec<u64> = expand_seed(0, 2);
        assert_eq!(words, vec![0xe220a8397b1dcdaf, 0x6e789e6aa1b965f4]);
        let halves: Vec<u32> = expand_seed(0, 2);
        assert_eq!(halves, vec![0xe220a839, 0x6e789e6a]);
    }

    #[test]
    fn test_reseed_decodes_little_endian_words() {
        let mut rng = SplitMix64::default();
        let mut source = ReplayEntropy::counting();
        rng.reseed(&mut source).unwrap();
        assert_eq!(rng, SplitMix64::new(0x0807_0605_0403_0201));
    }

    #[test]
    fn test_reseed_with_dyn_source() {
        let mut a = Jsf32::default();
        let mut b = Jsf32::default();
        let mut source_a = ReplayEntropy::counting();
        let mut source_b = ReplayEntropy::counting();
        a.reseed_with(&mut source_a).unwrap();
        b.reseed(&mut source_b).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.name(), "JSF 32-bit");
    }

    #[test]
    fn test_repair_zero_state() {
        let mut state = [0u64; 2];
        assert!(repair_zero_state("test", &mut state));
        assert_eq!(state, [0xe220a8397b1dcdaf, 0x6e789e6aa1b965f4]);

        let mut state = [0u64, 5];
        assert!(!repair_zero_state("test", &mut state));
        assert_eq!(state, [0, 5]);
    }

    #[test]
    fn test_from_entropy_produces_distinct_engines() {
        let a = SplitMix64::from_entropy().unwrap();
        let b = SplitMix64::from_entropy().unwrap();
        assert_ne!(a, b);
    }
}
