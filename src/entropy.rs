//! Entropy sources used to reseed generators.
//!
//! Generators never reach for the operating system themselves. Anything that
//! reseeds takes an [`EntropySource`], so production code passes [`OsEntropy`]
//! and tests pass a deterministic [`ReplayEntropy`].

use crate::error::RandomError;

/// A provider of raw seed bytes.
///
/// One call serves one reseed. Implementations must fill the whole buffer with
/// non-zero bytes or return an error.
pub trait EntropySource {
    /// Fills `dest` entirely with non-zero bytes.
    fn fill_non_zero(&mut self, dest: &mut [u8]) -> Result<(), RandomError>;
}

impl<S: EntropySource + ?Sized> EntropySource for &mut S {
    fn fill_non_zero(&mut self, dest: &mut [u8]) -> Result<(), RandomError> {
        (**self).fill_non_zero(dest)
    }
}

/// The operating system's cryptographically strong byte source, via `getrandom`.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsEntropy;

impl OsEntropy {
    /// Creates a handle to the operating system entropy source.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl EntropySource for OsEntropy {
    fn fill_non_zero(&mut self, dest: &mut [u8]) -> Result<(), RandomError> {
        getrandom::getrandom(dest).map_err(|err| RandomError::Entropy {
            context: err.to_string(),
        })?;
        let mut byte = [0u8; 1];
        for slot in dest.iter_mut().filter(|b| **b == 0) {
            while byte[0] == 0 {
                getrandom::getrandom(&mut byte).map_err(|err| RandomError::Entropy {
                    context: err.to_string(),
                })?;
            }
            *slot = byte[0];
            byte[0] = 0;
        }
        tracing::trace!(bytes = dest.len(), "drew seed bytes from the operating system");
        Ok(())
    }
}

/// A deterministic source that cycles through a fixed byte pattern, skipping zeros.
///
/// Intended for tests that need `reseed` to be reproducible.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayEntropy {
    pattern: Vec<u8>,
    position: usize,
}

impl ReplayEntropy {
    /// Creates a source replaying `pattern` from its first byte.
    #[must_use]
    pub fn new(pattern: impl Into<Vec<u8>>) -> Self {
        Self {
            pattern: pattern.into(),
            position: 0,
        }
    }

    /// Creates a source replaying the bytes `1, 2, ..., 255` forever.
    #[must_use]
    pub fn counting() -> Self {
        Self::new((1..=255).collect::<Vec<u8>>())
    }
}

impl EntropySource for ReplayEntropy {
    fn fill_non_zero(&mut self, dest: &mut [u8]) -> Result<(), RandomError> {
        if self.pattern.iter().all(|&b| b == 0) {
            return Err(RandomError::Entropy {
                context: "replay pattern holds no non-zero bytes".to_owned(),
            });
        }
        for slot in dest.iter_mut() {
            loop {
                let byte = self.pattern[self.position % self.pattern.len()];
                self.position = (self.position + 1) % self.pattern.len();
                if byte != 0 {
                    *slot = byte;
                    break;
                }
            }
        }
        Ok(())
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

    #[test]
    fn test_os_entropy_fills_non_zero() {
        let mut buf = [0u8; 128];
        OsEntropy::new().fill_non_zero(&mut buf).unwrap();
        assert!(buf.iter().all(|&b| b != 0));
    }

    #[test]
    fn test_os_entropy_differs_between_calls() {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        OsEntropy.fill_non_zero(&mut a).unwrap();
        OsEntropy.fill_non_zero(&mut b).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_replay_skips_zeros_and_wraps() {
        let mut source = ReplayEntropy::new(vec![0, 7, 0, 9]);
        let mut buf = [0u8; 5];
        source.fill_non_zero(&mut buf).unwrap();
        assert_eq!(buf, [7, 9, 7, 9, 7]);
    }

    #[test]
    fn test_replay_continues_across_calls() {
        let mut source = ReplayEntropy::counting();
        let mut first = [0u8; 3];
        let mut second = [0u8; 3];
        source.fill_non_zero(&mut first).unwrap();
        source.fill_non_zero(&mut second).unwrap();
        assert_eq!(first, [1, 2, 3]);
        assert_eq!(second, [4, 5, 6]);
    }

    #[test]
    fn test_replay_all_zero_pattern_is_an_error() {
        let mut source = ReplayEntropy::new(vec![0, 0]);
        let mut buf = [0u8; 4];
        assert!(matches!(
            source.fill_non_zero(&mut buf),
            Err(RandomError::Entropy { .. })
        ));

        let mut empty = ReplayEntropy::new(Vec::new());
        assert!(empty.fill_non_zero(&mut buf).is_err());
    }
}
