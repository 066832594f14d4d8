use std::error::Error;
use std::fmt;
use std::fmt::Display;

/// This enum contains all error messages this library can return. Most API functions will generally return a [`Result<T, RandomError>`].
///
/// Every variant except [`RandomError::NotImplemented`], [`RandomError::Entropy`],
/// [`RandomError::Cancelled`] and [`RandomError::InternalError`] describes an invalid
/// argument; see [`RandomError::is_invalid_argument`].
///
/// [`Result<T, RandomError>`]: std::result::Result
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RandomError {
    /// A seed slice was empty.
    EmptySeed,
    /// A seed slice held fewer words than the generator state needs.
    SeedTooShort {
        /// Number of words the generator consumes.
        required: usize,
        /// Number of words that were provided.
        provided: usize,
    },
    /// A buffer to fill was empty.
    EmptyBuffer,
    /// A requested length was zero.
    InvalidLength {
        /// The rejected length.
        length: usize,
    },
    /// The lower bound of a range was greater than the upper bound.
    BoundsSwapped {
        /// The lower bound as given.
        min: String,
        /// The upper bound as given.
        max: String,
    },
    /// A signed bound was negative.
    NegativeBound {
        /// The lower bound as given.
        min: i64,
        /// The upper bound as given.
        max: i64,
    },
    /// A distribution parameter was outside its domain.
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
    /// A sequence operation received no items.
    EmptyItems,
    /// The number of items to select was zero or exceeded what the operation allows.
    InvalidSelection {
        /// Requested number of items.
        select: usize,
        /// Number of items available.
        length: usize,
    },
    /// The operation is intentionally not provided by this generator.
    NotImplemented {
        /// The algorithm and operation that is missing.
        operation: &'static str,
    },
    /// The entropy source failed to produce bytes.
    Entropy {
        /// A description of the failure.
        context: String,
    },
    /// A cancellation token was triggered before the operation started.
    Cancelled,
    /// An algorithm name did not match any known generator.
    UnknownAlgorithm {
        /// The name that failed to parse.
        name: String,
    },
    /// An internal error occurred that should not happen under normal operation.
    /// If you encounter this error, please report it as a bug.
    InternalError {
        /// A description of the internal error.
        context: String,
    },
}

impl RandomError {
    /// Returns `true` for errors caused by the arguments of the failing call.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::EmptySeed
                | Self::SeedTooShort { .. }
                | Self::EmptyBuffer
                | Self::InvalidLength { .. }
                | Self::BoundsSwapped { .. }
                | Self::NegativeBound { .. }
                | Self::InvalidParameter { .. }
                | Self::EmptyItems
                | Self::InvalidSelection { .. }
                | Self::UnknownAlgorithm { .. }
        )
    }
}

impl Display for RandomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RandomError::EmptySeed => write!(f, "Seed can't be empty."),
            RandomError::SeedTooShort { required, provided } => {
                write!(
                    f,
                    "Seed needs at least {} words, but {} were provided.",
                    required, provided
                )
            }
            RandomError::EmptyBuffer => write!(f, "Buffer to fill can't be empty."),
            RandomError::InvalidLength { length } => {
                write!(f, "Invalid length {}: must be at least 1.", length)
            }
            RandomError::BoundsSwapped { min, max } => {
                write!(
                    f,
                    "Lower bound {} is greater than upper bound {}.",
                    min, max
                )
            }
            RandomError::NegativeBound { min, max } => {
                write!(f, "Bounds [{}, {}) must not be negative.", min, max)
            }
            RandomError::InvalidParameter { name, reason } => {
                write!(f, "Invalid parameter `{}`: {}", name, reason)
            }
            RandomError::EmptyItems => write!(f, "Items can't be empty."),
            RandomError::InvalidSelection { select, length } => {
                write!(
                    f,
                    "Can't select {} elements from {} items.",
                    select, length
                )
            }
            RandomError::NotImplemented { operation } => {
                write!(f, "{} is not implemented.", operation)
            }
            RandomError::Entropy { context } => write!(f, "Entropy source failed: {}", context),
            RandomError::Cancelled => write!(f, "Operation was cancelled before it started."),
            RandomError::UnknownAlgorithm { name } => {
                write!(f, "Unknown algorithm name: {}", name)
            }
            RandomError::InternalError { context } => {
                write!(f, "Internal error (please report as bug): {}", context)
            }
        }
    }
}

impl Error for RandomError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_taxonomy() {
        assert!(RandomError::EmptySeed.is_invalid_argument());
        assert!(RandomError::SeedTooShort {
            required: 4,
            provided: 1
        }
        .is_invalid_argument());
        assert!(RandomError::InvalidParameter {
            name: "shape",
            reason: "must be positive".to_owned(),
        }
        .is_invalid_argument());
        assert!(!RandomError::Cancelled.is_invalid_argument());
        assert!(!RandomError::NotImplemented {
            operation: "L64X128Mix::reseed"
        }
        .is_invalid_argument());
    }

    #[test]
    fn test_display_mentions_values() {
        let err = RandomError::BoundsSwapped {
            min: "10".to_owned(),
            max: "3".to_owned(),
        };
        let text = err.to_string();
        assert!(text.contains("10"));
        assert!(text.contains('3'));

        let err = RandomError::SeedTooShort {
            required: 16,
            provided: 2,
        };
        assert_eq!(
            err.to_string(),
            "Seed needs at least 16 words, but 2 were provided."
        );
    }
}
