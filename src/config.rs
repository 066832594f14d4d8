//! Run-time selection of a generator family.
//!
//! Code that knows its algorithm at compile time uses the engine types
//! directly. Code that reads the choice from configuration uses
//! [`Algorithm`] (serde-serialisable, parseable from its name) and
//! [`GeneratorBuilder`], which produces a [`Generator<AnyEngine>`].
//!
//! # Example
//!
//! ```
//! use fortress_random::config::{Algorithm, GeneratorBuilder};
//! use fortress_random::rng::Rng;
//!
//! let algorithm: Algorithm = "RomuTrio".parse().unwrap();
//! let mut rng = GeneratorBuilder::new(algorithm).with_seed(42).build().unwrap();
//! let roll = rng.next_uint(1, 7).unwrap();
//! assert!((1..7).contains(&roll));
//! assert_eq!(rng.algorithm_name(), "Romu Trio 64-bit");
//! ```
//!
//! # Seeding
//!
//! | Builder call | Engine state |
//! |---|---|
//! | `with_seed(s)` | [`Engine::seed_from_u64`] |
//! | `with_entropy_source(src)` | default state, then one reseed from `src` |
//! | neither | default state, then one reseed from [`OsEntropy`] |

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::engine::{Engine, NativeWord, Reseed};
use crate::engines;
use crate::entropy::{EntropySource, OsEntropy};
use crate::error::RandomError;
use crate::generator::Generator;
use crate::rng::Rng;
use crate::telemetry::{with_observer, ViolationObserver};

macro_rules! algorithms {
    ($($variant:ident),+ $(,)?) => {
        /// A generator family, selectable at run time.
        ///
        /// Variants are named after the engine types in [`crate::engines`].
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum Algorithm {
            $(
                #[doc = concat!("[`", stringify!($variant), "`](crate::engines::", stringify!($variant), ")")]
                $variant,
            )+
        }

        impl Algorithm {
            /// Every algorithm, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The engine's algorithm label, as returned by `algorithm_name()`.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => <engines::$variant as Engine>::NAME,)+
                }
            }

            /// The type name, also the `Display` form.
            #[must_use]
            pub const fn ident(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant),)+
                }
            }

            /// Width of the engine's native word in bits.
            #[must_use]
            pub const fn word_bits(self) -> u32 {
                match self {
                    $(Self::$variant => {
                        (<<engines::$variant as Engine>::Word as NativeWord>::BYTES * 8) as u32
                    },)+
                }
            }
        }

        /// An engine of any family, chosen at run time.
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum AnyEngine {
            $(
                #[doc = concat!("A [`", stringify!($variant), "`](crate::engines::", stringify!($variant), ").")]
                $variant(engines::$variant),
            )+
        }

        impl AnyEngine {
            /// The family's default state.
            #[must_use]
            pub fn new(algorithm: Algorithm) -> Self {
                match algorithm {
                    $(Algorithm::$variant => Self::$variant(engines::$variant::default()),)+
                }
            }

            /// The family seeded through [`Engine::seed_from_u64`].
            #[must_use]
            pub fn seed_from_u64(algorithm: Algorithm, seed: u64) -> Self {
                match algorithm {
                    $(Algorithm::$variant => {
                        Self::$variant(<engines::$variant as Engine>::seed_from_u64(seed))
                    },)+
                }
            }

            /// The family of the wrapped engine.
            #[must_use]
            pub const fn algorithm(&self) -> Algorithm {
                match self {
                    $(Self::$variant(_) => Algorithm::$variant,)+
                }
            }
        }

        impl Rng for AnyEngine {
            #[inline]
            fn next_u32(&mut self) -> u32 {
                match self {
                    $(Self::$variant(engine) => engine.next_u32(),)+
                }
            }

            #[inline]
            fn next_u64(&mut self) -> u64 {
                match self {
                    $(Self::$variant(engine) => engine.next_u64(),)+
                }
            }

            #[inline]
            fn next_bool(&mut self) -> bool {
                match self {
                    $(Self::$variant(engine) => engine.next_bool(),)+
                }
            }

            #[inline]
            fn next_byte(&mut self) -> u8 {
                match self {
                    $(Self::$variant(engine) => engine.next_byte(),)+
                }
            }

            fn fill_bytes(&mut self, dest: &mut [u8]) {
                match self {
                    $(Self::$variant(engine) => engine.fill_bytes(dest),)+
                }
            }
        }

        impl Reseed for AnyEngine {
            fn name(&self) -> &'static str {
                self.algorithm().name()
            }

            fn reseed_with(&mut self, source: &mut dyn EntropySource) -> Result<(), RandomError> {
                match self {
                    $(Self::$variant(engine) => engine.reseed(source),)+
                }
            }
        }
    };
}

algorithms!(
    SplitMix64,
    Xoroshiro1024Star,
    Xoroshiro1024StarStar,
    Xoroshiro1024PlusPlus,
    Pcg32XshRr,
    Pcg32XshRs,
    Pcg32XslRr,
    Pcg32RxsMXs,
    Pcg64RxsMXs,
    Pcg64XslRrRr,
    Pcg64XshRr,
    PcgMcgXshRr32,
    PcgMcgXslRr32,
    PcgMcgXslRs32,
    RomuDuo,
    RomuDuoJr,
    RomuTrio,
    RomuQuad,
    RomuTrio32,
    Sfc32,
    Sfc64,
    Jsf32,
    Jsf64,
    L32X64Mix,
    L64X128Mix,
    MiddleSquareWeyl64,
    Seiran,
    Shioi,
    Tyche,
    TycheI,
    Gjrand64,
);

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ident())
    }
}

/// Parses either the type name (`"Pcg32XshRr"`) or the algorithm label
/// (`"PCG XSH-RR 32-bit"`), ignoring case, spaces, `-` and `_`.
impl FromStr for Algorithm {
    type Err = RandomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::ALL
            .iter()
            .copied()
            .find(|alg| normalize(alg.ident()) == wanted || normalize(alg.name()) == wanted)
            .ok_or_else(|| RandomError::UnknownAlgorithm { name: s.to_owned() })
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

enum SeedSource {
    Fixed(u64),
    Entropy(Box<dyn EntropySource>),
    Os,
}

impl fmt::Debug for SeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(seed) => f.debug_tuple("Fixed").field(seed).finish(),
            Self::Entropy(_) => f.write_str("Entropy(..)"),
            Self::Os => f.write_str("Os"),
        }
    }
}

/// Builds a [`Generator<AnyEngine>`] for an algorithm chosen at run time.
#[must_use = "GeneratorBuilder does nothing until build() is called"]
pub struct GeneratorBuilder {
    algorithm: Algorithm,
    seed: SeedSource,
    violation_observer: Option<Arc<dyn ViolationObserver>>,
}

impl GeneratorBuilder {
    /// Starts a builder that seeds from the operating system unless told otherwise.
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            seed: SeedSource::Os,
            violation_observer: None,
        }
    }

    /// Seeds deterministically from one `u64`.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = SeedSource::Fixed(seed);
        self
    }

    /// Seeds by one reseed call against `source`.
    pub fn with_entropy_source(mut self, source: impl EntropySource + 'static) -> Self {
        self.seed = SeedSource::Entropy(Box::new(source));
        self
    }

    /// Routes violations reported while seeding to `observer` instead of `tracing`.
    ///
    /// ```
    /// use fortress_random::config::{Algorithm, GeneratorBuilder};
    /// use fortress_random::telemetry::CollectingObserver;
    /// use std::sync::Arc;
    ///
    /// let observer = Arc::new(CollectingObserver::new());
    /// let rng = GeneratorBuilder::new(Algorithm::Seiran)
    ///     .with_seed(1)
    ///     .with_violation_observer(observer.clone())
    ///     .build()
    ///     .unwrap();
    /// assert!(observer.is_empty());
    /// # drop(rng);
    /// ```
    pub fn with_violation_observer(mut self, observer: Arc<dyn ViolationObserver>) -> Self {
        self.violation_observer = Some(observer);
        self
    }

    /// Seeds the engine and wraps it in a [`Generator`].
    ///
    /// # Errors
    /// Whatever the reseed fails with: [`RandomError::Entropy`] from the source,
    /// or [`RandomError::NotImplemented`] for families without reseeding
    /// (seed those with [`GeneratorBuilder::with_seed`]).
    pub fn build(self) -> Result<Generator<AnyEngine>, RandomError> {
        let Self {
            algorithm,
            seed,
            violation_observer,
        } = self;
        tracing::debug!(%algorithm, seed = ?seed, "building generator");
        let construct = move || seed_engine(algorithm, seed);
        let engine = match violation_observer {
            Some(observer) => with_observer(observer, construct)?,
            None => construct()?,
        };
        Ok(Generator::new(engine))
    }
}

impl fmt::Debug for GeneratorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorBuilder")
            .field("algorithm", &self.algorithm)
            .field("seed", &self.seed)
            .field("has_violation_observer", &self.violation_observer.is_some())
            .finish()
    }
}

fn seed_engine(algorithm: Algorithm, seed: SeedSource) -> Result<AnyEngine, RandomError> {
    match seed {
        SeedSource::Fixed(seed) => Ok(AnyEngine::seed_from_u64(algorithm, seed)),
        SeedSource::Entropy(mut source) => {
            let mut engine = AnyEngine::new(algorithm);
            engine.reseed_with(source.as_mut())?;
            Ok(engine)
        },
        SeedSource::Os => {
            let mut engine = AnyEngine::new(algorithm);
            engine.reseed_with(&mut OsEntropy)?;
            Ok(engine)
        },
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
    use crate::engines::{Jsf32, Pcg32XshRr, RomuTrio};
    use crate::entropy::ReplayEntropy;
    use crate::telemetry::{CollectingObserver, ViolationKind};
    use std::collections::HashSet;

    /// Breaks the non-zero contract on purpose.
    struct ZeroEntropy;

    impl EntropySource for ZeroEntropy {
        fn fill_non_zero(&mut self, dest: &mut [u8]) -> Result<(), RandomError> {
            dest.fill(0);
            Ok(())
        }
    }

    #[test]
    fn test_display_and_parse_round_trip() {
        for &alg in Algorithm::ALL {
            assert_eq!(alg.to_string().parse::<Algorithm>().unwrap(), alg);
            assert_eq!(alg.name().parse::<Algorithm>().unwrap(), alg);
        }
        assert_eq!(Algorithm::ALL.len(), 31);
    }

    #[test]
    fn test_parse_is_lenient() {
        assert_eq!(
            "pcg_xsh_rr_32_bit".parse::<Algorithm>().unwrap(),
            Algorithm::Pcg32XshRr
        );
        assert_eq!("tyche-i".parse::<Algorithm>().unwrap(), Algorithm::TycheI);
        assert_eq!(
            "mersenne".parse::<Algorithm>(),
            Err(RandomError::UnknownAlgorithm {
                name: "mersenne".to_owned()
            })
        );
    }

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = Algorithm::ALL.iter().map(|a| a.name()).collect();
        assert_eq!(names.len(), Algorithm::ALL.len());
    }

    #[test]
    fn test_word_bits() {
        assert_eq!(Algorithm::Pcg32XshRr.word_bits(), 32);
        assert_eq!(Algorithm::Pcg64XshRr.word_bits(), 64);
        assert_eq!(Algorithm::Tyche.word_bits(), 32);
        assert_eq!(Algorithm::SplitMix64.word_bits(), 64);
    }

    #[test]
    fn test_serde_uses_variant_names() {
        let json = serde_json::to_string(&Algorithm::RomuQuad).unwrap();
        assert_eq!(json, "\"RomuQuad\"");
        let back: Algorithm = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Algorithm::RomuQuad);
    }

    #[test]
    fn test_any_engine_matches_typed_engine() {
        let mut any = AnyEngine::seed_from_u64(Algorithm::Pcg32XshRr, 9);
        let mut typed = Pcg32XshRr::seed_from_u64(9);
        for _ in 0..16 {
            assert_eq!(any.next_u64(), typed.next_u64());
        }
        assert_eq!(any.algorithm(), Algorithm::Pcg32XshRr);
        assert_eq!(AnyEngine::new(Algorithm::Jsf32), AnyEngine::Jsf32(Jsf32::default()));
    }

    #[test]
    fn test_every_algorithm_builds_with_seed() {
        for &alg in Algorithm::ALL {
            let mut a = GeneratorBuilder::new(alg).with_seed(5).build().unwrap();
            let mut b = GeneratorBuilder::new(alg).with_seed(5).build().unwrap();
            assert_eq!(a.next_u64(), b.next_u64(), "{} is not reproducible", alg);
            assert_eq!(a.algorithm_name(), alg.name());
        }
    }

    #[test]
    fn test_entropy_source_matches_engine_reseed() {
        let built = GeneratorBuilder::new(Algorithm::RomuTrio)
            .with_entropy_source(ReplayEntropy::counting())
            .build()
            .unwrap();
        let mut typed = RomuTrio::default();
        typed.reseed(&mut ReplayEntropy::counting()).unwrap();
        assert_eq!(built.rng(), &AnyEngine::RomuTrio(typed));
    }

    #[test]
    fn test_reseed_not_implemented_surfaces() {
        let err = GeneratorBuilder::new(Algorithm::L64X128Mix)
            .with_entropy_source(ReplayEntropy::counting())
            .build()
            .unwrap_err();
        assert!(matches!(err, RandomError::NotImplemented { .. }));
    }

    #[test]
    fn test_os_seeding_builds() {
        let rng = GeneratorBuilder::new(Algorithm::Sfc64).build().unwrap();
        assert_eq!(rng.rng().algorithm(), Algorithm::Sfc64);
    }

    #[test]
    fn test_observer_sees_seed_repairs() {
        let observer = Arc::new(CollectingObserver::new());
        let _rng = GeneratorBuilder::new(Algorithm::RomuTrio)
            .with_entropy_source(ZeroEntropy)
            .with_violation_observer(observer.clone())
            .build()
            .unwrap();
        assert!(observer.has_violation(ViolationKind::DegenerateSeed));
    }

    #[test]
    fn test_builder_debug_hides_source() {
        let builder = GeneratorBuilder::new(Algorithm::Seiran).with_entropy_source(ZeroEntropy);
        let text = format!("{:?}", builder);
        assert!(text.contains("Seiran"));
        assert!(text.contains("Entropy(..)"));
    }
}
