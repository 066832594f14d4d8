//! Convenient re-exports for common usage.
//!
//! ```rust
//! use fortress_random::prelude::*;
//!
//! let mut rng = Generator::<Sfc64>::seed_from_u64(1);
//! let coin = rng.next_bool();
//! # let _ = coin;
//! ```
//!
//! # What's Included
//!
//! - **Traits**: [`Rng`], [`Engine`], [`Reseed`], [`EntropySource`]
//! - **Instances**: [`Generator`], [`AnyEngine`], [`GeneratorBuilder`], [`Algorithm`]
//! - **Entropy**: [`OsEntropy`]
//! - **Error handling**: [`RandomError`], [`RandomResult`]
//! - **Engines**: every type in [`crate::engines`]

pub use crate::config::{Algorithm, AnyEngine, GeneratorBuilder};
pub use crate::engine::{Engine, Reseed};
pub use crate::engines::*;
pub use crate::entropy::{EntropySource, OsEntropy};
pub use crate::error::RandomError;
pub use crate::generator::Generator;
pub use crate::rng::Rng;
pub use crate::RandomResult;
