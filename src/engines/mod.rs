//! The generator families.
//!
//! Each family is a plain state struct implementing [`Engine`]: a
//! deterministic `advance`, a seed loader with its own fix-ups, and a
//! `Default` documented on the type. Families that support stream splitting
//! expose `jump` operations as inherent methods.
//!
//! | Family | Types | Word |
//! |---|---|---|
//! | SplitMix | [`SplitMix64`] | u64 |
//! | Xoroshiro | [`Xoroshiro1024Star`], [`Xoroshiro1024StarStar`], [`Xoroshiro1024PlusPlus`] | u64 |
//! | PCG | see [`pcg`] | u32 / u64 |
//! | Romu | [`RomuDuo`], [`RomuDuoJr`], [`RomuTrio`], [`RomuQuad`], [`RomuTrio32`] | u64 / u32 |
//! | SFC | [`Sfc32`], [`Sfc64`] | u32 / u64 |
//! | JSF | [`Jsf32`], [`Jsf64`] | u32 / u64 |
//! | LXM | [`L32X64Mix`], [`L64X128Mix`] | u32 / u64 |
//! | Middle-square Weyl | [`MiddleSquareWeyl64`] | u64 |
//! | GF(2) linear | [`Seiran`], [`Shioi`] | u64 |
//! | ChaCha round | [`Tyche`], [`TycheI`] | u32 |
//! | gjrand | [`Gjrand64`] | u64 |
//!
//! [`Engine`]: crate::engine::Engine

mod gjrand;
mod jsf;
mod lxm;
mod msws;
pub mod pcg;
mod romu;
mod seiran;
mod sfc;
mod shioi;
mod splitmix;
mod tyche;
mod xoroshiro;

pub use gjrand::Gjrand64;
pub use jsf::{Jsf32, Jsf64};
pub use lxm::{L32X64Mix, L64X128Mix};
pub use msws::MiddleSquareWeyl64;
pub use pcg::{
    Pcg32RxsMXs, Pcg32XshRr, Pcg32XshRs, Pcg32XslRr, Pcg64RxsMXs, Pcg64XshRr, Pcg64XslRrRr,
    PcgMcgXshRr32, PcgMcgXslRr32, PcgMcgXslRs32,
};
pub use romu::{RomuDuo, RomuDuoJr, RomuQuad, RomuTrio, RomuTrio32};
pub use seiran::Seiran;
pub use sfc::{Sfc32, Sfc64};
pub use shioi::Shioi;
pub use splitmix::SplitMix64;
pub use tyche::{Tyche, TycheI};
pub use xoroshiro::{Xoroshiro1024PlusPlus, Xoroshiro1024Star, Xoroshiro1024StarStar};
