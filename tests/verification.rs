//! Verification integration tests.
//!
//! This module contains reproducibility, jump and statistical checks run
//! against the public API of every generator family:
//! - Determinism tests - same seed, same stream, for every family
//! - Jump tests - stream-splitting operations agree with stepping
//! - Property tests - property-based testing with proptest
//! - Statistics tests - loose goodness-of-fit checks

mod common;

// Verification test modules
mod verification {
    pub mod determinism;
    pub mod jumps;
    pub mod properties;
    pub mod statistics;
}
