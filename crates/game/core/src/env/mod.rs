//! Environment inputs consumed by the combat rules.
//!
//! The only environmental dependency of a combat is its random source; content
//! templates arrive fully resolved from the caller.

mod rng;

pub use rng::{CombatRng, PcgRng};
