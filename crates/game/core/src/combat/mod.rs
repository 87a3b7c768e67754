//! Combat arithmetic.
//!
//! Pure functions for the numeric model shared by cards, potions, relics and
//! enemy moves. Nothing here touches piles, turns or registries.
//!
//! # Core Functions
//!
//! - `calculate_damage`: base + Strength, then Weak, then Vulnerable, clamped
//! - `apply_damage`: block absorbs first, remainder goes to HP
//! - `calculate_block`: value + Dexterity, then Frail, clamped
//! - `gain_block` / `gain_raw_block`: add block to a participant

pub mod block;
pub mod damage;

pub use block::{calculate_block, gain_block, gain_raw_block};
pub use damage::{DamageOutcome, apply_damage, apply_damage_reduced, attack, calculate_damage};
