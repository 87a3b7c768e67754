//! Plain records describing the full mutable state of a combat.
//!
//! These types are the save boundary: they carry only ids, numbers and flags,
//! never templates or handlers. Cards are stored as [`CardRecord`]s and
//! rebuilt by the caller's catalog lookup on restore.

use super::card::CardRecord;
use super::vitals::{CombatStats, Vitals};
use super::CombatStatus;
use crate::turn::{TurnCounters, TurnPhase};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerRecord {
    pub vitals: Vitals,
    pub energy: u32,
    pub max_energy: u32,
    pub stats: CombatStats,
    pub gold: u32,
    /// `(relic id, counter)` in obtain order.
    pub relic_counters: Vec<(String, u32)>,
    /// Potion ids per slot.
    pub potions: Vec<Option<String>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyRecord {
    pub id: String,
    pub vitals: Vitals,
    pub stats: CombatStats,
    pub current_intent: Option<usize>,
}

/// Pile contents, each in pile order (draw pile top is the last entry).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PilesRecord {
    pub draw: Vec<CardRecord>,
    pub hand: Vec<CardRecord>,
    pub discard: Vec<CardRecord>,
    pub exhaust: Vec<CardRecord>,
}

impl PilesRecord {
    pub fn total(&self) -> usize {
        self.draw.len() + self.hand.len() + self.discard.len() + self.exhaust.len()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnRecord {
    pub turn: u32,
    pub phase: TurnPhase,
    pub counters: TurnCounters,
    pub first_attack_played: bool,
}

/// Everything needed to resume a combat.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatSnapshot {
    pub status: CombatStatus,
    pub rng_state: u64,
    pub player: PlayerRecord,
    pub enemies: Vec<EnemyRecord>,
    pub piles: PilesRecord,
    pub turn: TurnRecord,
    /// Energy granted by the next `start_combat()`.
    pub pending_energy_bonus: u32,
}
