//! Combat participants and content data.
//!
//! Templates ([`CardTemplate`], [`EnemyTemplate`], [`Relic`], [`Potion`]) are
//! supplied fully resolved by the caller. Instances copy what they need so
//! that mutation during combat never reaches shared content.
pub mod card;
pub mod enemy;
pub mod player;
pub mod potion;
pub mod relic;
pub mod snapshot;
pub mod status;
pub mod vitals;

pub use card::{
    Card, CardEffect, CardKeywords, CardRecord, CardTemplate, CardType, CardUid, CardUpgrade,
    TargetType, UNPLAYABLE_COST,
};
pub use enemy::{Enemy, EnemyAction, EnemyMove, EnemyTemplate};
pub use player::{Player, PotionSlots};
pub use potion::{Potion, PotionEffect};
pub use relic::{Relic, RelicEffect, RelicRarity, RelicTrigger};
pub use snapshot::{CombatSnapshot, EnemyRecord, PilesRecord, PlayerRecord, TurnRecord};
pub use status::{StatusEffects, StatusKind};
pub use vitals::{CombatStats, Combatant, Vitals};

/// How a finished combat ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CombatOutcome {
    Victory,
    Defeat,
}

/// Lifecycle of one combat: `NotStarted → InCombat → Ended`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatStatus {
    #[default]
    NotStarted,
    InCombat,
    Ended(CombatOutcome),
}

impl CombatStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::InCombat)
    }

    pub fn is_ended(&self) -> bool {
        matches!(self, Self::Ended(_))
    }

    pub fn outcome(&self) -> Option<CombatOutcome> {
        match self {
            Self::Ended(outcome) => Some(*outcome),
            _ => None,
        }
    }
}
