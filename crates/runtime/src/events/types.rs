//! Typed events published by the combat manager.

use combat_core::{CardType, CardUid, CombatOutcome, RelicTrigger};
use serde::{Deserialize, Serialize};

/// A combat participant referenced by an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Participant {
    Player,
    /// Index into the combat's enemy roster.
    Enemy(usize),
}

/// Card movement and card plays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardEvent {
    Played {
        uid: CardUid,
        card_id: String,
        card_type: CardType,
        target: Option<usize>,
        energy_spent: u32,
    },
    Drawn {
        uid: CardUid,
    },
    Discarded {
        uid: CardUid,
    },
    Exhausted {
        uid: CardUid,
    },
    /// A card created mid-combat entered the hand.
    AddedToHand {
        uid: CardUid,
    },
    /// The discard pile was shuffled into the draw pile.
    Shuffled {
        cards: usize,
    },
}

/// Damage, block, potions and the combat lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatEvent {
    Started {
        enemies: usize,
    },
    DamageDealt {
        /// `None` for damage without an attacker (poison).
        source: Option<Participant>,
        target: Participant,
        amount: u32,
        blocked: u32,
    },
    BlockGained {
        target: Participant,
        amount: u32,
    },
    PotionUsed {
        slot: usize,
        potion_id: String,
        target: Option<usize>,
    },
    EnemyDied {
        index: usize,
        enemy_id: String,
    },
    Ended {
        outcome: CombatOutcome,
    },
}

/// Turn flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent {
    PlayerTurnStarted { turn: u32 },
    PlayerTurnEnded { turn: u32 },
    EnemyTurnStarted { turn: u32 },
    /// An enemy telegraphed its next move.
    EnemyIntent { index: usize, move_id: String },
}

/// Relic activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelicEvent {
    Obtained {
        relic_id: String,
    },
    Triggered {
        relic_id: String,
        trigger: RelicTrigger,
        action: String,
    },
}
