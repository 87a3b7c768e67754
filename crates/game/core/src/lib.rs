//! Deterministic card-combat rules and data types.
//!
//! `combat-core` defines the numeric model, the card pile manager, the turn
//! state machine and the participant/content types. It performs no I/O and
//! emits no logs; orchestration, effect dispatch and notifications live in
//! `combat-runtime`, which depends on the types re-exported here.
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod piles;
pub mod state;
pub mod turn;

pub use combat::{DamageOutcome, apply_damage, calculate_block, calculate_damage};
pub use config::CombatConfig;
pub use env::{CombatRng, PcgRng};
pub use error::{CombatError, ErrorSeverity};
pub use piles::{CardPiles, DrawOutcome, HandCleanup, PileError, PilePosition};
pub use state::{
    Card, CardEffect, CardKeywords, CardRecord, CardTemplate, CardType, CardUid, CardUpgrade,
    CombatOutcome, CombatSnapshot, CombatStats, CombatStatus, Combatant, Enemy, EnemyAction,
    EnemyMove, EnemyRecord, EnemyTemplate, PilesRecord, Player, PlayerRecord, Potion,
    PotionEffect, Relic, RelicEffect, RelicRarity, RelicTrigger, StatusEffects, StatusKind,
    TargetType, TurnRecord, UNPLAYABLE_COST, Vitals,
};
pub use turn::{CardPlayRecord, TurnCounters, TurnError, TurnManager, TurnPhase};
