//! Combat orchestration on top of `combat-core`.
//!
//! This crate drives a single encounter: it validates player requests, routes
//! card, relic and potion effects through string-keyed registries, walks relic
//! triggers, and publishes every observable change on a topic-based bus.
//!
//! Modules are organized by responsibility:
//! - [`engine`] hosts the combat manager and its builder
//! - [`effects`] holds the effect registries, the effect context and the
//!   built-in effect catalogue
//! - [`relics`] dispatches relic triggers and answers passive relic queries
//! - [`events`] provides the topic-based event bus
pub mod effects;
pub mod engine;
pub mod events;
pub mod relics;

pub use combat_core;

pub use effects::{
    CardEffectKind, EffectContext, EffectHandler, EffectKey, EffectOutcome, EffectRegistries,
    EffectRegistry, PassiveAction, PotionEffectKind, RelicAction,
};
pub use engine::{
    BuildError, CombatBuilder, CombatManager, FlowError, PlayError, PlayOutcome, PotionError,
    SnapshotError,
};
pub use events::{
    CardEvent, CombatEvent, Event, EventBus, Participant, RelicEvent, Topic, TurnEvent,
};
pub use relics::RelicManager;
