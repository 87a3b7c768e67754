//! Topic-based event bus for combat notifications.
//!
//! The engine never calls back into host code directly. Every observable
//! change is published to a topic, and consumers subscribe only to the topics
//! they need.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{CardEvent, CombatEvent, Participant, RelicEvent, TurnEvent};
