//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

use super::types::{CardEvent, CombatEvent, RelicEvent, TurnEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Card plays and pile movement
    Cards,
    /// Damage, block, potions, combat start/end
    Combat,
    /// Turn management events
    Turn,
    /// Relic activity
    Relics,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Cards(CardEvent),
    Combat(CombatEvent),
    Turn(TurnEvent),
    Relics(RelicEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Cards(_) => Topic::Cards,
            Event::Combat(_) => Topic::Combat,
            Event::Turn(_) => Topic::Turn,
            Event::Relics(_) => Topic::Relics,
        }
    }
}

impl From<CardEvent> for Event {
    fn from(event: CardEvent) -> Self {
        Event::Cards(event)
    }
}

impl From<CombatEvent> for Event {
    fn from(event: CombatEvent) -> Self {
        Event::Combat(event)
    }
}

impl From<TurnEvent> for Event {
    fn from(event: TurnEvent) -> Self {
        Event::Turn(event)
    }
}

impl From<RelicEvent> for Event {
    fn from(event: RelicEvent) -> Self {
        Event::Relics(event)
    }
}

/// Per-topic broadcast senders, created once with the bus.
struct Channels {
    cards: broadcast::Sender<Event>,
    combat: broadcast::Sender<Event>,
    turn: broadcast::Sender<Event>,
    relics: broadcast::Sender<Event>,
}

impl Channels {
    fn get(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Cards => &self.cards,
            Topic::Combat => &self.combat,
            Topic::Turn => &self.turn,
            Topic::Relics => &self.relics,
        }
    }
}

/// Topic-based event bus
///
/// Each topic is a bounded `tokio::sync::broadcast` channel. Publishing and
/// `Receiver::try_recv` are plain synchronous calls, so no async runtime is
/// needed. A subscriber that falls more than `capacity` events behind loses
/// the oldest ones and sees `TryRecvError::Lagged` on its next read.
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Default per-topic buffer.
    pub const DEFAULT_CAPACITY: usize = 256;

    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                cards: broadcast::channel(capacity).0,
                combat: broadcast::channel(capacity).0,
                turn: broadcast::channel(capacity).0,
                relics: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: impl Into<Event>) {
        let event = event.into();
        let topic = event.topic();

        if self.channels.get(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!(target: "combat::events", ?topic, "No subscribers for topic");
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events published after this
    /// call, and only for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels.get(topic).subscribe()
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }

    /// Number of live receivers for a topic.
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.channels.get(topic).receiver_count()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            channels: Arc::clone(&self.channels),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::TryRecvError;

    #[test]
    fn subscribers_only_see_their_topic() {
        let bus = EventBus::new();
        let mut turns = bus.subscribe(Topic::Turn);
        let mut cards = bus.subscribe(Topic::Cards);

        bus.publish(TurnEvent::PlayerTurnStarted { turn: 1 });

        assert_eq!(
            turns.try_recv().ok(),
            Some(Event::Turn(TurnEvent::PlayerTurnStarted { turn: 1 }))
        );
        assert_eq!(cards.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn dropped_receivers_are_not_counted() {
        let bus = EventBus::new();
        let rx = bus.subscribe(Topic::Combat);
        assert_eq!(bus.subscriber_count(Topic::Combat), 1);

        drop(rx);
        bus.publish(CombatEvent::Started { enemies: 1 });

        assert_eq!(bus.subscriber_count(Topic::Combat), 0);
    }

    #[test]
    fn clones_share_subscribers() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe(Topic::Relics);

        bus.clone().publish(RelicEvent::Obtained {
            relic_id: "anchor".into(),
        });

        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn subscribe_multiple_routes_each_topic() {
        let bus = EventBus::new();
        let mut receivers = bus.subscribe_multiple(&[Topic::Cards, Topic::Relics]);
        assert_eq!(receivers.len(), 2);

        bus.publish(RelicEvent::Obtained {
            relic_id: "anchor".into(),
        });
        bus.publish(TurnEvent::PlayerTurnStarted { turn: 2 });

        let relics = receivers.get_mut(&Topic::Relics).unwrap();
        assert!(matches!(relics.try_recv(), Ok(Event::Relics(_))));
        let cards = receivers.get_mut(&Topic::Cards).unwrap();
        assert_eq!(cards.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn idle_subscriber_is_bounded_and_told_it_lagged() {
        let bus = EventBus::with_capacity(2);
        let mut rx = bus.subscribe(Topic::Turn);

        for turn in 1..=5 {
            bus.publish(TurnEvent::PlayerTurnStarted { turn });
        }

        assert_eq!(rx.try_recv(), Err(TryRecvError::Lagged(3)));
        assert_eq!(
            rx.try_recv().ok(),
            Some(Event::Turn(TurnEvent::PlayerTurnStarted { turn: 4 }))
        );
        assert_eq!(
            rx.try_recv().ok(),
            Some(Event::Turn(TurnEvent::PlayerTurnStarted { turn: 5 }))
        );
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
    }
}
