use std::sync::Arc;

use combat_core::{
    CardPiles, CombatConfig, CombatStatus, Enemy, EnemyTemplate, PcgRng, Player, TurnManager,
};

use super::{BuildError, CombatManager};
use crate::effects::EffectRegistries;
use crate::events::EventBus;
use crate::relics::RelicManager;

/// Builder for [`CombatManager`].
///
/// A player and at least one enemy are required. Everything else falls back
/// to defaults: built-in effect registries, a fresh relic manager, a new event
/// bus and seed 0.
pub struct CombatBuilder {
    config: CombatConfig,
    player: Option<Player>,
    enemies: Vec<Enemy>,
    relics: Option<RelicManager>,
    registries: Option<Arc<EffectRegistries>>,
    events: Option<EventBus>,
    seed: u64,
}

impl CombatBuilder {
    pub(super) fn new() -> Self {
        Self {
            config: CombatConfig::default(),
            player: None,
            enemies: Vec::new(),
            relics: None,
            registries: None,
            events: None,
            seed: 0,
        }
    }

    /// Override combat configuration
    pub fn config(mut self, config: CombatConfig) -> Self {
        self.config = config;
        self
    }

    pub fn player(mut self, player: Player) -> Self {
        self.player = Some(player);
        self
    }

    /// Append an enemy to the roster.
    pub fn enemy(mut self, enemy: Enemy) -> Self {
        self.enemies.push(enemy);
        self
    }

    /// Append an enemy instantiated from a template.
    pub fn enemy_template(self, template: &EnemyTemplate) -> Self {
        self.enemy(Enemy::from_template(template))
    }

    pub fn enemies(mut self, enemies: impl IntoIterator<Item = Enemy>) -> Self {
        self.enemies.extend(enemies);
        self
    }

    /// Carry run-level relic state (pending bonuses) into this combat.
    pub fn relic_manager(mut self, relics: RelicManager) -> Self {
        self.relics = Some(relics);
        self
    }

    /// Set custom effect registries.
    ///
    /// If not provided, [`EffectRegistries::with_defaults`] is used.
    pub fn registries(mut self, registries: Arc<EffectRegistries>) -> Self {
        self.registries = Some(registries);
        self
    }

    /// Publish to an existing bus (to keep subscriptions across combats).
    pub fn event_bus(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    /// Seed for shuffles, intents and random targets.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Build the combat manager
    pub fn build(self) -> Result<CombatManager, BuildError> {
        let player = self.player.ok_or(BuildError::MissingPlayer)?;
        if self.enemies.is_empty() {
            return Err(BuildError::NoEnemies);
        }

        Ok(CombatManager {
            config: self.config,
            status: CombatStatus::NotStarted,
            player,
            enemies: self.enemies,
            piles: CardPiles::new(),
            turns: TurnManager::new(),
            relics: self.relics.unwrap_or_default(),
            registries: self
                .registries
                .unwrap_or_else(|| Arc::new(EffectRegistries::with_defaults())),
            events: self.events.unwrap_or_default(),
            rng: PcgRng::seed_from_u64(self.seed),
        })
    }
}
