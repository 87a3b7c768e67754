//! Execution context handed to effect handlers.

use combat_core::combat::{self, DamageOutcome};
use combat_core::{
    Card, CardPiles, CombatConfig, CombatRng, Enemy, PcgRng, PileError, Player, RelicTrigger,
    TargetType, TurnCounters,
};
use tracing::{info, warn};

use super::EffectRegistries;
use crate::events::{CardEvent, CombatEvent, EventBus, Participant};
use crate::relics::{self, RelicManager};

/// Mutable view of a combat handed to every effect handler.
///
/// Card, relic and potion handlers share this one shape. Participants and
/// piles are exposed directly; the methods form the actions facade for the
/// operations that must also publish events or fire relic triggers.
pub struct EffectContext<'a> {
    pub player: &'a mut Player,
    pub enemies: &'a mut [Enemy],
    pub piles: &'a mut CardPiles,
    /// Counters as of the start of this effect chain.
    pub counters: TurnCounters,
    /// Index of the chosen enemy target, if any.
    pub target: Option<usize>,
    /// Targeting of the card or potion being resolved.
    pub target_type: TargetType,
    /// Energy paid for the card being played.
    pub energy_spent: u32,
    pub is_x_cost: bool,
    rng: &'a mut PcgRng,
    bus: &'a EventBus,
    registries: &'a EffectRegistries,
    relic_state: &'a mut RelicManager,
    depth: u8,
}

impl<'a> EffectContext<'a> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        player: &'a mut Player,
        enemies: &'a mut [Enemy],
        piles: &'a mut CardPiles,
        counters: TurnCounters,
        rng: &'a mut PcgRng,
        bus: &'a EventBus,
        registries: &'a EffectRegistries,
        relic_state: &'a mut RelicManager,
    ) -> Self {
        Self {
            player,
            enemies,
            piles,
            counters,
            target: None,
            target_type: TargetType::Caster,
            energy_spent: 0,
            is_x_cost: false,
            rng,
            bus,
            registries,
            relic_state,
            depth: 0,
        }
    }

    pub(crate) fn with_target(mut self, target: Option<usize>, target_type: TargetType) -> Self {
        self.target = target;
        self.target_type = target_type;
        self
    }

    pub(crate) fn with_energy(mut self, energy_spent: u32, is_x_cost: bool) -> Self {
        self.energy_spent = energy_spent;
        self.is_x_cost = is_x_cost;
        self
    }

    pub fn rng(&mut self) -> &mut PcgRng {
        &mut *self.rng
    }

    pub fn events(&self) -> &EventBus {
        self.bus
    }

    pub fn registries(&self) -> &'a EffectRegistries {
        self.registries
    }

    pub fn relic_state(&mut self) -> &mut RelicManager {
        &mut *self.relic_state
    }

    /// Resolves an effect value: X-cost cards with a value of 0 use the
    /// energy spent instead.
    pub fn effect_value(&self, value: i32) -> i32 {
        if self.is_x_cost && value == 0 {
            self.energy_spent as i32
        } else {
            value
        }
    }

    // ========================================================================
    // Targeting
    // ========================================================================

    /// Indices of living enemies in roster order.
    pub fn alive_enemies(&self) -> Vec<usize> {
        self.enemies
            .iter()
            .enumerate()
            .filter(|(_, e)| e.vitals.is_alive())
            .map(|(i, _)| i)
            .collect()
    }

    /// A uniformly chosen living enemy.
    pub fn random_enemy(&mut self) -> Option<usize> {
        let alive = self.alive_enemies();
        if alive.is_empty() {
            return None;
        }
        let pick = self.rng.gen_range(alive.len());
        alive.get(pick).copied()
    }

    /// Enemy indices an effect applies to.
    ///
    /// `override_target` replaces the card's own target type. `Caster`
    /// resolves to no enemies.
    pub fn enemy_targets(&mut self, override_target: Option<TargetType>) -> Vec<usize> {
        match override_target.unwrap_or(self.target_type) {
            TargetType::SingleEnemy => self
                .target
                .filter(|&i| self.enemies.get(i).is_some_and(|e| e.vitals.is_alive()))
                .into_iter()
                .collect(),
            TargetType::AllEnemies => self.alive_enemies(),
            TargetType::RandomEnemy => self.random_enemy().into_iter().collect(),
            TargetType::Caster => Vec::new(),
        }
    }

    // ========================================================================
    // Damage
    // ========================================================================

    /// Player attack against one enemy: Strength, Weak and Vulnerable apply.
    ///
    /// Returns `None` if the enemy does not exist or is already dead.
    pub fn deal_damage_to_enemy(&mut self, index: usize, base: i32) -> Option<DamageOutcome> {
        let bonus = RelicManager::low_hp_strength_bonus(&*self.player);
        let enemy = self.enemies.get_mut(index).filter(|e| e.vitals.is_alive())?;
        let outcome = combat::attack(base, bonus, &*self.player, enemy);
        self.report_enemy_damage(Some(Participant::Player), index, outcome);
        Some(outcome)
    }

    /// Player attack against every living enemy, in roster order.
    pub fn deal_damage_to_all_enemies(&mut self, base: i32) -> Vec<(usize, DamageOutcome)> {
        self.alive_enemies()
            .into_iter()
            .filter_map(|i| self.deal_damage_to_enemy(i, base).map(|o| (i, o)))
            .collect()
    }

    /// Damage that ignores the player's Strength and Weak (potions, relics).
    /// The target's Vulnerable still applies.
    pub fn deal_fixed_damage_to_enemy(&mut self, index: usize, amount: i32) -> Option<DamageOutcome> {
        let enemy = self.enemies.get_mut(index).filter(|e| e.vitals.is_alive())?;
        let damage = combat::calculate_damage(amount, 0, false, enemy.stats.statuses.is_vulnerable());
        let outcome = combat::apply_damage(&mut enemy.vitals, damage);
        self.report_enemy_damage(Some(Participant::Player), index, outcome);
        Some(outcome)
    }

    fn report_enemy_damage(&self, source: Option<Participant>, index: usize, outcome: DamageOutcome) {
        self.bus.publish(CombatEvent::DamageDealt {
            source,
            target: Participant::Enemy(index),
            amount: outcome.hp_lost,
            blocked: outcome.blocked,
        });
        if outcome.is_lethal() {
            let enemy_id = self.enemies.get(index).map(|e| e.id.clone()).unwrap_or_default();
            self.bus.publish(CombatEvent::EnemyDied { index, enemy_id });
        }
    }

    /// HP loss on the player that bypasses block. Reduced by HP-loss relics.
    pub fn player_lose_hp(&mut self, amount: u32) -> u32 {
        let reduced = amount.saturating_sub(RelicManager::hp_loss_reduction(&*self.player));
        let lost = self.player.vitals.lose_hp(reduced);
        self.bus.publish(CombatEvent::DamageDealt {
            source: None,
            target: Participant::Player,
            amount: lost,
            blocked: 0,
        });
        lost
    }

    // ========================================================================
    // Block
    // ========================================================================

    /// Card block for the player: Dexterity and Frail apply.
    pub fn gain_block(&mut self, value: i32) -> u32 {
        let amount = combat::gain_block(&mut *self.player, value);
        self.report_block(amount);
        amount
    }

    /// Block that bypasses Dexterity and Frail.
    pub fn gain_raw_block(&mut self, value: i32) -> u32 {
        let amount = combat::gain_raw_block(&mut *self.player, value);
        self.report_block(amount);
        amount
    }

    fn report_block(&self, amount: u32) {
        if amount > 0 {
            self.bus.publish(CombatEvent::BlockGained {
                target: Participant::Player,
                amount,
            });
        }
    }

    // ========================================================================
    // Cards
    // ========================================================================

    /// Draws up to `count` cards, publishing draws and shuffles.
    ///
    /// Each reshuffle fires `onShuffle` relics. Returns the number drawn.
    pub fn draw_cards(&mut self, count: usize) -> usize {
        let discard_size = self.piles.discard_pile().len();
        let outcome = self.piles.draw_cards(count, &mut *self.rng);

        if outcome.shuffles > 0 {
            self.bus.publish(CardEvent::Shuffled { cards: discard_size });
        }
        for &uid in &outcome.drawn {
            self.bus.publish(CardEvent::Drawn { uid });
        }
        for _ in 0..outcome.shuffles {
            self.trigger_relics(RelicTrigger::OnShuffle);
        }
        outcome.drawn.len()
    }

    /// Adds a card to the hand. A full hand hands the card back in the error.
    pub fn add_card_to_hand(&mut self, card: Card) -> Result<(), PileError> {
        let uid = card.uid;
        self.piles.add_to_hand(card)?;
        self.bus.publish(CardEvent::AddedToHand { uid });
        Ok(())
    }

    // ========================================================================
    // Relics
    // ========================================================================

    /// Fires every relic effect bound to `trigger`, in obtain order.
    ///
    /// Triggers raised from inside relic effects nest up to
    /// [`CombatConfig::MAX_RELIC_TRIGGER_DEPTH`] levels; deeper triggers are
    /// dropped with a warning.
    pub fn trigger_relics(&mut self, trigger: RelicTrigger) -> usize {
        if self.depth >= CombatConfig::MAX_RELIC_TRIGGER_DEPTH {
            warn!(
                target: "combat::relics",
                trigger = trigger.as_ref(),
                depth = self.depth,
                "Relic trigger depth exceeded, dropping trigger"
            );
            return 0;
        }

        // Relics gained during this walk wait for the next trigger.
        let count = self.player.relics().len();
        self.depth += 1;
        let mut fired = 0;
        for index in 0..count {
            fired += relics::fire(index, trigger, &mut *self);
        }
        self.depth -= 1;
        fired
    }

    /// Free-form diagnostic line from an effect handler.
    pub fn log(&self, message: &str) {
        info!(target: "combat::effects", "{}", message);
    }
}
