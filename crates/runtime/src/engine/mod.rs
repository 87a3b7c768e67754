//! Combat orchestration.
//!
//! [`CombatManager`] owns one encounter: the player, the enemy roster, the
//! piles, the turn state machine and the RNG. Every player request is
//! validated up front and either applied in full or rejected with no state
//! change.
//!
//! ```text
//! NotStarted ──start_combat──► InCombat ──victory/defeat──► Ended
//! ```
//!
//! Per player action:
//! 1. validate phase, card/slot and target
//! 2. dispatch effects through the registries
//! 3. fire relic triggers
//! 4. publish events
//! 5. check for the end of combat
mod builder;
mod errors;
mod snapshot;

pub use builder::CombatBuilder;
pub use errors::{BuildError, FlowError, PlayError, PotionError, SnapshotError};

use std::sync::Arc;

use combat_core::combat;
use combat_core::turn::{advance_intent, roll_intent};
use combat_core::{
    Card, CardPiles, CardType, CardUid, CombatConfig, CombatError, CombatOutcome, CombatStatus,
    Enemy, EnemyAction, PcgRng, Player, Relic, RelicTrigger, StatusKind, TargetType, TurnCounters,
    TurnError, TurnManager, TurnPhase,
};
use tracing::{debug, info};

use crate::effects::{EffectContext, EffectRegistries};
use crate::events::{
    CardEvent, CombatEvent, Event, EventBus, Participant, RelicEvent, Topic, TurnEvent,
};
use crate::relics::{self, RelicManager};

/// Result of a successful card play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayOutcome {
    pub energy_spent: u32,
    /// The card was the first Attack played this combat.
    pub first_attack: bool,
    /// Combat status after the play resolved.
    pub status: CombatStatus,
}

/// Orchestrator for a single combat encounter.
pub struct CombatManager {
    config: CombatConfig,
    status: CombatStatus,
    player: Player,
    enemies: Vec<Enemy>,
    piles: CardPiles,
    turns: TurnManager,
    relics: RelicManager,
    registries: Arc<EffectRegistries>,
    events: EventBus,
    rng: PcgRng,
}

impl CombatManager {
    /// Create a new builder
    pub fn builder() -> CombatBuilder {
        CombatBuilder::new()
    }

    /// Ends this combat's ownership of run-persistent state.
    pub fn into_parts(self) -> (Player, RelicManager) {
        (self.player, self.relics)
    }

    fn context(&mut self, target: Option<usize>, target_type: TargetType) -> EffectContext<'_> {
        EffectContext::new(
            &mut self.player,
            &mut self.enemies,
            &mut self.piles,
            self.turns.counters(),
            &mut self.rng,
            &self.events,
            &self.registries,
            &mut self.relics,
        )
        .with_target(target, target_type)
    }

    fn trigger_relics(&mut self, trigger: RelicTrigger) -> usize {
        self.context(None, TargetType::Caster).trigger_relics(trigger)
    }

    fn ensure_active(&self) -> Result<(), FlowError> {
        if !self.status.is_active() {
            return Err(FlowError::CombatNotActive(self.status));
        }
        Ok(())
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Starts the combat: resets combat stats, seats innate cards, applies the
    /// pending next-combat energy, rolls intents, fires `onCombatStart` and
    /// draws the opening hand.
    pub fn try_start_combat(&mut self) -> Result<(), FlowError> {
        if self.status != CombatStatus::NotStarted {
            return Err(FlowError::AlreadyStarted(self.status));
        }

        self.player.reset_for_combat();
        let seated = self.piles.initialize_from_deck(self.player.deck(), &mut self.rng);
        self.turns.reset();

        let bonus = self.relics.take_pending_energy();
        self.player.gain_energy(bonus);

        for index in 0..self.enemies.len() {
            roll_intent(&mut self.enemies[index], &mut self.rng);
            self.publish_intent(index);
        }

        self.status = CombatStatus::InCombat;
        info!(
            target: "combat::engine",
            enemies = self.enemies.len(),
            deck = self.player.deck().len(),
            energy_bonus = bonus,
            "Combat started"
        );
        self.events.publish(CombatEvent::Started {
            enemies: self.enemies.len(),
        });

        let turn = self.turns.start_turn();
        self.events.publish(TurnEvent::PlayerTurnStarted { turn });

        let opening_draw = self.config.initial_hand_size.saturating_sub(seated);
        {
            let mut ctx = self.context(None, TargetType::Caster);
            ctx.trigger_relics(RelicTrigger::OnCombatStart);
            ctx.draw_cards(opening_draw);
            ctx.trigger_relics(RelicTrigger::OnTurnStart);
        }
        self.check_combat_end();
        Ok(())
    }

    pub fn start_combat(&mut self) -> bool {
        self.try_start_combat()
            .map_err(|error| self.reject("start_combat", &error))
            .is_ok()
    }

    fn reject(&self, operation: &'static str, error: &dyn CombatError) {
        debug!(
            target: "combat::engine",
            operation,
            code = error.error_code(),
            severity = error.severity().as_str(),
            %error,
            "Request rejected"
        );
    }

    // ========================================================================
    // Card plays
    // ========================================================================

    fn needs_target(card: &Card) -> bool {
        card.target() == TargetType::SingleEnemy
            || card
                .effects()
                .iter()
                .any(|e| e.target == Some(TargetType::SingleEnemy))
    }

    fn is_valid_target(&self, target: Option<usize>) -> bool {
        target
            .and_then(|i| self.enemies.get(i))
            .is_some_and(|e| e.vitals.is_alive())
    }

    /// Checks a card play without touching state. Returns the energy to pay.
    fn validate_play(&self, uid: CardUid, target: Option<usize>) -> Result<u32, PlayError> {
        if !self.status.is_active() {
            return Err(PlayError::CombatNotActive(self.status));
        }
        if !self.turns.is_player_turn() {
            return Err(PlayError::NotPlayerTurn(self.turns.phase()));
        }
        let card = self
            .piles
            .hand_card(uid)
            .ok_or(PlayError::CardNotInHand(uid))?;
        if !card.is_playable() {
            return Err(PlayError::Unplayable(uid));
        }

        let available = self.player.energy;
        let required = if card.is_x_cost() {
            available
        } else {
            card.cost().max(0) as u32
        };
        if required > available {
            return Err(PlayError::InsufficientEnergy {
                required,
                available,
            });
        }

        if Self::needs_target(card) && !self.is_valid_target(target) {
            return Err(PlayError::InvalidTarget(target));
        }
        Ok(required)
    }

    /// Plays a card from hand.
    ///
    /// On success: energy is spent (X-cost spends everything), the card
    /// leaves the hand, counters update and type triggers fire, effects run in
    /// order, `onCardPlayed` fires, and the card goes to the exhaust or discard
    /// pile. Combat end is checked last.
    pub fn try_play_card(
        &mut self,
        uid: CardUid,
        target: Option<usize>,
    ) -> Result<PlayOutcome, PlayError> {
        let energy_spent = self.validate_play(uid, target)?;
        let Some(card) = self.piles.take_from_hand(uid) else {
            return Err(PlayError::CardNotInHand(uid));
        };
        self.player.energy -= energy_spent;

        let record = self.turns.record_card_played(card.card_type());
        self.events.publish(CardEvent::Played {
            uid,
            card_id: card.id().to_owned(),
            card_type: card.card_type(),
            target,
            energy_spent,
        });

        {
            let mut ctx = self
                .context(target, card.target())
                .with_energy(energy_spent, card.is_x_cost());
            if record.first_attack {
                ctx.trigger_relics(RelicTrigger::OnFirstAttack);
            }
            if let Some(trigger) = type_trigger(card.card_type()) {
                ctx.trigger_relics(trigger);
            }

            let registries = ctx.registries();
            for effect in card.effects() {
                registries.cards.execute(effect, &mut ctx);
            }
            ctx.trigger_relics(RelicTrigger::OnCardPlayed);
        }

        if card.exhausts() {
            self.piles.add_to_exhaust(card);
            self.events.publish(CardEvent::Exhausted { uid });
        } else {
            self.piles.add_to_discard(card);
            self.events.publish(CardEvent::Discarded { uid });
        }

        self.check_combat_end();
        Ok(PlayOutcome {
            energy_spent,
            first_attack: record.first_attack,
            status: self.status,
        })
    }

    /// Boolean form of [`try_play_card`](Self::try_play_card): `false` means
    /// nothing changed.
    pub fn play_card(&mut self, uid: CardUid, target: Option<usize>) -> bool {
        match self.try_play_card(uid, target) {
            Ok(_) => true,
            Err(error) => {
                self.reject("play_card", &error);
                false
            }
        }
    }

    // ========================================================================
    // Potions
    // ========================================================================

    /// Uses the potion in `slot`. The slot and target are validated before
    /// the potion is consumed.
    pub fn try_use_potion(&mut self, slot: usize, target: Option<usize>) -> Result<(), PotionError> {
        if !self.status.is_active() {
            return Err(PotionError::CombatNotActive(self.status));
        }
        if !self.turns.is_player_turn() {
            return Err(PotionError::NotPlayerTurn(self.turns.phase()));
        }
        let slots = self.player.potions().len();
        if slot >= slots {
            return Err(PotionError::SlotOutOfRange { slot, slots });
        }
        let potion = self.player.potion(slot).ok_or(PotionError::EmptySlot(slot))?;
        if potion.requires_target() && !self.is_valid_target(target) {
            return Err(PotionError::InvalidTarget(target));
        }

        let Some(potion) = self.player.take_potion(slot) else {
            return Err(PotionError::EmptySlot(slot));
        };
        self.events.publish(CombatEvent::PotionUsed {
            slot,
            potion_id: potion.id.clone(),
            target,
        });

        {
            let mut ctx = self.context(target, potion.target);
            let registries = ctx.registries();
            for effect in &potion.effects {
                registries.potions.execute(effect, &mut ctx);
            }
            ctx.trigger_relics(RelicTrigger::OnPotionUsed);
        }

        self.check_combat_end();
        Ok(())
    }

    pub fn use_potion(&mut self, slot: usize, target: Option<usize>) -> bool {
        match self.try_use_potion(slot, target) {
            Ok(()) => true,
            Err(error) => {
                self.reject("use_potion", &error);
                false
            }
        }
    }

    // ========================================================================
    // Turn flow
    // ========================================================================

    /// Ends the player's turn.
    ///
    /// Fires `onTurnEnd`, ticks player statuses, cleans up the hand (retain
    /// stays, ethereal exhausts, the rest is discarded) and refills it. With
    /// `auto_enemy_turn` the enemy turn runs immediately; otherwise the combat
    /// waits in `EnemyTurn` for [`run_enemy_turn`](Self::run_enemy_turn).
    pub fn try_end_player_turn(&mut self) -> Result<(), FlowError> {
        self.ensure_active()?;
        self.turns.end_player_turn()?;
        let turn = self.turns.turn();

        self.trigger_relics(RelicTrigger::OnTurnEnd);
        self.player.stats.statuses.tick_durations();

        let cleanup = self.piles.discard_hand();
        for &uid in &cleanup.discarded {
            self.events.publish(CardEvent::Discarded { uid });
        }
        for &uid in &cleanup.exhausted {
            self.events.publish(CardEvent::Exhausted { uid });
        }

        let refill = self.config.cards_per_turn;
        self.context(None, TargetType::Caster).draw_cards(refill);

        self.events.publish(TurnEvent::PlayerTurnEnded { turn });
        self.turns.begin_enemy_turn()?;

        if self.check_combat_end() {
            return Ok(());
        }
        if self.config.auto_enemy_turn {
            self.try_run_enemy_turn()?;
        }
        Ok(())
    }

    pub fn end_player_turn(&mut self) -> bool {
        match self.try_end_player_turn() {
            Ok(()) => true,
            Err(error) => {
                self.reject("end_player_turn", &error);
                false
            }
        }
    }

    /// Runs the enemy turn, then begins the next player turn.
    ///
    /// Living enemies act in roster order, each finishing its telegraphed
    /// move before the next starts, and roll their next intent. The combat
    /// halts in defeat the moment the player dies. Afterwards enemy statuses
    /// tick and poison resolves.
    pub fn try_run_enemy_turn(&mut self) -> Result<(), FlowError> {
        self.ensure_active()?;
        let phase = self.turns.phase();
        if phase != TurnPhase::EnemyTurn {
            return Err(TurnError::WrongPhase {
                expected: TurnPhase::EnemyTurn,
                actual: phase,
            }
            .into());
        }
        self.events.publish(TurnEvent::EnemyTurnStarted {
            turn: self.turns.turn(),
        });

        // One enemy at a time: a defeat ends the turn before later enemies roll.
        for index in 0..self.enemies.len() {
            if !self.enemies[index].vitals.is_alive() {
                continue;
            }
            self.enemies[index].vitals.clear_block();
            let Some(actions) = advance_intent(&mut self.enemies[index], &mut self.rng) else {
                continue;
            };
            self.publish_intent(index);

            for action in actions {
                self.apply_enemy_action(index, action);
                if !self.player.vitals.is_alive() {
                    break;
                }
            }
            if self.check_combat_end() {
                return Ok(());
            }
        }

        self.resolve_enemy_statuses();
        if self.check_combat_end() {
            return Ok(());
        }

        self.turns.end_enemy_turn()?;
        self.begin_player_turn();
        Ok(())
    }

    pub fn run_enemy_turn(&mut self) -> bool {
        match self.try_run_enemy_turn() {
            Ok(()) => true,
            Err(error) => {
                self.reject("run_enemy_turn", &error);
                false
            }
        }
    }

    fn begin_player_turn(&mut self) {
        let turn = self.turns.start_turn();
        if !RelicManager::retains_block(&self.player) {
            self.player.vitals.clear_block();
        }
        self.player.energy = self.player.max_energy;
        self.events.publish(TurnEvent::PlayerTurnStarted { turn });

        self.trigger_relics(RelicTrigger::OnTurnStart);
        self.check_combat_end();
    }

    fn apply_enemy_action(&mut self, index: usize, action: EnemyAction) {
        let player = &mut self.player;
        let enemy = &mut self.enemies[index];
        let events = &self.events;

        match action {
            EnemyAction::Attack { damage, hits } => {
                let reduction = RelicManager::hp_loss_reduction(player);
                for _ in 0..hits {
                    if !player.vitals.is_alive() {
                        break;
                    }
                    let amount = combat::calculate_damage(
                        damage,
                        enemy.stats.strength,
                        enemy.stats.statuses.is_weak(),
                        player.stats.statuses.is_vulnerable(),
                    );
                    let outcome = combat::apply_damage_reduced(&mut player.vitals, amount, reduction);
                    events.publish(CombatEvent::DamageDealt {
                        source: Some(Participant::Enemy(index)),
                        target: Participant::Player,
                        amount: outcome.hp_lost,
                        blocked: outcome.blocked,
                    });
                }
            }
            EnemyAction::Block(value) => {
                let amount = combat::gain_block(enemy, value);
                events.publish(CombatEvent::BlockGained {
                    target: Participant::Enemy(index),
                    amount,
                });
            }
            EnemyAction::GainStrength(value) => enemy.stats.strength += value,
            EnemyAction::ApplyWeak(stacks) => player.stats.statuses.apply(StatusKind::Weak, stacks),
            EnemyAction::ApplyVulnerable(stacks) => {
                player.stats.statuses.apply(StatusKind::Vulnerable, stacks)
            }
            EnemyAction::ApplyFrail(stacks) => player.stats.statuses.apply(StatusKind::Frail, stacks),
            EnemyAction::Heal(amount) => {
                enemy.vitals.heal(amount);
            }
        }
    }

    /// End-of-round enemy upkeep: durations tick, then poison deals its stacks
    /// as HP loss and decays by one.
    fn resolve_enemy_statuses(&mut self) {
        for (index, enemy) in self.enemies.iter_mut().enumerate() {
            if !enemy.vitals.is_alive() {
                continue;
            }
            enemy.stats.statuses.tick_durations();

            let poison = enemy.stats.statuses.take_poison_tick();
            if poison == 0 {
                continue;
            }
            let before = enemy.vitals.current_hp;
            let lost = enemy.vitals.lose_hp(poison);
            self.events.publish(CombatEvent::DamageDealt {
                source: None,
                target: Participant::Enemy(index),
                amount: lost,
                blocked: 0,
            });
            if before > 0 && !enemy.vitals.is_alive() {
                self.events.publish(CombatEvent::EnemyDied {
                    index,
                    enemy_id: enemy.id.clone(),
                });
            }
        }
    }

    fn publish_intent(&self, index: usize) {
        if let Some(intent) = self.enemies.get(index).and_then(Enemy::intent) {
            self.events.publish(TurnEvent::EnemyIntent {
                index,
                move_id: intent.id.clone(),
            });
        }
    }

    /// Ends the combat if every enemy or the player is dead. Victory takes
    /// precedence. Returns `true` once the combat is over.
    fn check_combat_end(&mut self) -> bool {
        if self.status.is_ended() {
            return true;
        }
        if !self.status.is_active() {
            return false;
        }

        let outcome = if self.enemies.iter().all(|e| !e.vitals.is_alive()) {
            CombatOutcome::Victory
        } else if !self.player.vitals.is_alive() {
            CombatOutcome::Defeat
        } else {
            return false;
        };

        self.status = CombatStatus::Ended(outcome);
        if outcome == CombatOutcome::Victory {
            self.trigger_relics(RelicTrigger::OnVictory);
        }
        info!(
            target: "combat::engine",
            outcome = outcome.as_ref(),
            turn = self.turns.turn(),
            hp = self.player.vitals.current_hp,
            "Combat ended"
        );
        self.events.publish(CombatEvent::Ended { outcome });
        true
    }

    // ========================================================================
    // Relics
    // ========================================================================

    /// Gives the player a relic mid-combat, firing its `onObtain` effects once
    /// against the live board.
    pub fn obtain_relic(&mut self, relic: Relic) {
        let relic_id = relic.id.clone();
        self.player.push_relic(relic);
        let index = self.player.relics().len() - 1;
        relics::fire(index, RelicTrigger::OnObtain, &mut self.context(None, TargetType::Caster));
        self.events.publish(RelicEvent::Obtained { relic_id });
        self.check_combat_end();
    }

    // ========================================================================
    // Read-only views
    // ========================================================================

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    /// Living enemies with their roster indices.
    pub fn alive_enemies(&self) -> impl Iterator<Item = (usize, &Enemy)> + '_ {
        self.enemies
            .iter()
            .enumerate()
            .filter(|(_, e)| e.vitals.is_alive())
    }

    pub fn piles(&self) -> &CardPiles {
        &self.piles
    }

    pub fn hand(&self) -> &[Card] {
        self.piles.hand()
    }

    pub fn draw_pile(&self) -> &[Card] {
        self.piles.draw_pile()
    }

    pub fn discard_pile(&self) -> &[Card] {
        self.piles.discard_pile()
    }

    pub fn exhaust_pile(&self) -> &[Card] {
        self.piles.exhaust_pile()
    }

    pub fn turn(&self) -> u32 {
        self.turns.turn()
    }

    pub fn phase(&self) -> TurnPhase {
        self.turns.phase()
    }

    pub fn counters(&self) -> TurnCounters {
        self.turns.counters()
    }

    pub fn is_player_turn(&self) -> bool {
        self.status.is_active() && self.turns.is_player_turn()
    }

    pub fn combat_ended(&self) -> bool {
        self.status.is_ended()
    }

    pub fn status(&self) -> CombatStatus {
        self.status
    }

    pub fn outcome(&self) -> Option<CombatOutcome> {
        self.status.outcome()
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn relic_manager(&self) -> &RelicManager {
        &self.relics
    }

    pub fn registries(&self) -> &Arc<EffectRegistries> {
        &self.registries
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Subscribe to one topic of this combat's event bus.
    pub fn subscribe(&self, topic: Topic) -> tokio::sync::broadcast::Receiver<Event> {
        self.events.subscribe(topic)
    }
}

/// Relic trigger for a played card's type.
fn type_trigger(card_type: CardType) -> Option<RelicTrigger> {
    match card_type {
        CardType::Attack => Some(RelicTrigger::OnAttackPlayed),
        CardType::Skill => Some(RelicTrigger::OnSkillPlayed),
        CardType::Power => Some(RelicTrigger::OnPowerPlayed),
        CardType::Status | CardType::Curse => None,
    }
}
