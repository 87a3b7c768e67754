//! Relic trigger dispatch and passive relic queries.
//!
//! Relics live on the [`Player`] in obtain order. This module walks them when a
//! named combat event occurs, counts threshold events, and answers the
//! predicates for passive relics (which never dispatch).

use combat_core::{
    CardPiles, Enemy, PcgRng, Player, Relic, RelicEffect, RelicTrigger, TurnCounters,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::effects::{EffectContext, EffectRegistries, PassiveAction, RelicAction};
use crate::events::{EventBus, RelicEvent};

/// Seed for the scratch RNG used when relics are obtained outside combat.
const OUT_OF_COMBAT_SEED: u64 = 0;

/// Run-level relic bookkeeping that outlives a single combat.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelicManager {
    /// Energy granted once by the next `start_combat()`.
    pending_energy: u32,
}

impl RelicManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_energy(&self) -> u32 {
        self.pending_energy
    }

    pub fn add_pending_energy(&mut self, amount: u32) {
        self.pending_energy = self.pending_energy.saturating_add(amount);
    }

    /// Consumes the pending next-combat bonus.
    pub fn take_pending_energy(&mut self) -> u32 {
        core::mem::take(&mut self.pending_energy)
    }

    pub(crate) fn restore_pending_energy(&mut self, amount: u32) {
        self.pending_energy = amount;
    }

    /// Gives a relic to the player outside combat, firing its `onObtain`
    /// effects exactly once.
    ///
    /// Obtain effects run against an empty board: no enemies and no piles.
    pub fn add_relic(
        &mut self,
        player: &mut Player,
        relic: Relic,
        registries: &EffectRegistries,
        bus: &EventBus,
    ) {
        let relic_id = relic.id.clone();
        player.push_relic(relic);
        let index = player.relics().len() - 1;

        let mut piles = CardPiles::new();
        let mut enemies: Vec<Enemy> = Vec::new();
        let mut rng = PcgRng::seed_from_u64(OUT_OF_COMBAT_SEED);
        {
            let mut ctx = EffectContext::new(
                player,
                &mut enemies,
                &mut piles,
                TurnCounters::default(),
                &mut rng,
                bus,
                registries,
                self,
            );
            fire(index, RelicTrigger::OnObtain, &mut ctx);
        }
        bus.publish(RelicEvent::Obtained { relic_id });
    }

    // ========================================================================
    // Passive predicates
    // ========================================================================

    fn passive_values(player: &Player, action: PassiveAction) -> impl Iterator<Item = i32> + '_ {
        player
            .relics()
            .iter()
            .flat_map(|r| r.effects.iter())
            .filter(move |e| e.action == action.as_ref())
            .map(|e| e.value)
    }

    /// Total reduction applied to each HP loss instance on the player.
    pub fn hp_loss_reduction(player: &Player) -> u32 {
        Self::passive_values(player, PassiveAction::ReduceHpLoss)
            .map(|v| v.max(0) as u32)
            .sum()
    }

    /// Extra Strength granted while the player is at or below half HP.
    pub fn low_hp_strength_bonus(player: &Player) -> i32 {
        let vitals = &player.vitals;
        if vitals.current_hp.saturating_mul(2) > vitals.max_hp {
            return 0;
        }
        Self::passive_values(player, PassiveAction::LowHpStrength).sum()
    }

    /// Whether block survives the start of the player's turn.
    pub fn retains_block(player: &Player) -> bool {
        Self::passive_values(player, PassiveAction::RetainBlock)
            .next()
            .is_some()
    }

    /// Shop discount in percent, capped at 100.
    pub fn shop_discount_percent(player: &Player) -> u32 {
        Self::passive_values(player, PassiveAction::ShopDiscount)
            .map(|v| v.max(0) as u32)
            .sum::<u32>()
            .min(100)
    }
}

/// Fires the effects of the player's relic at `index` for `trigger`.
/// Returns how many dispatched.
///
/// The relic stays on the player while its effects run, so nested triggers
/// and passive predicates still see it. Threshold actions advance the relic's
/// counter and only dispatch when it reaches the effect's `value`, at which
/// point the counter resets to 0. Passive actions are skipped silently.
pub(crate) fn fire(index: usize, trigger: RelicTrigger, ctx: &mut EffectContext<'_>) -> usize {
    if trigger == RelicTrigger::Passive {
        return 0;
    }
    let Some(relic) = ctx.player.relics().get(index) else {
        return 0;
    };
    let relic_id = relic.id.clone();
    let effects: Vec<RelicEffect> = relic
        .effects_for(trigger)
        .filter(|e| !PassiveAction::is_passive(&e.action))
        .cloned()
        .collect();

    let registries = ctx.registries();
    let mut fired = 0;
    for effect in effects {
        if RelicAction::is_threshold(&effect.action) {
            let Some(relic) = ctx.player.relics_mut().get_mut(index) else {
                break;
            };
            if !relic.advance_counter(effect.value) {
                debug!(
                    target: "combat::relics",
                    relic = %relic_id,
                    counter = relic.counter,
                    threshold = effect.value,
                    "Relic counter advanced"
                );
                continue;
            }
        }

        registries.relics.execute(&effect, ctx);
        ctx.events().publish(RelicEvent::Triggered {
            relic_id: relic_id.clone(),
            trigger,
            action: effect.action,
        });
        fired += 1;
    }
    fired
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::RelicRarity;

    fn relic(action: &str, value: i32) -> Relic {
        Relic::new(action.to_lowercase(), action, RelicRarity::Common)
            .with_effect(RelicEffect::new(RelicTrigger::Passive, action, value))
    }

    #[test]
    fn on_obtain_fires_once() {
        let registries = EffectRegistries::with_defaults();
        let bus = EventBus::new();
        let mut manager = RelicManager::new();
        let mut player = Player::new(70, 3);
        let strawberry = Relic::new("strawberry", "Strawberry", RelicRarity::Common)
            .with_effect(RelicEffect::new(RelicTrigger::OnObtain, "INCREASE_MAX_HP", 7));

        manager.add_relic(&mut player, strawberry, &registries, &bus);

        assert_eq!(player.vitals.max_hp, 77);
        assert_eq!(player.relics().len(), 1);
    }

    #[test]
    fn pending_energy_is_consumed_once() {
        let mut manager = RelicManager::new();
        manager.add_pending_energy(2);

        assert_eq!(manager.take_pending_energy(), 2);
        assert_eq!(manager.take_pending_energy(), 0);
    }

    #[test]
    fn passive_predicates() {
        let mut player = Player::new(80, 3);
        player.push_relic(relic("REDUCE_HP_LOSS", 1));
        player.push_relic(relic("LOW_HP_STRENGTH", 3));
        player.push_relic(relic("SHOP_DISCOUNT", 20));
        player.push_relic(relic("SHOP_DISCOUNT", 90));

        assert_eq!(RelicManager::hp_loss_reduction(&player), 1);
        assert_eq!(RelicManager::low_hp_strength_bonus(&player), 0);
        assert!(!RelicManager::retains_block(&player));
        assert_eq!(RelicManager::shop_discount_percent(&player), 100);

        player.vitals.current_hp = 40;
        assert_eq!(RelicManager::low_hp_strength_bonus(&player), 3);

        player.push_relic(relic("RETAIN_BLOCK", 0));
        assert!(RelicManager::retains_block(&player));
    }
}
