//! Built-in relic actions.
//!
//! Threshold actions (`*_EVERY_N`) are counted by the relic manager before
//! dispatch; by the time a handler here runs the threshold has been reached,
//! so the handler only grants the effect's `amount`.

use combat_core::{RelicEffect, StatusKind};

use super::{EffectContext, EffectOutcome, EffectRegistry, stacks};

/// Keys of the built-in triggered relic actions.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RelicAction {
    /// Raw block, unaffected by Dexterity and Frail.
    GainBlock,
    GainEnergy,
    GainStrength,
    GainDexterity,
    DrawCards,
    Heal,
    IncreaseMaxHp,
    GainGold,
    DamageAllEnemies,
    DamageRandomEnemy,
    ApplyVulnerableAll,
    ApplyWeakAll,
    /// Stores energy for the next `start_combat()`.
    EnergyNextCombat,
    EnergyEveryN,
    StrengthEveryN,
    DexterityEveryN,
    BlockEveryN,
    DrawEveryN,
    DamageAllEveryN,
}

impl RelicAction {
    /// Whether the action counts events and fires at a threshold.
    pub fn is_threshold(action: &str) -> bool {
        action.ends_with("_EVERY_N")
    }
}

/// Passive relic actions. They never dispatch; the relic manager answers
/// predicates about them instead.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PassiveAction {
    /// Each HP loss on the player is reduced by `value`.
    ReduceHpLoss,
    /// `value` extra Strength while the player is at or below half HP.
    LowHpStrength,
    /// Block is not removed at the start of the player's turn.
    RetainBlock,
    /// Shop prices reduced by `value` percent.
    ShopDiscount,
}

impl PassiveAction {
    pub fn is_passive(action: &str) -> bool {
        action.parse::<Self>().is_ok()
    }
}

pub(super) fn register_defaults(registry: &mut EffectRegistry<RelicEffect>) {
    use RelicAction::*;

    registry.register_fn(GainBlock, |e: &RelicEffect, ctx: &mut EffectContext<'_>| {
        EffectOutcome::applied(ctx.gain_raw_block(e.value))
    });
    registry.register_fn(GainEnergy, |e: &RelicEffect, ctx: &mut EffectContext<'_>| {
        grant_energy(stacks(e.value), ctx)
    });
    registry.register_fn(GainStrength, |e: &RelicEffect, ctx: &mut EffectContext<'_>| {
        grant_strength(e.value, ctx)
    });
    registry.register_fn(GainDexterity, |e: &RelicEffect, ctx: &mut EffectContext<'_>| {
        grant_dexterity(e.value, ctx)
    });
    registry.register_fn(DrawCards, |e: &RelicEffect, ctx: &mut EffectContext<'_>| {
        EffectOutcome::applied(ctx.draw_cards(stacks(e.value) as usize) as u32)
    });
    registry.register_fn(Heal, |e: &RelicEffect, ctx: &mut EffectContext<'_>| {
        EffectOutcome::applied(ctx.player.vitals.heal(stacks(e.value)))
    });
    registry.register_fn(IncreaseMaxHp, |e: &RelicEffect, ctx: &mut EffectContext<'_>| {
        let amount = stacks(e.value);
        ctx.player.vitals.increase_max_hp(amount);
        EffectOutcome::applied(amount)
    });
    registry.register_fn(GainGold, |e: &RelicEffect, ctx: &mut EffectContext<'_>| {
        let amount = stacks(e.value);
        ctx.player.gold = ctx.player.gold.saturating_add(amount);
        EffectOutcome::applied(amount)
    });
    registry.register_fn(DamageAllEnemies, |e: &RelicEffect, ctx: &mut EffectContext<'_>| {
        damage_all(e.value, ctx)
    });
    registry.register_fn(DamageRandomEnemy, damage_random);
    registry.register_fn(ApplyVulnerableAll, |e: &RelicEffect, ctx: &mut EffectContext<'_>| {
        apply_all(StatusKind::Vulnerable, stacks(e.value), ctx)
    });
    registry.register_fn(ApplyWeakAll, |e: &RelicEffect, ctx: &mut EffectContext<'_>| {
        apply_all(StatusKind::Weak, stacks(e.value), ctx)
    });
    registry.register_fn(EnergyNextCombat, |e: &RelicEffect, ctx: &mut EffectContext<'_>| {
        let amount = stacks(e.value);
        ctx.relic_state().add_pending_energy(amount);
        EffectOutcome::applied(amount)
    });

    registry.register_fn(EnergyEveryN, |e: &RelicEffect, ctx: &mut EffectContext<'_>| {
        grant_energy(stacks(threshold_amount(e)), ctx)
    });
    registry.register_fn(StrengthEveryN, |e: &RelicEffect, ctx: &mut EffectContext<'_>| {
        grant_strength(threshold_amount(e), ctx)
    });
    registry.register_fn(DexterityEveryN, |e: &RelicEffect, ctx: &mut EffectContext<'_>| {
        grant_dexterity(threshold_amount(e), ctx)
    });
    registry.register_fn(BlockEveryN, |e: &RelicEffect, ctx: &mut EffectContext<'_>| {
        EffectOutcome::applied(ctx.gain_raw_block(threshold_amount(e)))
    });
    registry.register_fn(DrawEveryN, |e: &RelicEffect, ctx: &mut EffectContext<'_>| {
        let count = stacks(threshold_amount(e)) as usize;
        EffectOutcome::applied(ctx.draw_cards(count) as u32)
    });
    registry.register_fn(DamageAllEveryN, |e: &RelicEffect, ctx: &mut EffectContext<'_>| {
        damage_all(threshold_amount(e), ctx)
    });
}

/// Amount granted when a threshold fires (defaults to 1).
fn threshold_amount(effect: &RelicEffect) -> i32 {
    effect.amount.unwrap_or(1)
}

fn grant_energy(amount: u32, ctx: &mut EffectContext<'_>) -> EffectOutcome {
    ctx.player.gain_energy(amount);
    EffectOutcome::applied(amount)
}

fn grant_strength(value: i32, ctx: &mut EffectContext<'_>) -> EffectOutcome {
    ctx.player.stats.strength += value;
    EffectOutcome::applied(value.unsigned_abs())
}

fn grant_dexterity(value: i32, ctx: &mut EffectContext<'_>) -> EffectOutcome {
    ctx.player.stats.dexterity += value;
    EffectOutcome::applied(value.unsigned_abs())
}

fn damage_all(value: i32, ctx: &mut EffectContext<'_>) -> EffectOutcome {
    let mut total = 0;
    for index in ctx.alive_enemies() {
        if let Some(outcome) = ctx.deal_fixed_damage_to_enemy(index, value) {
            total += outcome.hp_lost;
        }
    }
    EffectOutcome::applied(total)
}

fn damage_random(effect: &RelicEffect, ctx: &mut EffectContext<'_>) -> EffectOutcome {
    let Some(index) = ctx.random_enemy() else {
        return EffectOutcome::unhandled();
    };
    match ctx.deal_fixed_damage_to_enemy(index, effect.value) {
        Some(outcome) => EffectOutcome::applied(outcome.hp_lost),
        None => EffectOutcome::unhandled(),
    }
}

fn apply_all(kind: StatusKind, amount: u32, ctx: &mut EffectContext<'_>) -> EffectOutcome {
    let targets = ctx.alive_enemies();
    if targets.is_empty() {
        return EffectOutcome::unhandled();
    }
    for index in targets {
        ctx.enemies[index].stats.statuses.apply(kind, amount);
    }
    EffectOutcome::applied(amount)
}
