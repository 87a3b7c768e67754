//! Built-in potion effects.
//!
//! Potion damage is fixed: the player's Strength and Weak do not apply, the
//! target's Vulnerable does. Potion block bypasses Dexterity and Frail.

use combat_core::{PotionEffect, StatusKind, TargetType};

use super::{EffectContext, EffectOutcome, EffectRegistry, stacks};

/// Keys of the built-in potion effects.
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
pub enum PotionEffectKind {
    Damage,
    DamageAll,
    Block,
    Heal,
    GainEnergy,
    GainStrength,
    GainDexterity,
    Draw,
    ApplyWeak,
    ApplyVulnerable,
    ApplyPoison,
}

pub(super) fn register_defaults(registry: &mut EffectRegistry<PotionEffect>) {
    use PotionEffectKind::*;

    registry.register_fn(Damage, damage);
    registry.register_fn(DamageAll, damage_all);
    registry.register_fn(Block, |e: &PotionEffect, ctx: &mut EffectContext<'_>| {
        EffectOutcome::applied(ctx.gain_raw_block(e.value))
    });
    registry.register_fn(Heal, |e: &PotionEffect, ctx: &mut EffectContext<'_>| {
        EffectOutcome::applied(ctx.player.vitals.heal(stacks(e.value)))
    });
    registry.register_fn(GainEnergy, |e: &PotionEffect, ctx: &mut EffectContext<'_>| {
        let amount = stacks(e.value);
        ctx.player.gain_energy(amount);
        EffectOutcome::applied(amount)
    });
    registry.register_fn(GainStrength, |e: &PotionEffect, ctx: &mut EffectContext<'_>| {
        ctx.player.stats.strength += e.value;
        EffectOutcome::applied(e.value.unsigned_abs())
    });
    registry.register_fn(GainDexterity, |e: &PotionEffect, ctx: &mut EffectContext<'_>| {
        ctx.player.stats.dexterity += e.value;
        EffectOutcome::applied(e.value.unsigned_abs())
    });
    registry.register_fn(Draw, |e: &PotionEffect, ctx: &mut EffectContext<'_>| {
        EffectOutcome::applied(ctx.draw_cards(stacks(e.value) as usize) as u32)
    });
    registry.register_fn(ApplyWeak, |e: &PotionEffect, ctx: &mut EffectContext<'_>| {
        apply_status(e, ctx, StatusKind::Weak)
    });
    registry.register_fn(ApplyVulnerable, |e: &PotionEffect, ctx: &mut EffectContext<'_>| {
        apply_status(e, ctx, StatusKind::Vulnerable)
    });
    registry.register_fn(ApplyPoison, |e: &PotionEffect, ctx: &mut EffectContext<'_>| {
        apply_status(e, ctx, StatusKind::Poison)
    });
}

fn damage(effect: &PotionEffect, ctx: &mut EffectContext<'_>) -> EffectOutcome {
    let targets = ctx.enemy_targets(None);
    fixed_damage(targets, effect.value, ctx)
}

fn damage_all(effect: &PotionEffect, ctx: &mut EffectContext<'_>) -> EffectOutcome {
    let targets = ctx.enemy_targets(Some(TargetType::AllEnemies));
    fixed_damage(targets, effect.value, ctx)
}

fn fixed_damage(targets: Vec<usize>, value: i32, ctx: &mut EffectContext<'_>) -> EffectOutcome {
    let mut total = 0;
    let mut hit = false;
    for index in targets {
        if let Some(outcome) = ctx.deal_fixed_damage_to_enemy(index, value) {
            hit = true;
            total += outcome.hp_lost;
        }
    }
    if hit {
        EffectOutcome::applied(total)
    } else {
        EffectOutcome::unhandled()
    }
}

fn apply_status(effect: &PotionEffect, ctx: &mut EffectContext<'_>, kind: StatusKind) -> EffectOutcome {
    let amount = stacks(effect.value);
    let targets = ctx.enemy_targets(None);
    if targets.is_empty() {
        return EffectOutcome::unhandled();
    }
    for index in targets {
        ctx.enemies[index].stats.statuses.apply(kind, amount);
    }
    EffectOutcome::applied(amount)
}
