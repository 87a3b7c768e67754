//! Built-in card effects.

use combat_core::{CardEffect, StatusKind, TargetType};

use super::{EffectContext, EffectOutcome, EffectRegistry, stacks};

/// Keys of the built-in card effects.
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
pub enum CardEffectKind {
    /// Attack the card's target(s).
    Damage,
    DamageAll,
    DamageRandom,
    /// Block modified by Dexterity and Frail.
    Block,
    Draw,
    GainEnergy,
    GainStrength,
    GainDexterity,
    ApplyWeak,
    ApplyVulnerable,
    ApplyFrail,
    ApplyPoison,
    Heal,
    /// Lose HP, ignoring block.
    LoseHp,
}

pub(super) fn register_defaults(registry: &mut EffectRegistry<CardEffect>) {
    use CardEffectKind::*;

    registry.register_fn(Damage, damage);
    registry.register_fn(DamageAll, damage_all);
    registry.register_fn(DamageRandom, damage_random);
    registry.register_fn(Block, block);
    registry.register_fn(Draw, draw);
    registry.register_fn(GainEnergy, gain_energy);
    registry.register_fn(GainStrength, gain_strength);
    registry.register_fn(GainDexterity, gain_dexterity);
    registry.register_fn(ApplyWeak, |e: &CardEffect, ctx: &mut EffectContext<'_>| {
        apply_status(e, ctx, StatusKind::Weak)
    });
    registry.register_fn(ApplyVulnerable, |e: &CardEffect, ctx: &mut EffectContext<'_>| {
        apply_status(e, ctx, StatusKind::Vulnerable)
    });
    registry.register_fn(ApplyFrail, |e: &CardEffect, ctx: &mut EffectContext<'_>| {
        apply_status(e, ctx, StatusKind::Frail)
    });
    registry.register_fn(ApplyPoison, |e: &CardEffect, ctx: &mut EffectContext<'_>| {
        apply_status(e, ctx, StatusKind::Poison)
    });
    registry.register_fn(Heal, heal);
    registry.register_fn(LoseHp, lose_hp);
}

fn attack_targets(targets: Vec<usize>, value: i32, ctx: &mut EffectContext<'_>) -> EffectOutcome {
    let mut total = 0;
    let mut hit = false;
    for index in targets {
        if let Some(outcome) = ctx.deal_damage_to_enemy(index, value) {
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

fn damage(effect: &CardEffect, ctx: &mut EffectContext<'_>) -> EffectOutcome {
    let value = ctx.effect_value(effect.value);
    let targets = ctx.enemy_targets(effect.target);
    attack_targets(targets, value, ctx)
}

fn damage_all(effect: &CardEffect, ctx: &mut EffectContext<'_>) -> EffectOutcome {
    let value = ctx.effect_value(effect.value);
    let targets = ctx.enemy_targets(Some(TargetType::AllEnemies));
    attack_targets(targets, value, ctx)
}

fn damage_random(effect: &CardEffect, ctx: &mut EffectContext<'_>) -> EffectOutcome {
    let value = ctx.effect_value(effect.value);
    let targets = ctx.enemy_targets(Some(TargetType::RandomEnemy));
    attack_targets(targets, value, ctx)
}

fn block(effect: &CardEffect, ctx: &mut EffectContext<'_>) -> EffectOutcome {
    let value = ctx.effect_value(effect.value);
    EffectOutcome::applied(ctx.gain_block(value))
}

fn draw(effect: &CardEffect, ctx: &mut EffectContext<'_>) -> EffectOutcome {
    let count = stacks(ctx.effect_value(effect.value)) as usize;
    EffectOutcome::applied(ctx.draw_cards(count) as u32)
}

fn gain_energy(effect: &CardEffect, ctx: &mut EffectContext<'_>) -> EffectOutcome {
    let amount = stacks(ctx.effect_value(effect.value));
    ctx.player.gain_energy(amount);
    EffectOutcome::applied(amount)
}

fn gain_strength(effect: &CardEffect, ctx: &mut EffectContext<'_>) -> EffectOutcome {
    let value = ctx.effect_value(effect.value);
    ctx.player.stats.strength += value;
    EffectOutcome::applied(value.unsigned_abs())
}

fn gain_dexterity(effect: &CardEffect, ctx: &mut EffectContext<'_>) -> EffectOutcome {
    let value = ctx.effect_value(effect.value);
    ctx.player.stats.dexterity += value;
    EffectOutcome::applied(value.unsigned_abs())
}

/// Debuffs land on the card's enemy target(s). A `SELF` target override puts
/// them on the player instead.
fn apply_status(effect: &CardEffect, ctx: &mut EffectContext<'_>, kind: StatusKind) -> EffectOutcome {
    let amount = stacks(ctx.effect_value(effect.value));
    if effect.target == Some(TargetType::Caster) {
        ctx.player.stats.statuses.apply(kind, amount);
        return EffectOutcome::applied(amount);
    }

    let targets = ctx.enemy_targets(effect.target);
    if targets.is_empty() {
        return EffectOutcome::unhandled();
    }
    for index in targets {
        if let Some(enemy) = ctx.enemies.get_mut(index) {
            enemy.stats.statuses.apply(kind, amount);
        }
    }
    EffectOutcome::applied(amount)
}

fn heal(effect: &CardEffect, ctx: &mut EffectContext<'_>) -> EffectOutcome {
    let amount = stacks(ctx.effect_value(effect.value));
    EffectOutcome::applied(ctx.player.vitals.heal(amount))
}

fn lose_hp(effect: &CardEffect, ctx: &mut EffectContext<'_>) -> EffectOutcome {
    let amount = stacks(ctx.effect_value(effect.value));
    EffectOutcome::applied(ctx.player_lose_hp(amount))
}
