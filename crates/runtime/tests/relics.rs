//! Relic triggers, counters and passives inside a running combat.
mod common;

use combat_runtime::combat_core::{
    CombatConfig, CombatOutcome, Relic, RelicEffect, RelicRarity, RelicTrigger,
};
use combat_runtime::{
    EffectContext, EffectOutcome, EffectRegistries, Event, EventBus, RelicEvent, RelicManager,
    Topic,
};
use common::*;
use std::sync::Arc;

fn relic(id: &str, trigger: RelicTrigger, action: &str, value: i32) -> Relic {
    Relic::new(id, id, RelicRarity::Common).with_effect(RelicEffect::new(trigger, action, value))
}

#[test]
fn combat_start_block_absorbs_first_hit() {
    let mut player = player_with(80, &[(defend(), 10)]);
    player.push_relic(relic("anchor", RelicTrigger::OnCombatStart, "GAIN_BLOCK", 10));
    let mut combat = started(player, &[brute(50, 8)]);

    assert_eq!(combat.player().vitals.block, 10);
    assert!(combat.end_player_turn());
    assert_eq!(combat.player().vitals.current_hp, 80);
}

#[test]
fn threshold_relic_fires_every_third_card() {
    let mut player = player_with(80, &[(flash(), 10)]);
    player.push_relic(
        Relic::new("sundial", "Sundial", RelicRarity::Uncommon).with_effect(
            RelicEffect::new(RelicTrigger::OnCardPlayed, "ENERGY_EVERY_N", 3).with_amount(2),
        ),
    );
    let mut combat = started(player, &[dummy(40)]);
    let mut relic_rx = combat.subscribe(Topic::Relics);

    for _ in 0..2 {
        let uid = first_in_hand(&combat, "flash");
        assert!(combat.play_card(uid, None));
    }
    assert_eq!(combat.player().energy, 3);
    assert_eq!(combat.player().relics()[0].counter, 2);

    let uid = first_in_hand(&combat, "flash");
    assert!(combat.play_card(uid, None));
    assert_eq!(combat.player().energy, 5);
    assert_eq!(combat.player().relics()[0].counter, 0);

    let triggered = drain(&mut relic_rx)
        .into_iter()
        .filter(|e| matches!(e, Event::Relics(RelicEvent::Triggered { .. })))
        .count();
    assert_eq!(triggered, 1);
}

#[test]
fn first_attack_fires_once_per_combat() {
    let mut player = player_with(80, &[(strike(), 10)]);
    player.push_relic(relic("gauntlet", RelicTrigger::OnFirstAttack, "GAIN_BLOCK", 4));
    let mut combat = started(player, &[dummy(100)]);

    for _ in 0..2 {
        let uid = first_in_hand(&combat, "strike");
        assert!(combat.play_card(uid, Some(0)));
    }
    assert_eq!(combat.player().vitals.block, 4);
}

#[test]
fn energy_bonus_carries_into_next_combat() {
    let mut player = player_with(80, &[(strike(), 5)]);
    player.push_relic(relic("lantern", RelicTrigger::OnVictory, "ENERGY_NEXT_COMBAT", 1));
    let mut first = started(player, &[dummy(6)]);

    let uid = first_in_hand(&first, "strike");
    assert!(first.play_card(uid, Some(0)));
    assert_eq!(first.outcome(), Some(CombatOutcome::Victory));

    let (player, relics) = first.into_parts();
    assert_eq!(relics.pending_energy(), 1);

    let mut second = builder(player, &[dummy(40)])
        .relic_manager(relics)
        .build()
        .unwrap();
    assert!(second.start_combat());
    assert_eq!(second.player().energy, 4);
    assert_eq!(second.relic_manager().pending_energy(), 0);

    assert!(second.end_player_turn());
    assert_eq!(second.player().energy, 3);
}

#[test]
fn passive_relics_shape_combat_math() {
    let mut player = player_with(80, &[(strike(), 10)]);
    player.vitals.current_hp = 40;
    player.push_relic(relic("rod", RelicTrigger::Passive, "REDUCE_HP_LOSS", 1));
    player.push_relic(relic("idol", RelicTrigger::Passive, "LOW_HP_STRENGTH", 3));
    let mut combat = started(player, &[brute(100, 8)]);

    let uid = first_in_hand(&combat, "strike");
    assert!(combat.play_card(uid, Some(0)));
    assert_eq!(combat.enemies()[0].vitals.current_hp, 91);

    assert!(combat.end_player_turn());
    assert_eq!(combat.player().vitals.current_hp, 33);
}

#[test]
fn retain_block_keeps_block_between_turns() {
    let mut player = player_with(80, &[(defend(), 10)]);
    player.push_relic(relic("barricade", RelicTrigger::Passive, "RETAIN_BLOCK", 0));
    let mut combat = started(player, &[dummy(40)]);

    let uid = first_in_hand(&combat, "defend");
    assert!(combat.play_card(uid, None));
    assert!(combat.end_player_turn());

    assert_eq!(combat.turn(), 2);
    assert_eq!(combat.player().vitals.block, 5);
}

#[test]
fn shuffle_trigger_fires_on_reshuffle() {
    let mut player = player_with(80, &[(defend(), 6)]);
    player.push_relic(relic("sundial", RelicTrigger::OnShuffle, "GAIN_BLOCK", 3));
    let config = CombatConfig::default().with_auto_enemy_turn(false);
    let mut combat = builder(player, &[dummy(40)]).config(config).build().unwrap();
    assert!(combat.start_combat());
    assert_eq!(combat.player().vitals.block, 0);

    assert!(combat.end_player_turn());
    assert_eq!(combat.player().vitals.block, 3);
}

#[test]
fn reshuffle_inside_a_relic_draw_fires_shuffle_relics() {
    let mut player = player_with(80, &[(flash(), 6)]);
    player.push_relic(relic("scroll", RelicTrigger::OnCardPlayed, "DRAW_CARDS", 1));
    player.push_relic(relic("sundial", RelicTrigger::OnShuffle, "GAIN_BLOCK", 7));
    let mut combat = started(player, &[dummy(40)]);

    let uid = first_in_hand(&combat, "flash");
    assert!(combat.play_card(uid, None));
    assert!(combat.draw_pile().is_empty());
    assert_eq!(combat.player().vitals.block, 1);

    let uid = first_in_hand(&combat, "flash");
    assert!(combat.play_card(uid, None));
    assert_eq!(combat.player().vitals.block, 9);
}

#[test]
fn passive_relics_apply_during_relic_effects() {
    let mut registries = EffectRegistries::with_defaults();
    registries.relics.register_fn(
        "PRICK",
        |e: &RelicEffect, ctx: &mut EffectContext<'_>| {
            assert!(ctx.player.has_relic("rod"));
            EffectOutcome::applied(ctx.player_lose_hp(e.value.max(0) as u32))
        },
    );
    let mut player = player_with(30, &[(defend(), 10)]);
    player.push_relic(relic("thorn", RelicTrigger::OnCombatStart, "PRICK", 1));
    player.push_relic(relic("rod", RelicTrigger::Passive, "REDUCE_HP_LOSS", 1));
    let mut combat = builder(player, &[dummy(40)])
        .registries(Arc::new(registries))
        .build()
        .unwrap();

    assert!(combat.start_combat());
    assert_eq!(combat.player().vitals.current_hp, 30);
}

#[test]
fn nested_relic_triggers_stop_at_the_depth_limit() {
    let mut registries = EffectRegistries::with_defaults();
    registries.relics.register_fn(
        "ECHO",
        |_: &RelicEffect, ctx: &mut EffectContext<'_>| {
            let fired = ctx.trigger_relics(RelicTrigger::OnTurnEnd);
            EffectOutcome::applied(fired as u32)
        },
    );
    let mut player = player_with(80, &[(defend(), 10)]);
    player.push_relic(
        Relic::new("mirror", "Mirror", RelicRarity::Rare)
            .with_effect(RelicEffect::new(RelicTrigger::OnTurnEnd, "GAIN_BLOCK", 1))
            .with_effect(RelicEffect::new(RelicTrigger::OnTurnEnd, "ECHO", 0)),
    );
    let config = CombatConfig::default().with_auto_enemy_turn(false);
    let mut combat = builder(player, &[dummy(40)])
        .config(config)
        .registries(Arc::new(registries))
        .build()
        .unwrap();
    assert!(combat.start_combat());

    assert!(combat.end_player_turn());
    assert_eq!(
        combat.player().vitals.block,
        u32::from(CombatConfig::MAX_RELIC_TRIGGER_DEPTH)
    );
}

#[test]
fn obtaining_a_relic_fires_on_obtain_once() {
    let registries = EffectRegistries::with_defaults();
    let bus = EventBus::new();
    let mut relic_rx = bus.subscribe(Topic::Relics);
    let mut manager = RelicManager::new();
    let mut player = player_with(70, &[(defend(), 5)]);

    manager.add_relic(
        &mut player,
        relic("strawberry", RelicTrigger::OnObtain, "INCREASE_MAX_HP", 7),
        &registries,
        &bus,
    );
    assert_eq!(player.vitals.max_hp, 77);
    assert!(drain(&mut relic_rx).contains(&Event::Relics(RelicEvent::Obtained {
        relic_id: "strawberry".into()
    })));

    let mut combat = builder(player, &[dummy(40)])
        .relic_manager(manager)
        .event_bus(bus)
        .build()
        .unwrap();
    assert!(combat.start_combat());
    assert!(combat.end_player_turn());
    assert_eq!(combat.player().vitals.max_hp, 77);

    combat.obtain_relic(relic("cauldron", RelicTrigger::OnObtain, "DAMAGE_ALL_ENEMIES", 40));
    assert_eq!(combat.outcome(), Some(CombatOutcome::Victory));
    assert!(combat.player().has_relic("cauldron"));
}
