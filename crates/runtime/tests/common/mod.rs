//! Shared fixtures for the combat integration tests.
#![allow(dead_code)]

use combat_runtime::combat_core::{
    CardEffect, CardKeywords, CardTemplate, CardType, CombatConfig, EnemyAction, EnemyMove,
    EnemyTemplate, Player, Potion, PotionEffect, TargetType,
};
use combat_runtime::{CombatBuilder, CombatManager, Event};
use tokio::sync::broadcast::Receiver;
use tokio::sync::broadcast::error::TryRecvError;

pub fn strike() -> CardTemplate {
    CardTemplate::new("strike", "Strike", CardType::Attack, 1, TargetType::SingleEnemy)
        .with_effect(CardEffect::new("DAMAGE", 6))
}

pub fn defend() -> CardTemplate {
    CardTemplate::new("defend", "Defend", CardType::Skill, 1, TargetType::Caster)
        .with_effect(CardEffect::new("BLOCK", 5))
}

/// Zero-cost skill for counting plays.
pub fn flash() -> CardTemplate {
    CardTemplate::new("flash", "Flash", CardType::Skill, 0, TargetType::Caster)
        .with_effect(CardEffect::new("BLOCK", 1))
}

pub fn keyworded(id: &str, keywords: CardKeywords) -> CardTemplate {
    CardTemplate::new(id, id, CardType::Skill, 0, TargetType::Caster)
        .with_effect(CardEffect::new("BLOCK", 1))
        .with_keywords(keywords)
}

/// Enemy that only shields itself for 0.
pub fn dummy(hp: u32) -> EnemyTemplate {
    EnemyTemplate::new("dummy", "Training Dummy", hp)
        .with_move(EnemyMove::new("idle", 1).with_action(EnemyAction::Block(0)))
}

/// Enemy that attacks once for `damage` every turn.
pub fn brute(hp: u32, damage: i32) -> EnemyTemplate {
    EnemyTemplate::new("brute", "Brute", hp).with_move(
        EnemyMove::new("smash", 1).with_action(EnemyAction::Attack { damage, hits: 1 }),
    )
}

pub fn fire_potion() -> Potion {
    Potion::new("fire_potion", "Fire Potion", TargetType::SingleEnemy)
        .with_effect(PotionEffect::new("DAMAGE", 20))
}

pub fn player_with(max_hp: u32, deck: &[(CardTemplate, usize)]) -> Player {
    let mut player = Player::new(max_hp, CombatConfig::DEFAULT_POTION_SLOTS);
    for (template, copies) in deck {
        for _ in 0..*copies {
            player.add_card(template);
        }
    }
    player
}

pub fn builder(player: Player, enemies: &[EnemyTemplate]) -> CombatBuilder {
    enemies
        .iter()
        .fold(CombatManager::builder().player(player).seed(7), |b, e| {
            b.enemy_template(e)
        })
}

pub fn started(player: Player, enemies: &[EnemyTemplate]) -> CombatManager {
    let mut combat = builder(player, enemies).build().expect("valid combat");
    assert!(combat.start_combat());
    combat
}

pub fn first_in_hand(combat: &CombatManager, id: &str) -> combat_runtime::combat_core::CardUid {
    combat
        .hand()
        .iter()
        .find(|c| c.id() == id)
        .map(|c| c.uid)
        .unwrap_or_else(|| panic!("no {id} in hand"))
}

pub fn drain(rx: &mut Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(event) => events.push(event),
            Err(TryRecvError::Lagged(_)) => continue,
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }
    events
}
