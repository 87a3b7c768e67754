//! Save and resume through `CombatSnapshot`.
mod common;

use combat_runtime::SnapshotError;
use combat_runtime::combat_core::{CardTemplate, CombatSnapshot, CombatStatus};
use common::*;

fn catalog(id: &str) -> Option<CardTemplate> {
    match id {
        "strike" => Some(strike()),
        "defend" => Some(defend()),
        _ => None,
    }
}

fn fresh() -> combat_runtime::CombatManager {
    let mut player = player_with(80, &[(strike(), 5), (defend(), 5)]);
    assert!(player.add_potion(fire_potion()).is_ok());
    builder(player, &[brute(60, 7)]).build().unwrap()
}

fn play_first(combat: &mut combat_runtime::CombatManager) {
    let uid = combat.hand()[0].uid;
    combat.play_card(uid, Some(0));
}

#[test]
fn snapshot_survives_json() {
    let mut combat = fresh();
    assert!(combat.start_combat());
    play_first(&mut combat);

    let snapshot = combat.snapshot();
    let json = serde_json::to_string(&snapshot).unwrap();
    let decoded: CombatSnapshot = serde_json::from_str(&json).unwrap();

    assert_eq!(decoded, snapshot);
    assert_eq!(decoded.piles.total(), 10);
}

#[test]
fn restored_combat_continues_identically() {
    let mut original = fresh();
    assert!(original.start_combat());
    play_first(&mut original);
    assert!(original.use_potion(0, Some(0)));
    assert!(original.end_player_turn());
    let saved = original.snapshot();

    let mut resumed = fresh();
    assert_eq!(resumed.apply_snapshot(&saved, catalog), Ok(0));
    assert_eq!(resumed.snapshot(), saved);
    assert!(resumed.player().potion(0).is_none());
    assert_eq!(resumed.status(), CombatStatus::InCombat);

    for combat in [&mut original, &mut resumed] {
        play_first(combat);
        play_first(combat);
        assert!(combat.end_player_turn());
    }
    assert_eq!(original.snapshot(), resumed.snapshot());
}

#[test]
fn unknown_cards_are_counted() {
    let mut combat = fresh();
    assert!(combat.start_combat());
    let saved = combat.snapshot();

    let mut resumed = fresh();
    let missing = resumed
        .apply_snapshot(&saved, |id| (id == "strike").then(strike))
        .unwrap();

    assert_eq!(missing, 5);
    assert_eq!(resumed.piles().total(), 5);
}

#[test]
fn roster_mismatch_is_rejected_untouched() {
    let mut combat = fresh();
    assert!(combat.start_combat());
    let mut saved = combat.snapshot();

    let mut other = builder(player_with(80, &[(strike(), 5)]), &[dummy(30)])
        .build()
        .unwrap();
    let before = other.snapshot();
    assert_eq!(
        other.apply_snapshot(&saved, catalog),
        Err(SnapshotError::EnemyMismatch {
            index: 0,
            expected: "dummy".into(),
            found: "brute".into(),
        })
    );

    saved.enemies.push(saved.enemies[0].clone());
    assert_eq!(
        other.apply_snapshot(&saved, catalog),
        Err(SnapshotError::EnemyCountMismatch {
            expected: 1,
            found: 2
        })
    );
    assert_eq!(other.snapshot(), before);
}
