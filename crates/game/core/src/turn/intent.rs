//! Enemy intent rolling.

use crate::env::CombatRng;
use crate::state::{Enemy, EnemyAction};

/// Rolls the enemy's next move by cumulative weight and telegraphs it.
///
/// Enemies without moves keep no intent.
pub fn roll_intent<R: CombatRng>(enemy: &mut Enemy, rng: &mut R) -> Option<usize> {
    let index = rng.weighted_index(&enemy.move_weights());
    enemy.current_intent = index;
    index
}

/// Returns the actions of the telegraphed move and rolls the next intent.
///
/// Dead enemies and enemies without a move yield `None` and consume no
/// randomness.
pub fn advance_intent<R: CombatRng>(enemy: &mut Enemy, rng: &mut R) -> Option<Vec<EnemyAction>> {
    if !enemy.vitals.is_alive() {
        return None;
    }
    let actions = enemy.intent().map(|m| m.actions.clone());
    roll_intent(enemy, rng);
    actions
}
