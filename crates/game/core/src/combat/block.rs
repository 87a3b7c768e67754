//! Block gain.

use crate::state::Combatant;

/// Calculate block gained from a card or enemy move.
///
/// `value + dexterity`, then Frail multiplies by 0.75 (floor), clamped at 0.
pub fn calculate_block(value: i32, dexterity: i32, frail: bool) -> u32 {
    let mut block = value.saturating_add(dexterity);
    if frail {
        block = block.saturating_mul(3).div_euclid(4);
    }
    block.max(0) as u32
}

/// Add modified block to a participant. Returns the amount gained.
///
/// Block is added to the current total, never replaced.
pub fn gain_block<C: Combatant + ?Sized>(target: &mut C, value: i32) -> u32 {
    let amount = calculate_block(
        value,
        target.stats().dexterity,
        target.stats().statuses.is_frail(),
    );
    target.vitals_mut().add_block(amount);
    amount
}

/// Add block that bypasses Dexterity and Frail (relics, potions).
pub fn gain_raw_block<C: Combatant + ?Sized>(target: &mut C, value: i32) -> u32 {
    let amount = value.max(0) as u32;
    target.vitals_mut().add_block(amount);
    amount
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dexterity_then_frail() {
        assert_eq!(calculate_block(5, 0, false), 5);
        assert_eq!(calculate_block(5, 2, false), 7);
        assert_eq!(calculate_block(5, 2, true), 5);
        assert_eq!(calculate_block(5, 3, true), 6);
    }

    #[test]
    fn negative_dexterity_clamps() {
        assert_eq!(calculate_block(5, -8, false), 0);
    }
}
