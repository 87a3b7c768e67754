//! Damage calculation and application.

use crate::state::{Combatant, Vitals};

// ============================================================================
// Damage Calculation
// ============================================================================

/// Calculate the damage of one attack instance.
///
/// # Formula
///
/// ```text
/// value = base + strength
/// if attacker weak:      value = floor(value * 0.75)
/// if defender vulnerable: value = floor(value * 1.5)
/// final = max(value, 0)
/// ```
///
/// Multipliers are applied with integer arithmetic (`* 3 / 4`, `* 3 / 2`)
/// using floor division, so negative intermediates round toward negative
/// infinity before the final clamp.
pub fn calculate_damage(
    base: i32,
    strength: i32,
    attacker_weak: bool,
    defender_vulnerable: bool,
) -> u32 {
    let mut value = base.saturating_add(strength);
    if attacker_weak {
        value = value.saturating_mul(3).div_euclid(4);
    }
    if defender_vulnerable {
        value = value.saturating_mul(3).div_euclid(2);
    }
    value.max(0) as u32
}

/// Result of applying one damage instance to a participant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageOutcome {
    /// Damage absorbed by block.
    pub blocked: u32,
    /// HP actually removed.
    pub hp_lost: u32,
    pub hp_before: u32,
    pub hp_after: u32,
}

impl DamageOutcome {
    /// Whether this instance took the target from alive to 0 HP.
    pub fn is_lethal(&self) -> bool {
        self.hp_before > 0 && self.hp_after == 0
    }
}

// ============================================================================
// Damage Application
// ============================================================================

/// Apply a damage instance: block absorbs first, the remainder is lost as HP.
///
/// Both block and HP floor at 0.
pub fn apply_damage(vitals: &mut Vitals, damage: u32) -> DamageOutcome {
    apply_damage_reduced(vitals, damage, 0)
}

/// Like [`apply_damage`], but the HP portion is reduced by `hp_loss_reduction`
/// after block has absorbed its share.
pub fn apply_damage_reduced(
    vitals: &mut Vitals,
    damage: u32,
    hp_loss_reduction: u32,
) -> DamageOutcome {
    let hp_before = vitals.current_hp;
    let blocked = damage.min(vitals.block);
    vitals.block -= blocked;
    let hp_lost = vitals.lose_hp((damage - blocked).saturating_sub(hp_loss_reduction));

    DamageOutcome {
        blocked,
        hp_lost,
        hp_before,
        hp_after: vitals.current_hp,
    }
}

/// Resolve one attack from `attacker` against `defender` and apply it.
///
/// `extra_strength` is added on top of the attacker's own Strength (used for
/// conditional bonuses such as low-HP relics).
pub fn attack<A, D>(base: i32, extra_strength: i32, attacker: &A, defender: &mut D) -> DamageOutcome
where
    A: Combatant + ?Sized,
    D: Combatant + ?Sized,
{
    let damage = calculate_damage(
        base,
        attacker.stats().strength.saturating_add(extra_strength),
        attacker.stats().statuses.is_weak(),
        defender.stats().statuses.is_vulnerable(),
    );
    apply_damage(defender.vitals_mut(), damage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strength_adds_before_multipliers() {
        assert_eq!(calculate_damage(6, 2, false, false), 8);
        assert_eq!(calculate_damage(6, 2, true, false), 6);
        assert_eq!(calculate_damage(6, 2, false, true), 12);
    }

    #[test]
    fn weak_then_vulnerable_rounds_down_each_step() {
        // 10 -> 7 (weak) -> 10 (vulnerable)
        assert_eq!(calculate_damage(10, 0, true, true), 10);
        // 7 -> 5 -> 7
        assert_eq!(calculate_damage(7, 0, true, true), 7);
    }

    #[test]
    fn negative_strength_clamps_to_zero() {
        assert_eq!(calculate_damage(3, -5, false, false), 0);
        assert_eq!(calculate_damage(3, -5, false, true), 0);
    }

    #[test]
    fn block_absorbs_before_hp() {
        let mut vitals = Vitals::new(40);
        vitals.block = 5;

        let outcome = apply_damage(&mut vitals, 8);

        assert_eq!(outcome.blocked, 5);
        assert_eq!(outcome.hp_lost, 3);
        assert_eq!(vitals.block, 0);
        assert_eq!(vitals.current_hp, 37);
    }

    #[test]
    fn overkill_floors_hp_at_zero() {
        let mut vitals = Vitals::new(10).with_current_hp(4);

        let outcome = apply_damage(&mut vitals, 20);

        assert_eq!(outcome.hp_lost, 4);
        assert_eq!(vitals.current_hp, 0);
        assert!(outcome.is_lethal());
    }

    #[test]
    fn reduction_applies_after_block() {
        let mut vitals = Vitals::new(40);
        vitals.block = 5;

        let outcome = apply_damage_reduced(&mut vitals, 8, 1);

        assert_eq!(outcome.blocked, 5);
        assert_eq!(outcome.hp_lost, 2);
        assert_eq!(apply_damage_reduced(&mut vitals, 1, 1).hp_lost, 0);
    }

    #[test]
    fn zero_damage_is_inert() {
        let mut vitals = Vitals::new(10);
        vitals.block = 3;

        let outcome = apply_damage(&mut vitals, 0);

        assert_eq!(outcome, DamageOutcome {
            blocked: 0,
            hp_lost: 0,
            hp_before: 10,
            hp_after: 10,
        });
        assert_eq!(vitals.block, 3);
    }
}
