//! Health, block and modifier stats shared by the player and enemies.

use super::status::StatusEffects;

/// Hit points and block of a combat participant.
///
/// Invariant: `current_hp <= max_hp` after every mutation made through these
/// methods.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vitals {
    pub max_hp: u32,
    pub current_hp: u32,
    pub block: u32,
}

impl Vitals {
    /// Full health, no block.
    pub fn new(max_hp: u32) -> Self {
        Self {
            max_hp,
            current_hp: max_hp,
            block: 0,
        }
    }

    pub fn with_current_hp(mut self, current_hp: u32) -> Self {
        self.current_hp = current_hp.min(self.max_hp);
        self
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    /// Restores HP up to the maximum. Returns the amount actually healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.current_hp;
        self.current_hp = self.current_hp.saturating_add(amount).min(self.max_hp);
        self.current_hp - before
    }

    /// Removes HP directly, ignoring block. Returns the HP actually lost.
    pub fn lose_hp(&mut self, amount: u32) -> u32 {
        let before = self.current_hp;
        self.current_hp = self.current_hp.saturating_sub(amount);
        before - self.current_hp
    }

    /// Raises the maximum and heals by the same amount.
    pub fn increase_max_hp(&mut self, amount: u32) {
        self.max_hp = self.max_hp.saturating_add(amount);
        self.current_hp = self.current_hp.saturating_add(amount).min(self.max_hp);
    }

    pub fn add_block(&mut self, amount: u32) {
        self.block = self.block.saturating_add(amount);
    }

    pub fn clear_block(&mut self) {
        self.block = 0;
    }
}

/// Additive modifiers and status counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatStats {
    /// Added to every attack damage instance.
    pub strength: i32,
    /// Added to every block gain from cards.
    pub dexterity: i32,
    pub statuses: StatusEffects,
}

impl CombatStats {
    /// Resets everything that is combat-scoped.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Uniform access to a participant's vitals and stats.
///
/// The numeric model in [`crate::combat`] operates on anything that
/// implements this trait, so the player and enemies share one set of rules.
pub trait Combatant {
    fn vitals(&self) -> &Vitals;
    fn vitals_mut(&mut self) -> &mut Vitals;
    fn stats(&self) -> &CombatStats;
    fn stats_mut(&mut self) -> &mut CombatStats;

    fn is_alive(&self) -> bool {
        self.vitals().is_alive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heal_caps_at_max() {
        let mut vitals = Vitals::new(50).with_current_hp(45);
        assert_eq!(vitals.heal(10), 5);
        assert_eq!(vitals.current_hp, 50);
    }

    #[test]
    fn lose_hp_floors_at_zero() {
        let mut vitals = Vitals::new(10);
        vitals.block = 20;
        assert_eq!(vitals.lose_hp(15), 10);
        assert_eq!(vitals.current_hp, 0);
        assert_eq!(vitals.block, 20);
        assert!(!vitals.is_alive());
    }

    #[test]
    fn increase_max_hp_heals_same_amount() {
        let mut vitals = Vitals::new(70).with_current_hp(60);
        vitals.increase_max_hp(7);
        assert_eq!(vitals.max_hp, 77);
        assert_eq!(vitals.current_hp, 67);
    }
}
