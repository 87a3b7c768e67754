//! Status effect counters for combat participants.
//!
//! Unlike duration-by-tick systems, combat statuses are plain stack counters:
//! Weak, Vulnerable and Frail lose one stack at the end of their owner's turn,
//! Poison loses one stack each time it deals damage. A counter at 0 has no
//! effect.

/// Kinds of status effect a participant can carry.
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
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatusKind {
    /// Outgoing attack damage is multiplied by 0.75.
    Weak,
    /// Incoming attack damage is multiplied by 1.5.
    Vulnerable,
    /// Block gained from cards is multiplied by 0.75.
    Frail,
    /// Loses HP equal to the stack count after the owner's turn.
    Poison,
}

/// Active status counters on one participant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    pub weak: u32,
    pub vulnerable: u32,
    pub frail: u32,
    pub poison: u32,
}

impl StatusEffects {
    /// Creates an empty status set.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: StatusKind) -> u32 {
        match kind {
            StatusKind::Weak => self.weak,
            StatusKind::Vulnerable => self.vulnerable,
            StatusKind::Frail => self.frail,
            StatusKind::Poison => self.poison,
        }
    }

    fn slot_mut(&mut self, kind: StatusKind) -> &mut u32 {
        match kind {
            StatusKind::Weak => &mut self.weak,
            StatusKind::Vulnerable => &mut self.vulnerable,
            StatusKind::Frail => &mut self.frail,
            StatusKind::Poison => &mut self.poison,
        }
    }

    pub fn is_weak(&self) -> bool {
        self.weak > 0
    }

    pub fn is_vulnerable(&self) -> bool {
        self.vulnerable > 0
    }

    pub fn is_frail(&self) -> bool {
        self.frail > 0
    }

    /// Adds stacks of a status. Stacks accumulate.
    pub fn apply(&mut self, kind: StatusKind, stacks: u32) {
        let slot = self.slot_mut(kind);
        *slot = slot.saturating_add(stacks);
    }

    /// Decrements the turn-bound statuses (Weak, Vulnerable, Frail) by one.
    ///
    /// Poison is not touched; it decays when it deals damage.
    pub fn tick_durations(&mut self) {
        self.weak = self.weak.saturating_sub(1);
        self.vulnerable = self.vulnerable.saturating_sub(1);
        self.frail = self.frail.saturating_sub(1);
    }

    /// Returns the poison damage due this tick and decays poison by one.
    pub fn take_poison_tick(&mut self) -> u32 {
        let damage = self.poison;
        self.poison = self.poison.saturating_sub(1);
        damage
    }

    pub fn clear(&mut self) {
        *self = Self::empty();
    }
}
