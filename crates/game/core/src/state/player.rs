//! The player: combat stats plus the run-persistent deck, relics and potions.

use arrayvec::ArrayVec;

use super::card::{Card, CardTemplate, CardUid};
use super::potion::Potion;
use super::relic::Relic;
use super::vitals::{CombatStats, Combatant, Vitals};
use crate::config::CombatConfig;

/// Potion slots: fixed capacity, nullable entries.
pub type PotionSlots = ArrayVec<Option<Potion>, { CombatConfig::MAX_POTION_SLOTS }>;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub vitals: Vitals,
    pub energy: u32,
    pub max_energy: u32,
    pub stats: CombatStats,
    pub gold: u32,
    deck: Vec<Card>,
    next_card_uid: u32,
    relics: Vec<Relic>,
    potions: PotionSlots,
}

impl Player {
    /// Creates a player with an empty deck and `slots` empty potion slots.
    pub fn new(max_hp: u32, slots: usize) -> Self {
        let mut potions = PotionSlots::new();
        for _ in 0..slots.min(CombatConfig::MAX_POTION_SLOTS) {
            potions.push(None);
        }
        Self {
            vitals: Vitals::new(max_hp),
            energy: CombatConfig::DEFAULT_MAX_ENERGY,
            max_energy: CombatConfig::DEFAULT_MAX_ENERGY,
            stats: CombatStats::default(),
            gold: 0,
            deck: Vec::new(),
            next_card_uid: 1,
            relics: Vec::new(),
            potions,
        }
    }

    pub fn with_max_energy(mut self, max_energy: u32) -> Self {
        self.max_energy = max_energy;
        self.energy = max_energy;
        self
    }

    pub fn with_gold(mut self, gold: u32) -> Self {
        self.gold = gold;
        self
    }

    // ------------------------------------------------------------------------
    // Deck
    // ------------------------------------------------------------------------

    /// Adds a copy of `template` to the deck and returns its instance id.
    pub fn add_card(&mut self, template: &CardTemplate) -> CardUid {
        let uid = self.allocate_uid();
        self.deck.push(Card::from_template(uid, template));
        uid
    }

    /// Allocates a fresh card uid (used for cards created mid-combat).
    pub fn allocate_uid(&mut self) -> CardUid {
        let uid = CardUid(self.next_card_uid);
        self.next_card_uid += 1;
        uid
    }

    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    // ------------------------------------------------------------------------
    // Relics
    // ------------------------------------------------------------------------

    /// Relics in obtain order.
    pub fn relics(&self) -> &[Relic] {
        &self.relics
    }

    pub fn has_relic(&self, id: &str) -> bool {
        self.relics.iter().any(|r| r.id == id)
    }

    pub fn push_relic(&mut self, relic: Relic) {
        self.relics.push(relic);
    }

    /// Relic slots for counter updates. The list itself only grows through
    /// [`Player::push_relic`], so indices stay stable.
    pub fn relics_mut(&mut self) -> &mut [Relic] {
        &mut self.relics
    }

    // ------------------------------------------------------------------------
    // Potions
    // ------------------------------------------------------------------------

    pub fn potions(&self) -> &[Option<Potion>] {
        &self.potions
    }

    pub fn potion(&self, slot: usize) -> Option<&Potion> {
        self.potions.get(slot).and_then(Option::as_ref)
    }

    /// Places a potion in the first empty slot and returns the slot index.
    ///
    /// Returns the potion back if every slot is taken.
    pub fn add_potion(&mut self, potion: Potion) -> Result<usize, Potion> {
        match self.potions.iter().position(Option::is_none) {
            Some(slot) => {
                self.potions[slot] = Some(potion);
                Ok(slot)
            }
            None => Err(potion),
        }
    }

    /// Removes and returns the potion in `slot`.
    pub fn take_potion(&mut self, slot: usize) -> Option<Potion> {
        self.potions.get_mut(slot).and_then(Option::take)
    }

    // ------------------------------------------------------------------------
    // Combat lifecycle
    // ------------------------------------------------------------------------

    /// Clears combat-scoped state: block, Strength, Dexterity, statuses.
    /// Energy refills to max.
    pub fn reset_for_combat(&mut self) {
        self.vitals.clear_block();
        self.stats.reset();
        self.energy = self.max_energy;
    }

    pub fn spend_energy(&mut self, amount: u32) -> bool {
        if self.energy < amount {
            return false;
        }
        self.energy -= amount;
        true
    }

    pub fn gain_energy(&mut self, amount: u32) {
        self.energy = self.energy.saturating_add(amount);
    }
}

impl Combatant for Player {
    fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    fn vitals_mut(&mut self) -> &mut Vitals {
        &mut self.vitals
    }

    fn stats(&self) -> &CombatStats {
        &self.stats
    }

    fn stats_mut(&mut self) -> &mut CombatStats {
        &mut self.stats
    }
}
