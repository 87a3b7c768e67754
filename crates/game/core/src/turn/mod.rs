//! Turn phase state machine and play counters.
//!
//! ```text
//! TurnStart → PlayerAction → TurnEnd → EnemyTurn → TurnStart …
//! ```
//!
//! The manager only validates and records; it never touches cards or HP.
mod errors;
mod intent;

pub use errors::TurnError;
pub use intent::{advance_intent, roll_intent};

use crate::env::CombatRng;
use crate::state::{CardType, Enemy, EnemyAction, TurnRecord};

/// Phase within one round.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TurnPhase {
    #[default]
    TurnStart,
    PlayerAction,
    TurnEnd,
    EnemyTurn,
}

/// Cards played, per turn and per combat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnCounters {
    pub cards_this_turn: u32,
    pub attacks_this_turn: u32,
    pub skills_this_turn: u32,
    pub powers_this_turn: u32,
    pub cards_this_combat: u32,
    pub attacks_this_combat: u32,
}

impl TurnCounters {
    fn reset_turn(&mut self) {
        self.cards_this_turn = 0;
        self.attacks_this_turn = 0;
        self.skills_this_turn = 0;
        self.powers_this_turn = 0;
    }
}

/// What recording a card play revealed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CardPlayRecord {
    /// This was the first Attack played this combat.
    pub first_attack: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnManager {
    turn: u32,
    phase: TurnPhase,
    counters: TurnCounters,
    first_attack_played: bool,
}

impl TurnManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn counters(&self) -> TurnCounters {
        self.counters
    }

    pub fn is_player_turn(&self) -> bool {
        self.phase == TurnPhase::PlayerAction
    }

    /// Clears everything for a new combat.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Increments the turn, resets per-turn counters, enters `PlayerAction`.
    pub fn start_turn(&mut self) -> u32 {
        self.turn += 1;
        self.counters.reset_turn();
        self.phase = TurnPhase::PlayerAction;
        self.turn
    }

    /// `PlayerAction → TurnEnd`.
    pub fn end_player_turn(&mut self) -> Result<(), TurnError> {
        self.expect(TurnPhase::PlayerAction)?;
        self.phase = TurnPhase::TurnEnd;
        Ok(())
    }

    /// `TurnEnd → EnemyTurn`.
    pub fn begin_enemy_turn(&mut self) -> Result<(), TurnError> {
        self.expect(TurnPhase::TurnEnd)?;
        self.phase = TurnPhase::EnemyTurn;
        Ok(())
    }

    /// `EnemyTurn → TurnStart`.
    pub fn end_enemy_turn(&mut self) -> Result<(), TurnError> {
        self.expect(TurnPhase::EnemyTurn)?;
        self.phase = TurnPhase::TurnStart;
        Ok(())
    }

    fn expect(&self, expected: TurnPhase) -> Result<(), TurnError> {
        if self.phase != expected {
            return Err(TurnError::WrongPhase {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }

    /// Updates counters. Flags the first Attack of the combat exactly once.
    pub fn record_card_played(&mut self, card_type: CardType) -> CardPlayRecord {
        let c = &mut self.counters;
        c.cards_this_turn += 1;
        c.cards_this_combat += 1;

        let mut record = CardPlayRecord::default();
        match card_type {
            CardType::Attack => {
                c.attacks_this_turn += 1;
                c.attacks_this_combat += 1;
                if !self.first_attack_played {
                    self.first_attack_played = true;
                    record.first_attack = true;
                }
            }
            CardType::Skill => c.skills_this_turn += 1,
            CardType::Power => c.powers_this_turn += 1,
            CardType::Status | CardType::Curse => {}
        }
        record
    }

    /// Executes every living enemy's telegraphed move and rolls its next
    /// intent, in roster order.
    ///
    /// Returns `(enemy index, actions)` pairs; the caller applies the actions.
    ///
    /// This is the batch entry point for hosts that resolve enemy turns with
    /// their own rules. `CombatManager` instead calls [`advance_intent`] one
    /// enemy at a time, so a defeated player stops the rest of the roster
    /// from acting or rolling.
    pub fn enemy_actions<R: CombatRng>(
        &self,
        enemies: &mut [Enemy],
        rng: &mut R,
    ) -> Vec<(usize, Vec<EnemyAction>)> {
        enemies
            .iter_mut()
            .enumerate()
            .filter_map(|(index, enemy)| advance_intent(enemy, rng).map(|actions| (index, actions)))
            .collect()
    }

    pub fn record(&self) -> TurnRecord {
        TurnRecord {
            turn: self.turn,
            phase: self.phase,
            counters: self.counters,
            first_attack_played: self.first_attack_played,
        }
    }

    pub fn from_record(record: &TurnRecord) -> Self {
        Self {
            turn: record.turn,
            phase: record.phase,
            counters: record.counters,
            first_attack_played: record.first_attack_played,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_cycle() {
        let mut turns = TurnManager::new();
        assert_eq!(turns.phase(), TurnPhase::TurnStart);

        assert_eq!(turns.start_turn(), 1);
        assert!(turns.is_player_turn());
        turns.end_player_turn().unwrap();
        turns.begin_enemy_turn().unwrap();
        turns.end_enemy_turn().unwrap();
        assert_eq!(turns.phase(), TurnPhase::TurnStart);
        assert_eq!(turns.start_turn(), 2);
    }

    #[test]
    fn end_player_turn_outside_player_action_fails() {
        let mut turns = TurnManager::new();

        let err = turns.end_player_turn().unwrap_err();

        assert_eq!(err, TurnError::WrongPhase {
            expected: TurnPhase::PlayerAction,
            actual: TurnPhase::TurnStart,
        });
        assert_eq!(turns.phase(), TurnPhase::TurnStart);
    }

    #[test]
    fn first_attack_flagged_once_per_combat() {
        let mut turns = TurnManager::new();
        turns.start_turn();

        assert!(!turns.record_card_played(CardType::Skill).first_attack);
        assert!(turns.record_card_played(CardType::Attack).first_attack);
        assert!(!turns.record_card_played(CardType::Attack).first_attack);

        turns.end_player_turn().unwrap();
        turns.begin_enemy_turn().unwrap();
        turns.end_enemy_turn().unwrap();
        turns.start_turn();
        assert!(!turns.record_card_played(CardType::Attack).first_attack);
    }

    #[test]
    fn per_turn_counters_reset_combat_counters_do_not() {
        let mut turns = TurnManager::new();
        turns.start_turn();
        turns.record_card_played(CardType::Attack);
        turns.record_card_played(CardType::Power);

        turns.end_player_turn().unwrap();
        turns.begin_enemy_turn().unwrap();
        turns.end_enemy_turn().unwrap();
        turns.start_turn();

        let counters = turns.counters();
        assert_eq!(counters.cards_this_turn, 0);
        assert_eq!(counters.powers_this_turn, 0);
        assert_eq!(counters.cards_this_combat, 2);
        assert_eq!(counters.attacks_this_combat, 1);
    }

    #[test]
    fn enemy_actions_skip_the_dead() {
        use crate::env::PcgRng;
        use crate::state::{EnemyMove, EnemyTemplate};

        let template = EnemyTemplate::new("louse", "Louse", 12)
            .with_move(EnemyMove::new("bite", 1).with_action(EnemyAction::Attack { damage: 5, hits: 1 }));
        let mut enemies = vec![Enemy::from_template(&template), Enemy::from_template(&template)];
        let mut rng = PcgRng::seed_from_u64(21);
        for enemy in &mut enemies {
            roll_intent(enemy, &mut rng);
        }
        enemies[0].vitals.current_hp = 0;

        let actions = TurnManager::new().enemy_actions(&mut enemies, &mut rng);

        assert_eq!(actions, vec![(1, vec![EnemyAction::Attack { damage: 5, hits: 1 }])]);
    }
}
