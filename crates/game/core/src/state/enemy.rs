//! Enemies and their weighted move sets.

use super::vitals::{CombatStats, Combatant, Vitals};

/// A single step of an enemy move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnemyAction {
    /// `hits` separate damage instances of `damage` base each.
    Attack { damage: i32, hits: u32 },
    /// Gain block (modified by the enemy's Dexterity and Frail).
    Block(i32),
    GainStrength(i32),
    ApplyWeak(u32),
    ApplyVulnerable(u32),
    ApplyFrail(u32),
    Heal(u32),
}

/// A named, weighted move. The chosen move is telegraphed as the intent.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyMove {
    pub id: String,
    pub name: String,
    /// Relative weight for the intent roll.
    pub weight: u32,
    pub actions: Vec<EnemyAction>,
}

impl EnemyMove {
    pub fn new(id: impl Into<String>, weight: u32) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            weight,
            actions: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_action(mut self, action: EnemyAction) -> Self {
        self.actions.push(action);
        self
    }
}

/// Immutable enemy definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTemplate {
    pub id: String,
    pub name: String,
    pub max_hp: u32,
    pub moves: Vec<EnemyMove>,
}

impl EnemyTemplate {
    pub fn new(id: impl Into<String>, name: impl Into<String>, max_hp: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            max_hp,
            moves: Vec::new(),
        }
    }

    pub fn with_move(mut self, enemy_move: EnemyMove) -> Self {
        self.moves.push(enemy_move);
        self
    }
}

/// An enemy instance for one combat.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enemy {
    pub id: String,
    pub name: String,
    pub vitals: Vitals,
    pub stats: CombatStats,
    pub moves: Vec<EnemyMove>,
    /// Index into `moves` of the telegraphed next move.
    pub current_intent: Option<usize>,
}

impl Enemy {
    pub fn from_template(template: &EnemyTemplate) -> Self {
        Self {
            id: template.id.clone(),
            name: template.name.clone(),
            vitals: Vitals::new(template.max_hp),
            stats: CombatStats::default(),
            moves: template.moves.clone(),
            current_intent: None,
        }
    }

    /// The telegraphed move, if one has been rolled.
    pub fn intent(&self) -> Option<&EnemyMove> {
        self.current_intent.and_then(|i| self.moves.get(i))
    }

    pub fn move_weights(&self) -> Vec<u32> {
        self.moves.iter().map(|m| m.weight).collect()
    }
}

impl Combatant for Enemy {
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
