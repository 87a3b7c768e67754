//! Single-use potions.

use super::card::TargetType;

/// One effect of a potion.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PotionEffect {
    /// Registry key, e.g. `"HEAL"`.
    pub kind: String,
    pub value: i32,
}

impl PotionEffect {
    pub fn new(kind: impl AsRef<str>, value: i32) -> Self {
        Self {
            kind: kind.as_ref().to_owned(),
            value,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Potion {
    pub id: String,
    pub name: String,
    pub target: TargetType,
    pub effects: Vec<PotionEffect>,
}

impl Potion {
    pub fn new(id: impl Into<String>, name: impl Into<String>, target: TargetType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            target,
            effects: Vec::new(),
        }
    }

    pub fn with_effect(mut self, effect: PotionEffect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Potions aimed at a single enemy cannot be used without a living target.
    pub fn requires_target(&self) -> bool {
        self.target == TargetType::SingleEnemy
    }
}
