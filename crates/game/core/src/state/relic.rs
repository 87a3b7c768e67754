//! Relics: persistent passive items with triggered effects.

/// Relic rarity tier.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RelicRarity {
    Starter,
    Common,
    Uncommon,
    Rare,
    Boss,
    Shop,
    Event,
}

/// Named combat events a relic effect can react to.
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
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase")]
pub enum RelicTrigger {
    OnObtain,
    OnCombatStart,
    OnTurnStart,
    OnTurnEnd,
    OnCardPlayed,
    OnAttackPlayed,
    OnSkillPlayed,
    OnPowerPlayed,
    OnFirstAttack,
    OnShuffle,
    OnPotionUsed,
    OnVictory,
    /// Never dispatched; queried through predicates.
    Passive,
}

/// One `(trigger, action, value)` tuple of a relic.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RelicEffect {
    pub trigger: RelicTrigger,
    /// Registry key, e.g. `"GAIN_BLOCK"`.
    pub action: String,
    /// Primary value. For `_EVERY_N` actions this is the threshold.
    pub value: i32,
    /// Secondary value used by threshold actions (the amount granted).
    pub amount: Option<i32>,
}

impl RelicEffect {
    pub fn new(trigger: RelicTrigger, action: impl AsRef<str>, value: i32) -> Self {
        Self {
            trigger,
            action: action.as_ref().to_owned(),
            value,
            amount: None,
        }
    }

    pub fn with_amount(mut self, amount: i32) -> Self {
        self.amount = Some(amount);
        self
    }
}

/// A relic owned by the player.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Relic {
    pub id: String,
    pub name: String,
    pub rarity: RelicRarity,
    pub effects: Vec<RelicEffect>,
    /// Event counter for threshold effects. Persists across turns and combats.
    pub counter: u32,
}

impl Relic {
    pub fn new(id: impl Into<String>, name: impl Into<String>, rarity: RelicRarity) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rarity,
            effects: Vec::new(),
            counter: 0,
        }
    }

    pub fn with_effect(mut self, effect: RelicEffect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Effects that react to `trigger`, in declaration order.
    pub fn effects_for(&self, trigger: RelicTrigger) -> impl Iterator<Item = &RelicEffect> {
        self.effects.iter().filter(move |e| e.trigger == trigger)
    }

    /// Whether any effect carries the given action.
    pub fn has_action(&self, action: &str) -> bool {
        self.effects.iter().any(|e| e.action == action)
    }

    /// Counts one qualifying event. Returns `true` when the threshold is
    /// reached, in which case the counter resets to 0.
    ///
    /// A threshold of 1 or less fires on every event.
    pub fn advance_counter(&mut self, threshold: i32) -> bool {
        self.counter = self.counter.saturating_add(1);
        if threshold <= 1 || self.counter >= threshold as u32 {
            self.counter = 0;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_fires_on_third_event_and_resets() {
        let mut relic = Relic::new("kunai", "Kunai", RelicRarity::Uncommon);

        assert!(!relic.advance_counter(3));
        assert!(!relic.advance_counter(3));
        assert_eq!(relic.counter, 2);
        assert!(relic.advance_counter(3));
        assert_eq!(relic.counter, 0);
    }

    #[test]
    fn trigger_names_are_camel_case() {
        assert_eq!(RelicTrigger::OnCombatStart.as_ref(), "onCombatStart");
        assert_eq!("onFirstAttack".parse::<RelicTrigger>(), Ok(RelicTrigger::OnFirstAttack));
        assert_eq!(RelicTrigger::Passive.to_string(), "passive");
    }

    #[test]
    fn effects_filter_by_trigger() {
        let relic = Relic::new("anchor", "Anchor", RelicRarity::Common)
            .with_effect(RelicEffect::new(RelicTrigger::OnCombatStart, "GAIN_BLOCK", 10))
            .with_effect(RelicEffect::new(RelicTrigger::OnTurnEnd, "GAIN_BLOCK", 1));

        let hits: Vec<_> = relic.effects_for(RelicTrigger::OnCombatStart).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].value, 10);
    }
}
