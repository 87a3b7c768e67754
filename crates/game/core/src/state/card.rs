//! Card templates and card instances.
//!
//! A [`CardTemplate`] is immutable content data. A [`Card`] is one copy of a
//! template in the player's deck: it owns its own clone of the effect list and
//! the mutable `upgraded` flag, so upgrading an instance never touches the
//! template or other copies.

use bitflags::bitflags;

/// Cost value marking a card that can never be played.
pub const UNPLAYABLE_COST: i32 = -1;

/// Card category.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CardType {
    Attack,
    Skill,
    Power,
    Status,
    Curse,
}

/// Who a card or potion is aimed at.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TargetType {
    /// The player.
    #[strum(serialize = "SELF")]
    #[cfg_attr(feature = "serde", serde(rename = "SELF"))]
    Caster,
    SingleEnemy,
    AllEnemies,
    RandomEnemy,
}

bitflags! {
    /// Keywords that change how a card moves between piles.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CardKeywords: u8 {
        /// Goes to the exhaust pile after being played.
        const EXHAUST = 1 << 0;
        /// Stays in hand at end of turn.
        const RETAIN = 1 << 1;
        /// Starts every combat in the opening hand.
        const INNATE = 1 << 2;
        /// Exhausted if still in hand at end of turn.
        const ETHEREAL = 1 << 3;
        /// Spends all energy; effects scale with energy spent.
        const X_COST = 1 << 4;
    }
}

/// One entry of a card's ordered effect list.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardEffect {
    /// Registry key, e.g. `"DAMAGE"`.
    pub kind: String,
    pub value: i32,
    /// Overrides the card's target type for this effect only.
    pub target: Option<TargetType>,
}

impl CardEffect {
    pub fn new(kind: impl AsRef<str>, value: i32) -> Self {
        Self {
            kind: kind.as_ref().to_owned(),
            value,
            target: None,
        }
    }

    pub fn with_target(mut self, target: TargetType) -> Self {
        self.target = Some(target);
        self
    }
}

/// Changes applied by upgrading a card. `None` fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardUpgrade {
    pub cost: Option<i32>,
    pub effects: Option<Vec<CardEffect>>,
    pub keywords: Option<CardKeywords>,
}

/// Immutable card definition supplied by the content catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardTemplate {
    pub id: String,
    pub name: String,
    pub card_type: CardType,
    /// Energy cost. [`UNPLAYABLE_COST`] means unplayable; ignored for X-cost.
    pub cost: i32,
    pub target: TargetType,
    pub effects: Vec<CardEffect>,
    pub keywords: CardKeywords,
    pub upgrade: Option<CardUpgrade>,
}

impl CardTemplate {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        card_type: CardType,
        cost: i32,
        target: TargetType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            card_type,
            cost,
            target,
            effects: Vec::new(),
            keywords: CardKeywords::empty(),
            upgrade: None,
        }
    }

    pub fn with_effect(mut self, effect: CardEffect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_keywords(mut self, keywords: CardKeywords) -> Self {
        self.keywords |= keywords;
        self
    }

    pub fn with_upgrade(mut self, upgrade: CardUpgrade) -> Self {
        self.upgrade = Some(upgrade);
        self
    }
}

/// Identity of a card instance within one player's deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardUid(pub u32);

impl core::fmt::Display for CardUid {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A card instance: a value copy of its template plus mutable flags.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    pub uid: CardUid,
    pub upgraded: bool,
    def: CardTemplate,
}

impl Card {
    pub fn from_template(uid: CardUid, template: &CardTemplate) -> Self {
        Self {
            uid,
            upgraded: false,
            def: template.clone(),
        }
    }

    pub fn id(&self) -> &str {
        &self.def.id
    }

    pub fn name(&self) -> &str {
        &self.def.name
    }

    pub fn card_type(&self) -> CardType {
        self.def.card_type
    }

    pub fn cost(&self) -> i32 {
        self.def.cost
    }

    pub fn target(&self) -> TargetType {
        self.def.target
    }

    pub fn effects(&self) -> &[CardEffect] {
        &self.def.effects
    }

    pub fn keywords(&self) -> CardKeywords {
        self.def.keywords
    }

    pub fn is_x_cost(&self) -> bool {
        self.def.keywords.contains(CardKeywords::X_COST)
    }

    /// Unplayable cards have cost [`UNPLAYABLE_COST`] and no X-cost keyword.
    pub fn is_playable(&self) -> bool {
        self.is_x_cost() || self.def.cost != UNPLAYABLE_COST
    }

    pub fn exhausts(&self) -> bool {
        self.def.keywords.contains(CardKeywords::EXHAUST)
    }

    pub fn retains(&self) -> bool {
        self.def.keywords.contains(CardKeywords::RETAIN)
    }

    pub fn is_innate(&self) -> bool {
        self.def.keywords.contains(CardKeywords::INNATE)
    }

    pub fn is_ethereal(&self) -> bool {
        self.def.keywords.contains(CardKeywords::ETHEREAL)
    }

    /// Applies the template's upgrade to this instance.
    ///
    /// Returns `false` if the card is already upgraded or has no upgrade.
    pub fn upgrade(&mut self) -> bool {
        if self.upgraded {
            return false;
        }
        let Some(upgrade) = self.def.upgrade.clone() else {
            return false;
        };
        if let Some(cost) = upgrade.cost {
            self.def.cost = cost;
        }
        if let Some(effects) = upgrade.effects {
            self.def.effects = effects;
        }
        if let Some(keywords) = upgrade.keywords {
            self.def.keywords = keywords;
        }
        self.upgraded = true;
        true
    }

    /// Plain record of this card for snapshots.
    pub fn record(&self) -> CardRecord {
        CardRecord {
            id: self.def.id.clone(),
            upgraded: self.upgraded,
        }
    }
}

/// Serializable reference to a card: template id plus upgrade flag.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardRecord {
    pub id: String,
    pub upgraded: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strike() -> CardTemplate {
        CardTemplate::new("strike", "Strike", CardType::Attack, 1, TargetType::SingleEnemy)
            .with_effect(CardEffect::new("DAMAGE", 6))
            .with_upgrade(CardUpgrade {
                effects: Some(vec![CardEffect::new("DAMAGE", 9)]),
                ..CardUpgrade::default()
            })
    }

    #[test]
    fn upgrade_changes_instance_only() {
        let template = strike();
        let mut card = Card::from_template(CardUid(1), &template);
        let other = Card::from_template(CardUid(2), &template);

        assert!(card.upgrade());
        assert!(card.upgraded);
        assert_eq!(card.effects()[0].value, 9);
        assert_eq!(other.effects()[0].value, 6);
        assert_eq!(template.effects[0].value, 6);
    }

    #[test]
    fn upgrade_applies_once() {
        let mut card = Card::from_template(CardUid(1), &strike());
        assert!(card.upgrade());
        assert!(!card.upgrade());
    }

    #[test]
    fn unplayable_unless_x_cost() {
        let curse = CardTemplate::new("wound", "Wound", CardType::Status, UNPLAYABLE_COST, TargetType::Caster);
        assert!(!Card::from_template(CardUid(1), &curse).is_playable());

        let whirl = CardTemplate::new("whirlwind", "Whirlwind", CardType::Attack, UNPLAYABLE_COST, TargetType::AllEnemies)
            .with_keywords(CardKeywords::X_COST);
        assert!(Card::from_template(CardUid(2), &whirl).is_playable());
    }

    #[test]
    fn target_type_uses_self_name() {
        assert_eq!(TargetType::Caster.to_string(), "SELF");
        assert_eq!("SINGLE_ENEMY".parse::<TargetType>(), Ok(TargetType::SingleEnemy));
        assert_eq!(CardType::Power.as_ref(), "POWER");
    }
}
