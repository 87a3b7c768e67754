//! Card pile manager.
//!
//! [`CardPiles`] is the single owner of card placement during combat. Every
//! card instance lives in exactly one of the four piles, and the methods here
//! are the only legal ways to move it.
//!
//! The draw pile is a stack: its top is the end of the vector.
mod error;

pub use error::PileError;

use arrayvec::ArrayVec;

use crate::config::CombatConfig;
use crate::env::CombatRng;
use crate::state::{Card, CardRecord, CardUid, PilesRecord};

/// Hand storage with the hard hand-size cap baked into the type.
pub type Hand = ArrayVec<Card, { CombatConfig::MAX_HAND_SIZE }>;

/// Where a card is inserted into the draw pile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PilePosition {
    /// Drawn next.
    Top,
    Bottom,
    Random,
}

/// Result of a draw request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DrawOutcome {
    /// Uids of the cards that reached the hand, in draw order.
    pub drawn: Vec<CardUid>,
    /// Number of times the discard pile was shuffled into the draw pile.
    pub shuffles: u32,
}

/// Result of end-of-turn hand cleanup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HandCleanup {
    pub retained: Vec<CardUid>,
    pub discarded: Vec<CardUid>,
    pub exhausted: Vec<CardUid>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardPiles {
    draw: Vec<Card>,
    hand: Hand,
    discard: Vec<Card>,
    exhaust: Vec<Card>,
}

impl CardPiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seats innate cards in the hand and shuffles the rest into the draw pile.
    ///
    /// Innate cards beyond the hand cap go on top of the draw pile. Returns the
    /// number of cards placed in hand.
    pub fn initialize_from_deck<R: CombatRng>(&mut self, deck: &[Card], rng: &mut R) -> usize {
        self.clear();

        let (innate, rest): (Vec<Card>, Vec<Card>) =
            deck.iter().cloned().partition(Card::is_innate);

        self.draw = rest;
        rng.shuffle(&mut self.draw);

        let mut seated = 0;
        for card in innate {
            if let Err(overflow) = self.hand.try_push(card) {
                self.draw.push(overflow.element());
            } else {
                seated += 1;
            }
        }
        seated
    }

    pub fn clear(&mut self) {
        self.draw.clear();
        self.hand.clear();
        self.discard.clear();
        self.exhaust.clear();
    }

    // ========================================================================
    // Draw
    // ========================================================================

    /// Draws up to `count` cards from the top of the draw pile.
    ///
    /// When the draw pile runs out, the discard pile is shuffled into it. Stops
    /// silently when both are empty or the hand is full.
    pub fn draw_cards<R: CombatRng>(&mut self, count: usize, rng: &mut R) -> DrawOutcome {
        let mut outcome = DrawOutcome::default();
        for _ in 0..count {
            if self.hand.is_full() {
                break;
            }
            if self.draw.is_empty() {
                if self.discard.is_empty() {
                    break;
                }
                self.shuffle_discard_into_draw(rng);
                outcome.shuffles += 1;
            }
            let Some(card) = self.draw.pop() else {
                break;
            };
            outcome.drawn.push(card.uid);
            self.hand.push(card);
        }
        outcome
    }

    /// Moves the whole discard pile under the draw pile and shuffles it.
    pub fn shuffle_discard_into_draw<R: CombatRng>(&mut self, rng: &mut R) {
        let mut discard = core::mem::take(&mut self.discard);
        rng.shuffle(&mut discard);
        discard.append(&mut self.draw);
        self.draw = discard;
    }

    // ========================================================================
    // Hand moves
    // ========================================================================

    /// Removes a card from the hand without placing it anywhere.
    ///
    /// The caller must route the card to a pile afterwards.
    pub fn take_from_hand(&mut self, uid: CardUid) -> Option<Card> {
        let index = self.hand.iter().position(|c| c.uid == uid)?;
        Some(self.hand.remove(index))
    }

    /// Moves a card from hand to the discard pile.
    pub fn discard_card(&mut self, uid: CardUid) -> bool {
        match self.take_from_hand(uid) {
            Some(card) => {
                self.discard.push(card);
                true
            }
            None => false,
        }
    }

    /// Moves a card from hand to the exhaust pile.
    pub fn exhaust_card(&mut self, uid: CardUid) -> bool {
        match self.take_from_hand(uid) {
            Some(card) => {
                self.exhaust.push(card);
                true
            }
            None => false,
        }
    }

    /// End-of-turn cleanup: retained cards stay, ethereal cards exhaust,
    /// everything else is discarded.
    pub fn discard_hand(&mut self) -> HandCleanup {
        let mut cleanup = HandCleanup::default();
        let hand = core::mem::take(&mut self.hand);
        for card in hand {
            if card.retains() {
                cleanup.retained.push(card.uid);
                self.hand.push(card);
            } else if card.is_ethereal() {
                cleanup.exhausted.push(card.uid);
                self.exhaust.push(card);
            } else {
                cleanup.discarded.push(card.uid);
                self.discard.push(card);
            }
        }
        cleanup
    }

    // ========================================================================
    // Adds
    // ========================================================================

    /// Adds a card to the hand. A full hand hands the card back.
    pub fn add_to_hand(&mut self, card: Card) -> Result<(), PileError> {
        self.hand
            .try_push(card)
            .map_err(|overflow| PileError::HandFull(overflow.element()))
    }

    pub fn add_to_discard(&mut self, card: Card) {
        self.discard.push(card);
    }

    pub fn add_to_exhaust(&mut self, card: Card) {
        self.exhaust.push(card);
    }

    pub fn add_to_draw_pile<R: CombatRng>(
        &mut self,
        card: Card,
        position: PilePosition,
        rng: &mut R,
    ) {
        match position {
            PilePosition::Top => self.draw.push(card),
            PilePosition::Bottom => self.draw.insert(0, card),
            PilePosition::Random => {
                let index = rng.gen_range(self.draw.len() + 1);
                self.draw.insert(index, card);
            }
        }
    }

    // ========================================================================
    // Views
    // ========================================================================

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    /// Draw pile, bottom first. The next card drawn is the last entry.
    pub fn draw_pile(&self) -> &[Card] {
        &self.draw
    }

    pub fn discard_pile(&self) -> &[Card] {
        &self.discard
    }

    pub fn exhaust_pile(&self) -> &[Card] {
        &self.exhaust
    }

    pub fn hand_card(&self, uid: CardUid) -> Option<&Card> {
        self.hand.iter().find(|c| c.uid == uid)
    }

    pub fn in_hand(&self, uid: CardUid) -> bool {
        self.hand_card(uid).is_some()
    }

    pub fn is_hand_full(&self) -> bool {
        self.hand.is_full()
    }

    /// Cards across all four piles.
    pub fn total(&self) -> usize {
        self.draw.len() + self.hand.len() + self.discard.len() + self.exhaust.len()
    }

    // ========================================================================
    // Records
    // ========================================================================

    pub fn record(&self) -> PilesRecord {
        fn records(cards: &[Card]) -> Vec<CardRecord> {
            cards.iter().map(Card::record).collect()
        }
        PilesRecord {
            draw: records(&self.draw),
            hand: records(&self.hand),
            discard: records(&self.discard),
            exhaust: records(&self.exhaust),
        }
    }

    /// Rebuilds piles from a record. `lookup` turns each record back into a
    /// card instance; records it cannot resolve are skipped and counted.
    ///
    /// Hand entries beyond the cap go to the discard pile.
    pub fn from_record<F>(record: &PilesRecord, mut lookup: F) -> (Self, usize)
    where
        F: FnMut(&CardRecord) -> Option<Card>,
    {
        let mut missing = 0;
        let mut rebuild = |records: &[CardRecord]| -> Vec<Card> {
            records
                .iter()
                .filter_map(|r| {
                    let card = lookup(r);
                    if card.is_none() {
                        missing += 1;
                    }
                    card
                })
                .collect()
        };

        let draw = rebuild(&record.draw);
        let hand_cards = rebuild(&record.hand);
        let mut discard = rebuild(&record.discard);
        let exhaust = rebuild(&record.exhaust);

        let mut hand = Hand::new();
        for card in hand_cards {
            if let Err(overflow) = hand.try_push(card) {
                discard.push(overflow.element());
            }
        }

        (
            Self {
                draw,
                hand,
                discard,
                exhaust,
            },
            missing,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;
    use crate::state::{CardKeywords, CardTemplate, CardType, TargetType};

    fn template(id: &str, keywords: CardKeywords) -> CardTemplate {
        CardTemplate::new(id, id, CardType::Skill, 1, TargetType::Caster).with_keywords(keywords)
    }

    fn deck(count: u32) -> Vec<Card> {
        let plain = template("defend", CardKeywords::empty());
        (0..count).map(|i| Card::from_template(CardUid(i), &plain)).collect()
    }

    #[test]
    fn innate_cards_start_in_hand() {
        let mut rng = PcgRng::seed_from_u64(1);
        let mut cards = deck(6);
        cards.push(Card::from_template(CardUid(99), &template("bash", CardKeywords::INNATE)));

        let mut piles = CardPiles::new();
        let seated = piles.initialize_from_deck(&cards, &mut rng);

        assert_eq!(seated, 1);
        assert!(piles.in_hand(CardUid(99)));
        assert_eq!(piles.draw_pile().len(), 6);
    }

    #[test]
    fn draw_reshuffles_discard_when_empty() {
        let mut rng = PcgRng::seed_from_u64(2);
        let mut piles = CardPiles::new();
        piles.initialize_from_deck(&deck(5), &mut rng);

        piles.draw_cards(3, &mut rng);
        let hand: Vec<_> = piles.hand().iter().map(|c| c.uid).collect();
        for uid in hand {
            piles.discard_card(uid);
        }
        assert_eq!(piles.draw_pile().len(), 2);
        assert_eq!(piles.discard_pile().len(), 3);

        let outcome = piles.draw_cards(4, &mut rng);

        assert_eq!(outcome.drawn.len(), 4);
        assert_eq!(outcome.shuffles, 1);
        assert!(piles.discard_pile().is_empty());
        assert_eq!(piles.draw_pile().len(), 1);
        assert_eq!(piles.total(), 5);
    }

    #[test]
    fn draw_stops_when_everything_is_empty() {
        let mut rng = PcgRng::seed_from_u64(3);
        let mut piles = CardPiles::new();
        piles.initialize_from_deck(&deck(2), &mut rng);

        let outcome = piles.draw_cards(5, &mut rng);

        assert_eq!(outcome.drawn.len(), 2);
        assert_eq!(outcome.shuffles, 0);
        assert_eq!(piles.hand().len(), 2);
    }

    #[test]
    fn draw_stops_at_hand_cap() {
        let mut rng = PcgRng::seed_from_u64(4);
        let mut piles = CardPiles::new();
        piles.initialize_from_deck(&deck(15), &mut rng);

        piles.draw_cards(12, &mut rng);

        assert_eq!(piles.hand().len(), CombatConfig::MAX_HAND_SIZE);
        assert_eq!(piles.draw_pile().len(), 5);
    }

    #[test]
    fn full_hand_returns_the_card() {
        let mut rng = PcgRng::seed_from_u64(5);
        let mut piles = CardPiles::new();
        piles.initialize_from_deck(&deck(10), &mut rng);
        piles.draw_cards(10, &mut rng);

        let extra = Card::from_template(CardUid(50), &template("shiv", CardKeywords::empty()));
        let err = piles.add_to_hand(extra).unwrap_err();

        assert_eq!(err.into_card().uid, CardUid(50));
        assert_eq!(piles.total(), 10);
    }

    #[test]
    fn hand_cleanup_respects_keywords() {
        let mut rng = PcgRng::seed_from_u64(6);
        let cards = vec![
            Card::from_template(CardUid(1), &template("keep", CardKeywords::RETAIN | CardKeywords::INNATE)),
            Card::from_template(CardUid(2), &template("ghost", CardKeywords::ETHEREAL | CardKeywords::INNATE)),
            Card::from_template(CardUid(3), &template("plain", CardKeywords::INNATE)),
        ];
        let mut piles = CardPiles::new();
        piles.initialize_from_deck(&cards, &mut rng);

        let cleanup = piles.discard_hand();

        assert_eq!(cleanup.retained, [CardUid(1)]);
        assert_eq!(cleanup.exhausted, [CardUid(2)]);
        assert_eq!(cleanup.discarded, [CardUid(3)]);
        assert!(piles.in_hand(CardUid(1)));
        assert_eq!(piles.exhaust_pile().len(), 1);
        assert_eq!(piles.discard_pile().len(), 1);
    }

    #[test]
    fn draw_pile_positions() {
        let mut rng = PcgRng::seed_from_u64(7);
        let mut piles = CardPiles::new();
        piles.initialize_from_deck(&deck(3), &mut rng);
        let plain = template("x", CardKeywords::empty());

        piles.add_to_draw_pile(Card::from_template(CardUid(10), &plain), PilePosition::Top, &mut rng);
        piles.add_to_draw_pile(Card::from_template(CardUid(11), &plain), PilePosition::Bottom, &mut rng);
        piles.add_to_draw_pile(Card::from_template(CardUid(12), &plain), PilePosition::Random, &mut rng);

        assert_eq!(piles.draw_pile().len(), 6);
        assert_eq!(piles.draw_pile()[0].uid, CardUid(11));
        let drawn = piles.draw_cards(1, &mut rng).drawn;
        // Random insertion may land on top, so only assert the bottom and count.
        assert_eq!(drawn.len(), 1);
    }

    #[test]
    fn missing_card_moves_are_no_ops() {
        let mut rng = PcgRng::seed_from_u64(8);
        let mut piles = CardPiles::new();
        piles.initialize_from_deck(&deck(3), &mut rng);
        let before = piles.clone();

        assert!(!piles.discard_card(CardUid(77)));
        assert!(!piles.exhaust_card(CardUid(77)));
        assert_eq!(piles, before);
    }

    #[test]
    fn record_restore_keeps_pile_sizes() {
        let mut rng = PcgRng::seed_from_u64(9);
        let mut piles = CardPiles::new();
        let cards = deck(7);
        piles.initialize_from_deck(&cards, &mut rng);
        piles.draw_cards(3, &mut rng);
        let uid = piles.hand()[0].uid;
        piles.exhaust_card(uid);

        let record = piles.record();
        let plain = template("defend", CardKeywords::empty());
        let mut next = 100;
        let (restored, missing) = CardPiles::from_record(&record, |r| {
            next += 1;
            (r.id == "defend").then(|| Card::from_template(CardUid(next), &plain))
        });

        assert_eq!(missing, 0);
        assert_eq!(restored.hand().len(), 2);
        assert_eq!(restored.exhaust_pile().len(), 1);
        assert_eq!(restored.draw_pile().len(), 4);
    }
}
