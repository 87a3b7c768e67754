/// Combat configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatConfig {
    /// Number of cards in the opening hand, innate cards included.
    pub initial_hand_size: usize,

    /// Number of cards drawn when the hand is refilled at the end of a player turn.
    pub cards_per_turn: usize,

    /// Potion slots a fresh player starts with (capped at `MAX_POTION_SLOTS`).
    pub potion_slots: usize,

    /// Run the enemy turn inside `end_player_turn()`.
    ///
    /// Hosts that want to delay the enemy turn for presentation disable this and
    /// call `run_enemy_turn()` themselves.
    pub auto_enemy_turn: bool,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_HAND_SIZE: usize = 10;
    pub const MAX_POTION_SLOTS: usize = 5;
    /// Nesting limit for relic triggers fired from inside other effects.
    pub const MAX_RELIC_TRIGGER_DEPTH: u8 = 4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_INITIAL_HAND_SIZE: usize = 5;
    pub const DEFAULT_CARDS_PER_TURN: usize = 5;
    pub const DEFAULT_POTION_SLOTS: usize = 3;
    pub const DEFAULT_MAX_ENERGY: u32 = 3;

    pub fn new() -> Self {
        Self {
            initial_hand_size: Self::DEFAULT_INITIAL_HAND_SIZE,
            cards_per_turn: Self::DEFAULT_CARDS_PER_TURN,
            potion_slots: Self::DEFAULT_POTION_SLOTS,
            auto_enemy_turn: true,
        }
    }

    pub fn with_initial_hand_size(mut self, initial_hand_size: usize) -> Self {
        self.initial_hand_size = initial_hand_size.min(Self::MAX_HAND_SIZE);
        self
    }

    pub fn with_cards_per_turn(mut self, cards_per_turn: usize) -> Self {
        self.cards_per_turn = cards_per_turn.min(Self::MAX_HAND_SIZE);
        self
    }

    pub fn with_potion_slots(mut self, potion_slots: usize) -> Self {
        self.potion_slots = potion_slots.min(Self::MAX_POTION_SLOTS);
        self
    }

    pub fn with_auto_enemy_turn(mut self, auto_enemy_turn: bool) -> Self {
        self.auto_enemy_turn = auto_enemy_turn;
        self
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
