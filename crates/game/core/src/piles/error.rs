use crate::error::{CombatError, ErrorSeverity};
use crate::state::Card;

/// Errors from pile mutations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PileError {
    /// The hand is at capacity. The rejected card is handed back.
    #[error("hand is full, cannot add {}", .0.name())]
    HandFull(Card),
}

impl PileError {
    /// Recovers the card rejected by a full hand.
    pub fn into_card(self) -> Card {
        match self {
            Self::HandFull(card) => card,
        }
    }
}

impl CombatError for PileError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::HandFull(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::HandFull(_) => "PILE_HAND_FULL",
        }
    }
}
