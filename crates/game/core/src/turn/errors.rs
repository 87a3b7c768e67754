use super::TurnPhase;
use crate::error::{CombatError, ErrorSeverity};

/// Errors that can occur during turn transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("turn transition requires phase {expected}, current phase is {actual}")]
    WrongPhase {
        expected: TurnPhase,
        actual: TurnPhase,
    },
}

impl CombatError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::WrongPhase { .. } => "TURN_WRONG_PHASE",
        }
    }
}
