//! Rejection reasons for player actions and combat assembly.
//!
//! Every variant describes a request that was refused before any state was
//! touched.

use combat_core::{CardUid, CombatError, CombatStatus, ErrorSeverity, TurnError, TurnPhase};
use thiserror::Error;

/// Why a card play was refused.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PlayError {
    #[error("combat is not active ({0:?})")]
    CombatNotActive(CombatStatus),

    #[error("cards can only be played during the player's action phase, current phase is {0}")]
    NotPlayerTurn(TurnPhase),

    #[error("card {0} is not in hand")]
    CardNotInHand(CardUid),

    #[error("card {0} is unplayable")]
    Unplayable(CardUid),

    #[error("card costs {required} energy, only {available} available")]
    InsufficientEnergy { required: u32, available: u32 },

    #[error("card requires a living enemy target, got {0:?}")]
    InvalidTarget(Option<usize>),
}

impl CombatError for PlayError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InsufficientEnergy { .. } => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CombatNotActive(_) => "PLAY_COMBAT_NOT_ACTIVE",
            Self::NotPlayerTurn(_) => "PLAY_NOT_PLAYER_TURN",
            Self::CardNotInHand(_) => "PLAY_CARD_NOT_IN_HAND",
            Self::Unplayable(_) => "PLAY_UNPLAYABLE",
            Self::InsufficientEnergy { .. } => "PLAY_INSUFFICIENT_ENERGY",
            Self::InvalidTarget(_) => "PLAY_INVALID_TARGET",
        }
    }
}

/// Why a potion use was refused.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PotionError {
    #[error("combat is not active ({0:?})")]
    CombatNotActive(CombatStatus),

    #[error("potions can only be used during the player's action phase, current phase is {0}")]
    NotPlayerTurn(TurnPhase),

    #[error("potion slot {slot} out of range ({slots} slots)")]
    SlotOutOfRange { slot: usize, slots: usize },

    #[error("potion slot {0} is empty")]
    EmptySlot(usize),

    #[error("potion requires a living enemy target, got {0:?}")]
    InvalidTarget(Option<usize>),
}

impl CombatError for PotionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CombatNotActive(_) => "POTION_COMBAT_NOT_ACTIVE",
            Self::NotPlayerTurn(_) => "POTION_NOT_PLAYER_TURN",
            Self::SlotOutOfRange { .. } => "POTION_SLOT_OUT_OF_RANGE",
            Self::EmptySlot(_) => "POTION_EMPTY_SLOT",
            Self::InvalidTarget(_) => "POTION_INVALID_TARGET",
        }
    }
}

/// Why a turn or lifecycle transition was refused.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("combat is not active ({0:?})")]
    CombatNotActive(CombatStatus),

    #[error("combat already started ({0:?})")]
    AlreadyStarted(CombatStatus),

    #[error(transparent)]
    Turn(#[from] TurnError),
}

impl CombatError for FlowError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CombatNotActive(_) => "FLOW_COMBAT_NOT_ACTIVE",
            Self::AlreadyStarted(_) => "FLOW_ALREADY_STARTED",
            Self::Turn(e) => e.error_code(),
        }
    }
}

/// Errors from [`CombatBuilder::build`](super::CombatBuilder::build).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("combat requires a player")]
    MissingPlayer,

    #[error("combat requires at least one enemy")]
    NoEnemies,
}

impl CombatError for BuildError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }
}

/// Errors from restoring a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("snapshot has {found} enemies, combat has {expected}")]
    EnemyCountMismatch { expected: usize, found: usize },

    #[error("snapshot enemy {index} is {found}, combat has {expected}")]
    EnemyMismatch {
        index: usize,
        expected: String,
        found: String,
    },
}

impl CombatError for SnapshotError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }
}
