//! Common error infrastructure for combat-core.
//!
//! This module provides shared types and traits used across all error types in the
//! workspace. Domain-specific errors (e.g., `TurnError`, `PileError`) are defined in
//! their respective modules alongside the operations they validate.
//!
//! # Design Principles
//!
//! - **Inert failures**: every rejected operation leaves state untouched
//! - **Severity Classification**: errors are categorized so hosts can decide
//!   whether a repeated failure points at a caller bug
//! - **No fatal engine errors**: the worst outcome of any call is a no-op

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: resource exhaustion; the same call may succeed later
/// - **Validation**: invalid input that should be rejected without retry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry later or with a different action.
    ///
    /// Examples: hand full, both draw and discard piles empty
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: wrong phase, insufficient energy, dead target
    Validation,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all combat errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait CombatError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
