//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// These cover the configuration-shape failures that must be rejected
/// before any round starts. Runtime failures of individual personas are
/// not errors at this level: they degrade into contribution statuses.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Roundtable '{0}' has no personas")]
    NoPersonas(String),

    #[error("Duplicate persona name '{name}' in roundtable '{roundtable}'")]
    DuplicatePersona { roundtable: String, name: String },

    #[error("Invalid round limits: min={min}, max={max} (need 1 <= min <= max)")]
    InvalidRounds { min: u32, max: u32 },

    #[error("Invalid question: {0}")]
    InvalidQuestion(String),
}
