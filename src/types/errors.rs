//! # Error Types
//!
//! Every engine function is total over its declared domain: failures come
//! back as variants of these enums, never as panics. A panic anywhere in
//! the calculation path indicates a bug (violated internal invariant).

use thiserror::Error;

pub type EngineResult<T> = Result<T, EngineError>;

/// Top-level error type for engine calls.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Unknown species: {name}")]
    UnknownSpecies {
        name: String,
        suggestions: Vec<String>,
    },

    #[error("Unknown move: {name}")]
    UnknownMove {
        name: String,
        suggestions: Vec<String>,
    },

    #[error("Unknown ability: {name}")]
    UnknownAbility { name: String },

    #[error("Unknown regulation: {code}")]
    UnknownRegulation { code: String },

    #[error("Data provider failed")]
    Provider(#[from] ProviderError),

    #[error("Paste parsing failed: {0}")]
    ParseError(String),

    #[error("Search cancelled")]
    Cancelled,
}

/// Errors surfaced by species/move/usage data providers.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Lookup miss. Callers retry once with the form suffix stripped
    /// before giving up.
    #[error("{kind} {name} not found")]
    NotFound { kind: &'static str, name: String },

    /// Retryable failure (network, disk). Callers retry with backoff.
    #[error("transient provider failure: {reason}")]
    Transient { reason: String },

    /// Non-retryable failure.
    #[error("permanent provider failure: {reason}")]
    Permanent { reason: String },
}

impl EngineError {
    /// Helper for the common invalid-field case.
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
