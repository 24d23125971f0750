//! Error types for the matching engine

use thiserror::Error;

/// Workspace-wide error type
///
/// Model-layer failures never surface here: the gateway degrades them to
/// "no embedding" / "no completion". Storage failures do, unmasked.
#[derive(Error, Debug)]
pub enum TalentError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TalentError {
    pub fn storage(msg: impl Into<String>) -> Self {
        TalentError::Storage(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        TalentError::NotFound(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        TalentError::Config(msg.into())
    }

    /// Whether the caller asked for something that does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, TalentError::NotFound(_))
    }
}

/// Result type alias for matching operations
pub type TalentResult<T> = Result<T, TalentError>;
