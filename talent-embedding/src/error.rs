//! Error types for model gateway operations
//!
//! These never cross the [`ModelGateway`](crate::ModelGateway) boundary: the
//! trait methods log them and return `None` instead.

use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EmbeddingError>;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("OpenAI API error: {0}")]
    OpenAI(#[from] async_openai::error::OpenAIError),

    #[error("Model request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Invalid embedding dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("Refusing to send empty input to the model")]
    EmptyInput,

    #[error("Request limiter closed")]
    LimiterClosed,

    #[error("Configuration error: {0}")]
    Config(String),
}
