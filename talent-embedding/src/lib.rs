//! Model gateway and vector similarity for marketplace matching
//!
//! This crate isolates every call to the external language model behind the
//! two-method [`ModelGateway`] trait so that scoring and ranking can be tested
//! against deterministic mocks.
//!
//! ## Features
//! - Cosine similarity between embeddings
//! - OpenAI embeddings and chat completions with timeouts and a request limiter
//! - Text templates for embedding jobs and freelancer profiles

pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod limiter;
pub mod similarity;
pub mod text;
pub mod types;

pub use client::OpenAIGateway;
pub use config::GatewayConfig;
pub use error::{EmbeddingError, Result};
pub use gateway::{CompletionOptions, DisabledGateway, ModelGateway};
pub use limiter::{LimiterStats, RequestLimiter};
pub use similarity::cosine_similarity;
pub use types::EmbeddingVector;
