//! Core types for embeddings

pub use talent_core::EmbeddingVector;
