//! Matching engine for the freelance marketplace
//!
//! This crate ranks freelancers for a job and jobs for a freelancer by
//! combining skill overlap, budget fit, semantic similarity and profile
//! quality into a bounded 0-100 score with human-readable reasons.

pub mod explainer;
pub mod matcher;
pub mod scoring;
pub mod skills;
pub mod store;
pub mod weights;

pub use explainer::MatchExplainer;
pub use matcher::{JobMatcher, MatcherConfig};
pub use scoring::{MatchDirection, ScoredMatch, Scorer, SemanticInputs};
pub use store::{MarketplaceStore, SqliteMarketplaceStore};
pub use weights::{MatchWeights, WeightsTable};
