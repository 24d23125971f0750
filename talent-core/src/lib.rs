//! Core types for the marketplace matching engine
//!
//! This crate defines the read-only value objects the matcher consumes
//! (jobs and freelancer profiles) and the ranked results it produces.

pub mod candidate;
pub mod error;
pub mod job;
pub mod profile;

pub use candidate::{MatchCandidate, MatchResults, ScoreBreakdown};
pub use error::{TalentError, TalentResult};
pub use job::{EmbeddingVector, JobListing, JobStatus};
pub use profile::{FreelancerProfile, UserRole};
