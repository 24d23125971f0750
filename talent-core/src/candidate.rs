//! Ranked match results

use serde::{Deserialize, Serialize};

/// Weighted contribution of each scoring factor, before rounding
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub skills: f64,
    pub budget: f64,
    pub semantic: f64,
    pub experience: f64,
    pub track_record: f64,
    /// Raw cosine similarity, present only when both embeddings were available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic_similarity: Option<f64>,
}

impl ScoreBreakdown {
    /// Unrounded sum of all factors
    pub fn total(&self) -> f64 {
        self.skills + self.budget + self.semantic + self.experience + self.track_record
    }
}

/// An entity (job or freelancer) paired with its score against the subject of the query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCandidate<T> {
    #[serde(flatten)]
    pub entity: T,

    /// 0-100
    pub match_score: u8,

    /// Short explanations in evaluation order
    pub reasons: Vec<String>,

    pub breakdown: ScoreBreakdown,
}

/// Output of a matcher run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResults<T> {
    /// Best match first
    pub matches: Vec<MatchCandidate<T>>,

    /// False when the subject's embedding could not be resolved, so no
    /// candidate received a semantic score
    pub semantic_available: bool,

    /// Candidates scored after exclusions, before truncation
    pub pool_size: usize,
}

impl<T> MatchResults<T> {
    /// Result for a subject that does not exist or has nothing to rank
    pub fn empty() -> Self {
        Self {
            matches: Vec::new(),
            semantic_available: false,
            pool_size: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }
}

impl<T> Default for MatchResults<T> {
    fn default() -> Self {
        Self::empty()
    }
}
