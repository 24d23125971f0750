//! Job listing data structures

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Embedding vector produced by the external model
pub type EmbeddingVector = Vec<f32>;

/// Lifecycle status of a job listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Accepting applications
    #[default]
    Open,
    /// A contract has been signed
    InProgress,
    Completed,
    Cancelled,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Open => "open",
            JobStatus::InProgress => "in_progress",
            JobStatus::Completed => "completed",
            JobStatus::Cancelled => "cancelled",
        }
    }

    /// Parse a stored status string, `None` for unknown values
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Some(JobStatus::Open),
            "in_progress" => Some(JobStatus::InProgress),
            "completed" => Some(JobStatus::Completed),
            "cancelled" | "canceled" => Some(JobStatus::Cancelled),
            _ => None,
        }
    }
}

/// A job posted by a client
///
/// Owned by the storage layer; the matching engine only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub id: i64,

    /// User id of the client who posted the job
    pub client_id: i64,

    pub title: String,

    pub description: String,

    /// Required skills, in the order the client listed them
    #[serde(default)]
    pub required_skills: Vec<String>,

    /// Lower end of the fixed-price budget
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_min: Option<Decimal>,

    /// Upper end of the fixed-price budget
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_max: Option<Decimal>,

    #[serde(default)]
    pub status: JobStatus,

    pub created_at: DateTime<Utc>,

    /// Precomputed embedding of the job scope, if storage has one
    #[serde(default, skip_serializing)]
    pub embedding: Option<EmbeddingVector>,
}

impl JobListing {
    /// Create an open job with no budget, skills or embedding
    pub fn new(
        id: i64,
        client_id: i64,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            client_id,
            title: title.into(),
            description: description.into(),
            required_skills: Vec::new(),
            budget_min: None,
            budget_max: None,
            status: JobStatus::Open,
            created_at: Utc::now(),
            embedding: None,
        }
    }

    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_skills = skills.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_budget(mut self, min: Decimal, max: Decimal) -> Self {
        self.budget_min = Some(min);
        self.budget_max = Some(max);
        self
    }

    pub fn with_embedding(mut self, embedding: EmbeddingVector) -> Self {
        self.embedding = Some(embedding);
        self
    }

    /// Both budget bounds, when the client set them
    pub fn budget_band(&self) -> Option<(Decimal, Decimal)> {
        match (self.budget_min, self.budget_max) {
            (Some(min), Some(max)) => Some((min, max)),
            _ => None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == JobStatus::Open
    }
}
