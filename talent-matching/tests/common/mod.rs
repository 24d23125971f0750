//! Deterministic test doubles for the matcher

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use talent_core::{EmbeddingVector, FreelancerProfile, JobListing, TalentError, TalentResult};
use talent_embedding::{CompletionOptions, ModelGateway};
use talent_matching::MarketplaceStore;

const VOCABULARY: [&str; 6] = ["react", "node", "python", "design", "data", "rust"];

/// Bag-of-keywords embedding, so similar texts get similar vectors
pub fn keyword_embedding(text: &str) -> EmbeddingVector {
    let text = text.to_lowercase();
    VOCABULARY
        .iter()
        .map(|word| text.matches(word).count() as f32)
        .collect()
}

/// Gateway answering from keyword counts, counting every call
#[derive(Default)]
pub struct KeywordGateway {
    pub embed_calls: AtomicUsize,
    pub complete_calls: AtomicUsize,
    pub embedded_texts: Mutex<Vec<String>>,
    pub completion: Option<String>,
}

impl KeywordGateway {
    pub fn with_completion(completion: impl Into<String>) -> Self {
        Self {
            completion: Some(completion.into()),
            ..Default::default()
        }
    }

    pub fn embed_calls(&self) -> usize {
        self.embed_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelGateway for KeywordGateway {
    async fn embed(&self, text: &str) -> Option<EmbeddingVector> {
        self.embed_calls.fetch_add(1, Ordering::SeqCst);
        self.embedded_texts.lock().push(text.to_string());
        Some(keyword_embedding(text))
    }

    async fn complete(&self, _prompt: &str, _options: &CompletionOptions) -> Option<String> {
        self.complete_calls.fetch_add(1, Ordering::SeqCst);
        self.completion.clone()
    }
}

/// Gateway whose every call fails, like a model outage
#[derive(Default)]
pub struct FailingGateway {
    pub embed_calls: AtomicUsize,
}

#[async_trait]
impl ModelGateway for FailingGateway {
    async fn embed(&self, _text: &str) -> Option<EmbeddingVector> {
        self.embed_calls.fetch_add(1, Ordering::SeqCst);
        None
    }

    async fn complete(&self, _prompt: &str, _options: &CompletionOptions) -> Option<String> {
        None
    }
}

/// In-memory store
///
/// `find_open_jobs_excluding` deliberately ignores the exclusion list so the
/// matcher's own set-difference is exercised.
#[derive(Default)]
pub struct MemoryStore {
    pub jobs: Vec<JobListing>,
    pub profiles: Vec<FreelancerProfile>,
    /// (job_id, freelancer_id)
    pub applications: Vec<(i64, i64)>,
    pub fail: bool,
}

impl MemoryStore {
    fn check(&self) -> TalentResult<()> {
        if self.fail {
            Err(TalentError::storage("database is locked"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl MarketplaceStore for MemoryStore {
    async fn find_job_by_id(&self, job_id: i64) -> TalentResult<Option<JobListing>> {
        self.check()?;
        Ok(self.jobs.iter().find(|j| j.id == job_id).cloned())
    }

    async fn find_open_jobs_excluding(
        &self,
        _excluded_job_ids: &[i64],
        pool_limit: usize,
    ) -> TalentResult<Vec<JobListing>> {
        self.check()?;
        Ok(self
            .jobs
            .iter()
            .filter(|j| j.is_open())
            .take(pool_limit)
            .cloned()
            .collect())
    }

    async fn find_freelancer_profiles(
        &self,
        pool_limit: usize,
    ) -> TalentResult<Vec<FreelancerProfile>> {
        self.check()?;
        Ok(self.profiles.iter().take(pool_limit).cloned().collect())
    }

    async fn find_freelancer_profile_by_user_id(
        &self,
        user_id: i64,
    ) -> TalentResult<Option<FreelancerProfile>> {
        self.check()?;
        Ok(self.profiles.iter().find(|p| p.user_id == user_id).cloned())
    }

    async fn find_applied_job_ids(&self, freelancer_id: i64) -> TalentResult<Vec<i64>> {
        self.check()?;
        Ok(self
            .applications
            .iter()
            .filter(|(_, f)| *f == freelancer_id)
            .map(|(j, _)| *j)
            .collect())
    }

    async fn find_applicant_ids(&self, job_id: i64) -> TalentResult<Vec<i64>> {
        self.check()?;
        Ok(self
            .applications
            .iter()
            .filter(|(j, _)| *j == job_id)
            .map(|(_, f)| *f)
            .collect())
    }
}
