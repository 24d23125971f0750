//! Bidirectional matcher
//!
//! Both pipelines follow the same shape: load the subject, load a bounded
//! candidate pool, drop candidates already related to the subject, resolve
//! embeddings, score, stable-sort and truncate.

use std::collections::HashSet;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use talent_core::{
    EmbeddingVector, FreelancerProfile, JobListing, MatchCandidate, MatchResults, TalentError,
    TalentResult,
};
use talent_embedding::{
    text::{job_text, profile_summary_text, profile_text},
    ModelGateway,
};
use tracing::{debug, info, instrument, warn};

use crate::{
    scoring::{MatchDirection, Scorer, SemanticInputs},
    store::MarketplaceStore,
    weights::WeightsTable,
};

/// Configuration for the matcher
#[derive(Debug, Clone)]
pub struct MatcherConfig {
    /// Freelancer profiles considered per job
    pub freelancer_pool_limit: usize,
    /// Open jobs considered per freelancer
    pub job_pool_limit: usize,
    /// Embed candidates that have no stored vector
    pub embed_missing_candidates: bool,
    /// Concurrent embedding requests during candidate fan-out
    pub embedding_concurrency: usize,
    pub weights: WeightsTable,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            freelancer_pool_limit: 100,
            job_pool_limit: 50,
            embed_missing_candidates: true,
            embedding_concurrency: 8,
            weights: WeightsTable::default(),
        }
    }
}

impl MatcherConfig {
    /// Read overrides from the environment
    ///
    /// - `MATCH_FREELANCER_POOL`, `MATCH_JOB_POOL`
    /// - `MATCH_EMBED_CONCURRENCY`, `MATCH_EMBED_MISSING` (`true`/`false`)
    /// - `MATCH_WEIGHTS_PATH`: JSON weights table
    pub fn from_env() -> TalentResult<Self> {
        let mut config = Self::default();

        if let Some(n) = parse_env::<usize>("MATCH_FREELANCER_POOL")? {
            config.freelancer_pool_limit = n;
        }
        if let Some(n) = parse_env::<usize>("MATCH_JOB_POOL")? {
            config.job_pool_limit = n;
        }
        if let Some(n) = parse_env::<usize>("MATCH_EMBED_CONCURRENCY")? {
            config.embedding_concurrency = n;
        }
        if let Some(flag) = parse_env::<bool>("MATCH_EMBED_MISSING")? {
            config.embed_missing_candidates = flag;
        }
        if let Ok(path) = std::env::var("MATCH_WEIGHTS_PATH") {
            if !path.trim().is_empty() {
                config.weights = WeightsTable::from_json_file(path.trim())?;
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> TalentResult<()> {
        if self.freelancer_pool_limit == 0 || self.job_pool_limit == 0 {
            return Err(TalentError::config("pool limits must be greater than zero"));
        }
        if self.embedding_concurrency == 0 {
            return Err(TalentError::config(
                "embedding_concurrency must be greater than zero",
            ));
        }
        self.weights.validate()
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> TalentResult<Option<T>> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| TalentError::config(format!("{} has an invalid value: {:?}", name, raw))),
        Err(_) => Ok(None),
    }
}

/// Ranks freelancers for jobs and jobs for freelancers
///
/// Stateless between calls; the only shared state is inside the gateway.
pub struct JobMatcher {
    store: Arc<dyn MarketplaceStore>,
    gateway: Arc<dyn ModelGateway>,
    config: MatcherConfig,
    freelancer_scorer: Scorer,
    job_scorer: Scorer,
}

impl JobMatcher {
    /// Create a matcher with default configuration
    pub fn new(store: Arc<dyn MarketplaceStore>, gateway: Arc<dyn ModelGateway>) -> Self {
        Self {
            store,
            gateway,
            config: MatcherConfig::default(),
            freelancer_scorer: Scorer::for_direction(MatchDirection::FreelancersForJob),
            job_scorer: Scorer::for_direction(MatchDirection::JobsForFreelancer),
        }
    }

    /// Create a matcher with custom config
    pub fn with_config(
        store: Arc<dyn MarketplaceStore>,
        gateway: Arc<dyn ModelGateway>,
        config: MatcherConfig,
    ) -> TalentResult<Self> {
        config.validate()?;
        let freelancer_scorer = Scorer::new(
            MatchDirection::FreelancersForJob,
            config.weights.freelancers_for_job,
        )?;
        let job_scorer = Scorer::new(
            MatchDirection::JobsForFreelancer,
            config.weights.jobs_for_freelancer,
        )?;

        Ok(Self {
            store,
            gateway,
            config,
            freelancer_scorer,
            job_scorer,
        })
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Best freelancers for a job, best first
    ///
    /// An unknown job yields empty results. Freelancers who already applied
    /// are not suggested.
    #[instrument(skip(self))]
    pub async fn match_freelancers_for_job(
        &self,
        job_id: i64,
        limit: usize,
    ) -> TalentResult<MatchResults<FreelancerProfile>> {
        if limit == 0 {
            return Ok(MatchResults::empty());
        }

        let Some(job) = self.store.find_job_by_id(job_id).await? else {
            info!("Job {} not found, nothing to match", job_id);
            return Ok(MatchResults::empty());
        };

        let applicants: HashSet<i64> = self
            .store
            .find_applicant_ids(job_id)
            .await?
            .into_iter()
            .collect();
        let candidates: Vec<FreelancerProfile> = self
            .store
            .find_freelancer_profiles(self.config.freelancer_pool_limit)
            .await?
            .into_iter()
            .filter(|p| p.is_freelancer() && !applicants.contains(&p.user_id))
            .collect();
        let pool_size = candidates.len();

        let job_embedding = self.resolve_embedding(job.embedding.as_ref(), || job_text(&job)).await;
        let semantic_available = job_embedding.is_some();
        if !semantic_available {
            warn!("No embedding for job {}, ranking without semantic scores", job_id);
        }

        // Candidate vectors are useless without the subject's
        let computed = if semantic_available {
            self.embed_missing(&candidates, |p| {
                if p.embedding.is_some() {
                    None
                } else {
                    profile_text(p)
                }
            })
            .await
        } else {
            vec![None; candidates.len()]
        };

        let mut matches: Vec<MatchCandidate<FreelancerProfile>> = candidates
            .into_iter()
            .zip(computed)
            .map(|(profile, computed)| {
                let scored = self.freelancer_scorer.score(
                    &job,
                    &profile,
                    SemanticInputs {
                        job: job_embedding.as_deref(),
                        profile: profile.embedding.as_deref().or(computed.as_deref()),
                    },
                );
                debug!(
                    "Freelancer {} scored {} for job {}",
                    profile.user_id, scored.match_score, job_id
                );
                MatchCandidate {
                    entity: profile,
                    match_score: scored.match_score,
                    reasons: scored.reasons,
                    breakdown: scored.breakdown,
                }
            })
            .collect();

        rank(&mut matches, limit);

        info!(
            "Matched {} of {} freelancers for job {}",
            matches.len(),
            pool_size,
            job_id
        );

        Ok(MatchResults {
            matches,
            semantic_available,
            pool_size,
        })
    }

    /// Best open jobs for a freelancer, best first
    ///
    /// An unknown freelancer yields empty results. Jobs the freelancer
    /// already applied to are not suggested.
    #[instrument(skip(self))]
    pub async fn match_jobs_for_freelancer(
        &self,
        freelancer_id: i64,
        limit: usize,
    ) -> TalentResult<MatchResults<JobListing>> {
        if limit == 0 {
            return Ok(MatchResults::empty());
        }

        let Some(profile) = self
            .store
            .find_freelancer_profile_by_user_id(freelancer_id)
            .await?
        else {
            info!("Freelancer {} not found, nothing to match", freelancer_id);
            return Ok(MatchResults::empty());
        };

        let applied = self.store.find_applied_job_ids(freelancer_id).await?;
        let applied_set: HashSet<i64> = applied.iter().copied().collect();
        let candidates: Vec<JobListing> = self
            .store
            .find_open_jobs_excluding(&applied, self.config.job_pool_limit)
            .await?
            .into_iter()
            .filter(|j| !applied_set.contains(&j.id))
            .collect();
        let pool_size = candidates.len();

        let profile_embedding = self
            .resolve_embedding(profile.embedding.as_ref(), || profile_summary_text(&profile))
            .await;
        let semantic_available = profile_embedding.is_some();
        if !semantic_available {
            warn!(
                "No embedding for freelancer {}, ranking without semantic scores",
                freelancer_id
            );
        }

        let computed = if semantic_available {
            self.embed_missing(&candidates, |j| {
                if j.embedding.is_some() {
                    None
                } else {
                    Some(job_text(j))
                }
            })
            .await
        } else {
            vec![None; candidates.len()]
        };

        let mut matches: Vec<MatchCandidate<JobListing>> = candidates
            .into_iter()
            .zip(computed)
            .map(|(job, computed)| {
                let scored = self.job_scorer.score(
                    &job,
                    &profile,
                    SemanticInputs {
                        job: job.embedding.as_deref().or(computed.as_deref()),
                        profile: profile_embedding.as_deref(),
                    },
                );
                debug!(
                    "Job {} scored {} for freelancer {}",
                    job.id, scored.match_score, freelancer_id
                );
                MatchCandidate {
                    entity: job,
                    match_score: scored.match_score,
                    reasons: scored.reasons,
                    breakdown: scored.breakdown,
                }
            })
            .collect();

        rank(&mut matches, limit);

        info!(
            "Matched {} of {} jobs for freelancer {}",
            matches.len(),
            pool_size,
            freelancer_id
        );

        Ok(MatchResults {
            matches,
            semantic_available,
            pool_size,
        })
    }

    /// Stored vector, else one model call over `text()`
    async fn resolve_embedding(
        &self,
        stored: Option<&EmbeddingVector>,
        text: impl FnOnce() -> String,
    ) -> Option<EmbeddingVector> {
        match stored {
            Some(vector) => Some(vector.clone()),
            None => self.gateway.embed(&text()).await,
        }
    }

    /// Embed candidates in pool order; `text` returns `None` for candidates
    /// that need no model call
    async fn embed_missing<T, F>(&self, candidates: &[T], text: F) -> Vec<Option<EmbeddingVector>>
    where
        F: Fn(&T) -> Option<String>,
    {
        if !self.config.embed_missing_candidates {
            return vec![None; candidates.len()];
        }

        // Owned inputs keep the fan-out future Send
        let inputs: Vec<Option<String>> = candidates.iter().map(text).collect();
        let gateway = Arc::clone(&self.gateway);
        stream::iter(inputs)
            .map(move |input| {
                let gateway = Arc::clone(&gateway);
                async move {
                    match input {
                        Some(input) => gateway.embed(&input).await,
                        None => None,
                    }
                }
            })
            .buffered(self.config.embedding_concurrency)
            .collect()
            .await
    }
}

/// Stable sort by score, best first, then truncate
fn rank<T>(matches: &mut Vec<MatchCandidate<T>>, limit: usize) {
    matches.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    matches.truncate(limit);
}
