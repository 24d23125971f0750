//! Storage seam for the matchers
//!
//! Matchers only read. Everything they need from persistence goes through
//! [`MarketplaceStore`], so tests can swap in an in-memory store.

mod sqlite;

pub use sqlite::SqliteMarketplaceStore;

use async_trait::async_trait;
use talent_core::{FreelancerProfile, JobListing, TalentResult};

/// Read-only marketplace queries used by matching
#[async_trait]
pub trait MarketplaceStore: Send + Sync {
    async fn find_job_by_id(&self, job_id: i64) -> TalentResult<Option<JobListing>>;

    /// Open jobs, newest first, without the given ids
    async fn find_open_jobs_excluding(
        &self,
        excluded_job_ids: &[i64],
        pool_limit: usize,
    ) -> TalentResult<Vec<JobListing>>;

    /// Freelancer profiles in a stable order
    async fn find_freelancer_profiles(&self, pool_limit: usize)
        -> TalentResult<Vec<FreelancerProfile>>;

    async fn find_freelancer_profile_by_user_id(
        &self,
        user_id: i64,
    ) -> TalentResult<Option<FreelancerProfile>>;

    /// Jobs the freelancer has applied to
    async fn find_applied_job_ids(&self, freelancer_id: i64) -> TalentResult<Vec<i64>>;

    /// Freelancers who have applied to the job
    async fn find_applicant_ids(&self, job_id: i64) -> TalentResult<Vec<i64>>;
}
