//! Natural-language match explanations
//!
//! Purely advisory: a missing explanation never affects ranking.

use std::sync::Arc;

use talent_core::{FreelancerProfile, JobListing, TalentError, TalentResult};
use talent_embedding::{
    config::DEFAULT_COMPLETION_MODEL,
    text::{skill_list, truncate_chars},
    CompletionOptions, ModelGateway,
};
use tracing::{debug, instrument};

use crate::store::MarketplaceStore;

const DESCRIPTION_CHARS: usize = 500;
const BIO_CHARS: usize = 300;

const SYSTEM_PROMPT: &str = "You are a helpful career advisor. Be concise and encouraging.";

/// Completion options used for explanations
pub fn explanation_options() -> CompletionOptions {
    CompletionOptions::default()
        .with_model(DEFAULT_COMPLETION_MODEL)
        .with_max_tokens(150)
        .with_temperature(0.7)
        .with_system_prompt(SYSTEM_PROMPT)
}

/// Build the explanation prompt for a pair
pub fn build_prompt(job: &JobListing, profile: &FreelancerProfile) -> String {
    format!(
        r#"You are a career advisor helping a freelancer understand why a job might be a good match for them.

Job Title: {}
Job Description: {}
Required Skills: {}

Freelancer Skills: {}
Freelancer Bio: {}

Provide a brief, encouraging 2-3 sentence explanation of why this job could be a good match for this freelancer.
Focus on specific skill alignments and growth opportunities."#,
        job.title,
        truncate_chars(&job.description, DESCRIPTION_CHARS),
        skill_list(&job.required_skills, "Not specified"),
        skill_list(&profile.skills, "Not specified"),
        profile
            .bio_text()
            .map(|bio| truncate_chars(bio, BIO_CHARS))
            .unwrap_or("Not provided"),
    )
}

/// Explains why a job suits a freelancer
pub struct MatchExplainer {
    gateway: Arc<dyn ModelGateway>,
    store: Arc<dyn MarketplaceStore>,
    options: CompletionOptions,
}

impl MatchExplainer {
    pub fn new(gateway: Arc<dyn ModelGateway>, store: Arc<dyn MarketplaceStore>) -> Self {
        Self {
            gateway,
            store,
            options: explanation_options(),
        }
    }

    /// Override the completion options (model, length, temperature)
    pub fn with_options(mut self, options: CompletionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.gateway.is_enabled()
    }

    /// Explain a pair; `None` when the model is unavailable or answers blank
    #[instrument(
        skip(self, job, profile),
        fields(job_id = job.id, freelancer_id = profile.user_id)
    )]
    pub async fn explain(&self, job: &JobListing, profile: &FreelancerProfile) -> Option<String> {
        let prompt = build_prompt(job, profile);
        let explanation = self.gateway.complete(&prompt, &self.options).await?;

        let explanation = explanation.trim();
        if explanation.is_empty() {
            debug!("Model returned a blank explanation");
            return None;
        }
        Some(explanation.to_string())
    }

    /// Look both entities up, then explain
    pub async fn explain_by_ids(
        &self,
        job_id: i64,
        freelancer_id: i64,
    ) -> TalentResult<Option<String>> {
        let job = self
            .store
            .find_job_by_id(job_id)
            .await?
            .ok_or_else(|| TalentError::not_found(format!("job {}", job_id)))?;
        let profile = self
            .store
            .find_freelancer_profile_by_user_id(freelancer_id)
            .await?
            .ok_or_else(|| TalentError::not_found(format!("freelancer {}", freelancer_id)))?;

        Ok(self.explain(&job, &profile).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_truncates_description_and_bio() {
        let job = JobListing::new(1, 2, "Storefront", "d".repeat(800))
            .with_skills(["React", "Node.js"]);
        let profile = FreelancerProfile::new(3)
            .with_skills(["react"])
            .with_bio("b".repeat(450));

        let prompt = build_prompt(&job, &profile);
        assert!(prompt.contains(&format!("Job Description: {}\n", "d".repeat(500))));
        assert!(!prompt.contains(&"d".repeat(501)));
        assert!(prompt.contains(&format!("Freelancer Bio: {}\n", "b".repeat(300))));
        assert!(!prompt.contains(&"b".repeat(301)));
        assert!(prompt.contains("Required Skills: React, Node.js"));
        assert!(prompt.contains("Freelancer Skills: react"));
    }

    #[test]
    fn test_prompt_handles_missing_fields() {
        let job = JobListing::new(1, 2, "Logo", "");
        let profile = FreelancerProfile::new(3);

        let prompt = build_prompt(&job, &profile);
        assert!(prompt.contains("Required Skills: Not specified"));
        assert!(prompt.contains("Freelancer Bio: Not provided"));
    }

    #[test]
    fn test_explanation_options() {
        let options = explanation_options();
        assert_eq!(options.model.as_deref(), Some(DEFAULT_COMPLETION_MODEL));
        assert_eq!(options.max_tokens, 150);
        assert_eq!(options.temperature, 0.7);
        assert_eq!(options.system_prompt.as_deref(), Some(SYSTEM_PROMPT));
    }
}
