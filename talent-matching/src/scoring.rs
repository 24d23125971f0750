//! Scoring model: one (job, freelancer) pair to a bounded score with reasons
//!
//! The scorer is pure. Embeddings are resolved by the caller and handed in,
//! so the same inputs always produce the same score and reasons.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use talent_core::{FreelancerProfile, JobListing, ScoreBreakdown, TalentResult};
use talent_embedding::cosine_similarity;

use crate::{
    skills::{covered_requirements, matching_offered},
    weights::{MatchWeights, FREELANCERS_FOR_JOB_WEIGHTS, JOBS_FOR_FREELANCER_WEIGHTS},
};

/// Hours assumed when converting an hourly rate into a fixed-price total
pub const ASSUMED_PROJECT_HOURS: Decimal = dec!(40);

/// Tolerance around the budget midpoint
pub const BUDGET_TOLERANCE: Decimal = dec!(0.3);

pub const SENIOR_YEARS: u32 = 5;
pub const MID_YEARS: u32 = 2;

/// Success rate (percent) needed for the track record bonus
pub const TRACK_RECORD_MIN_SUCCESS: Decimal = dec!(80);

pub const HIGH_SIMILARITY: f64 = 0.7;
pub const GOOD_SIMILARITY: f64 = 0.5;

/// Which side of the marketplace is being ranked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchDirection {
    /// A client looking for freelancers
    FreelancersForJob,
    /// A freelancer looking for jobs
    JobsForFreelancer,
}

/// Embeddings available for one pair
#[derive(Debug, Clone, Copy, Default)]
pub struct SemanticInputs<'a> {
    pub job: Option<&'a [f32]>,
    pub profile: Option<&'a [f32]>,
}

/// Score of one pair
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMatch {
    /// 0-100
    pub match_score: u8,
    pub reasons: Vec<String>,
    pub breakdown: ScoreBreakdown,
}

/// Weighted multi-factor scorer for one matching direction
#[derive(Debug, Clone)]
pub struct Scorer {
    direction: MatchDirection,
    weights: MatchWeights,
}

impl Scorer {
    /// Create a scorer with a custom weights table
    pub fn new(direction: MatchDirection, weights: MatchWeights) -> TalentResult<Self> {
        weights.validate()?;
        Ok(Self { direction, weights })
    }

    /// Scorer with the default weights for a direction
    pub fn for_direction(direction: MatchDirection) -> Self {
        let weights = match direction {
            MatchDirection::FreelancersForJob => FREELANCERS_FOR_JOB_WEIGHTS,
            MatchDirection::JobsForFreelancer => JOBS_FOR_FREELANCER_WEIGHTS,
        };
        Self { direction, weights }
    }

    pub fn direction(&self) -> MatchDirection {
        self.direction
    }

    pub fn weights(&self) -> &MatchWeights {
        &self.weights
    }

    /// Score a pair
    ///
    /// Reasons are appended in a fixed order: skills, budget, semantic,
    /// experience, track record.
    pub fn score(
        &self,
        job: &JobListing,
        profile: &FreelancerProfile,
        semantic: SemanticInputs<'_>,
    ) -> ScoredMatch {
        let mut reasons = Vec::new();
        let mut breakdown = ScoreBreakdown::default();

        breakdown.skills = self.score_skills(job, profile, &mut reasons);
        breakdown.budget = self.score_budget(job, profile, &mut reasons);
        let (semantic_points, similarity) = self.score_semantic(semantic, &mut reasons);
        breakdown.semantic = semantic_points;
        breakdown.semantic_similarity = similarity;
        breakdown.experience = self.score_experience(profile, &mut reasons);
        breakdown.track_record = self.score_track_record(profile, &mut reasons);

        let match_score = breakdown.total().round().clamp(0.0, 100.0) as u8;

        ScoredMatch {
            match_score,
            reasons,
            breakdown,
        }
    }

    fn score_skills(
        &self,
        job: &JobListing,
        profile: &FreelancerProfile,
        reasons: &mut Vec<String>,
    ) -> f64 {
        let required_count = job.required_skills.len();
        if required_count == 0 || self.weights.skills <= 0.0 {
            return 0.0;
        }

        let matched = match self.direction {
            MatchDirection::FreelancersForJob => {
                covered_requirements(&job.required_skills, &profile.skills)
            }
            MatchDirection::JobsForFreelancer => {
                matching_offered(&job.required_skills, &profile.skills)
            }
        };
        if matched.is_empty() {
            return 0.0;
        }

        // Offered skills can outnumber requirements ("react", "react native" vs "React")
        let fraction = (matched.len() as f64 / required_count.max(1) as f64).min(1.0);

        reasons.push(match self.direction {
            MatchDirection::FreelancersForJob => {
                format!("Has {}/{} required skills", matched.len(), required_count)
            }
            MatchDirection::JobsForFreelancer => format!(
                "Matches {} of your skills: {}",
                matched.len(),
                matched.iter().take(3).cloned().collect::<Vec<_>>().join(", ")
            ),
        });

        fraction * self.weights.skills
    }

    /// Binary: full weight when the freelancer's implied project price fits
    /// the job's budget, nothing otherwise
    fn score_budget(
        &self,
        job: &JobListing,
        profile: &FreelancerProfile,
        reasons: &mut Vec<String>,
    ) -> f64 {
        if self.weights.budget <= 0.0 {
            return 0.0;
        }
        let (Some(rate), Some((min, max))) = (profile.hourly_rate, job.budget_band()) else {
            return 0.0;
        };
        if !rate_fits_budget(rate, min, max) {
            return 0.0;
        }

        reasons.push(
            match self.direction {
                MatchDirection::FreelancersForJob => "Rate fits the job budget",
                MatchDirection::JobsForFreelancer => "Budget aligns with your rate",
            }
            .to_string(),
        );
        self.weights.budget
    }

    fn score_semantic(
        &self,
        semantic: SemanticInputs<'_>,
        reasons: &mut Vec<String>,
    ) -> (f64, Option<f64>) {
        let (Some(job), Some(profile)) = (semantic.job, semantic.profile) else {
            return (0.0, None);
        };

        let similarity = cosine_similarity(profile, job);
        if self.weights.semantic <= 0.0 {
            return (0.0, Some(similarity));
        }

        let reason = if similarity > HIGH_SIMILARITY {
            Some(match self.direction {
                MatchDirection::FreelancersForJob => "Highly relevant background",
                MatchDirection::JobsForFreelancer => "High relevance to your expertise",
            })
        } else if similarity > GOOD_SIMILARITY {
            Some(match self.direction {
                MatchDirection::FreelancersForJob => "Relevant background",
                MatchDirection::JobsForFreelancer => "Good match for your background",
            })
        } else {
            None
        };
        if let Some(reason) = reason {
            reasons.push(reason.to_string());
        }

        // Dissimilar texts never subtract points
        (similarity.clamp(0.0, 1.0) * self.weights.semantic, Some(similarity))
    }

    fn score_experience(&self, profile: &FreelancerProfile, reasons: &mut Vec<String>) -> f64 {
        let years = profile.experience_years.unwrap_or(0);

        let (points, reason) = if years >= SENIOR_YEARS {
            (self.weights.experience_senior, "Senior level experience")
        } else if years >= MID_YEARS {
            (self.weights.experience_mid, "Mid-level experience")
        } else {
            return 0.0;
        };

        if points <= 0.0 {
            return 0.0;
        }
        reasons.push(reason.to_string());
        points
    }

    /// Requires at least one review; "no reviews yet" is not a bad record,
    /// callers can tell them apart through `total_reviews`
    fn score_track_record(&self, profile: &FreelancerProfile, reasons: &mut Vec<String>) -> f64 {
        if self.weights.track_record <= 0.0 || !profile.has_reviews() {
            return 0.0;
        }
        match profile.success_rate {
            Some(rate) if rate >= TRACK_RECORD_MIN_SUCCESS => {
                reasons.push(format!("Proven track record ({}% success)", rate.normalize()));
                self.weights.track_record
            }
            _ => 0.0,
        }
    }
}

/// Whether `rate` x 40h lands within ±30% of the budget midpoint, or inside
/// the posted band itself
pub fn rate_fits_budget(rate: Decimal, budget_min: Decimal, budget_max: Decimal) -> bool {
    if rate <= Decimal::ZERO || budget_max <= Decimal::ZERO || budget_min < Decimal::ZERO {
        return false;
    }
    let (low, high) = if budget_min <= budget_max {
        (budget_min, budget_max)
    } else {
        (budget_max, budget_min)
    };

    // Out-of-range stored values simply do not fit
    let window = || -> Option<(Decimal, Decimal, Decimal)> {
        let implied_total = rate.checked_mul(ASSUMED_PROJECT_HOURS)?;
        let midpoint = low.checked_add(high)?.checked_div(Decimal::TWO)?;
        let lower = low.min(midpoint.checked_mul(Decimal::ONE - BUDGET_TOLERANCE)?);
        let upper = high.max(midpoint.checked_mul(Decimal::ONE + BUDGET_TOLERANCE)?);
        Some((implied_total, lower, upper))
    };

    match window() {
        Some((implied_total, lower, upper)) => implied_total >= lower && implied_total <= upper,
        None => false,
    }
}
