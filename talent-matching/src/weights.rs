//! Weights table for the scoring model
//!
//! Each factor's contribution is capped at its weight, so a table whose
//! simultaneously-firing weights sum to at most 100 keeps every match score
//! inside 0-100 without clamping.

use std::path::Path;

use serde::{Deserialize, Serialize};
use talent_core::{TalentError, TalentResult};

/// Ranking freelancers for a job: profile quality signals matter
pub const FREELANCERS_FOR_JOB_WEIGHTS: MatchWeights = MatchWeights {
    skills: 40.0,
    budget: 20.0,
    semantic: 20.0,
    experience_senior: 10.0,
    experience_mid: 7.0,
    track_record: 10.0,
};

/// Ranking jobs for a freelancer: the freelancer's own experience and
/// track record are constant across jobs, so their weight goes to semantics
pub const JOBS_FOR_FREELANCER_WEIGHTS: MatchWeights = MatchWeights {
    skills: 40.0,
    budget: 20.0,
    semantic: 40.0,
    experience_senior: 0.0,
    experience_mid: 0.0,
    track_record: 0.0,
};

/// Maximum points each factor can contribute
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchWeights {
    pub skills: f64,
    pub budget: f64,
    pub semantic: f64,
    /// Awarded for 5+ years
    pub experience_senior: f64,
    /// Awarded for 2-4 years
    pub experience_mid: f64,
    pub track_record: f64,
}

impl MatchWeights {
    /// Highest total the factors can reach together
    pub fn max_total(&self) -> f64 {
        self.skills + self.budget + self.semantic + self.experience_senior + self.track_record
    }

    pub fn validate(&self) -> TalentResult<()> {
        let all = [
            ("skills", self.skills),
            ("budget", self.budget),
            ("semantic", self.semantic),
            ("experienceSenior", self.experience_senior),
            ("experienceMid", self.experience_mid),
            ("trackRecord", self.track_record),
        ];
        for (name, weight) in all {
            if !weight.is_finite() || weight < 0.0 {
                return Err(TalentError::config(format!(
                    "weight {} must be a non-negative number, got {}",
                    name, weight
                )));
            }
        }

        if self.experience_mid > self.experience_senior {
            return Err(TalentError::config(format!(
                "experienceMid ({}) must not exceed experienceSenior ({})",
                self.experience_mid, self.experience_senior
            )));
        }

        let max_total = self.max_total();
        if max_total > 100.0 + 1e-9 {
            return Err(TalentError::config(format!(
                "weights can sum to {}, which exceeds 100",
                max_total
            )));
        }

        Ok(())
    }
}

/// Weights for both matching directions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeightsTable {
    pub freelancers_for_job: MatchWeights,
    pub jobs_for_freelancer: MatchWeights,
}

impl Default for WeightsTable {
    fn default() -> Self {
        Self {
            freelancers_for_job: FREELANCERS_FOR_JOB_WEIGHTS,
            jobs_for_freelancer: JOBS_FOR_FREELANCER_WEIGHTS,
        }
    }
}

impl WeightsTable {
    /// Load and validate a weights table from a JSON file
    ///
    /// A direction missing from the file keeps its default weights.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> TalentResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            TalentError::config(format!(
                "Failed to read weights file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> TalentResult<Self> {
        let table: Self = serde_json::from_str(raw)
            .map_err(|e| TalentError::config(format!("Invalid weights table: {}", e)))?;
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> TalentResult<()> {
        self.freelancers_for_job.validate()?;
        self.jobs_for_freelancer.validate()
    }
}
