//! Freelancer profile data structures

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::job::EmbeddingVector;

/// Account role of the user owning a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Freelancer,
    Client,
    Admin,
}

impl UserRole {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "freelancer" => Some(UserRole::Freelancer),
            "client" => Some(UserRole::Client),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

/// Public profile of a marketplace user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreelancerProfile {
    /// Owning user id; profiles are keyed by user
    #[serde(rename = "id")]
    pub user_id: i64,

    #[serde(default)]
    pub role: UserRole,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,

    #[serde(default)]
    pub skills: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_years: Option<u32>,

    /// Percentage (0-100) of contracts completed without dispute
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_rate: Option<Decimal>,

    /// Mean review rating, unset until the first review
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<Decimal>,

    /// Number of reviews received; 0 means "no reviews yet"
    #[serde(default)]
    pub total_reviews: u32,

    /// Stored embedding of bio + skills, if storage has one
    #[serde(default, skip_serializing)]
    pub embedding: Option<EmbeddingVector>,
}

impl FreelancerProfile {
    /// Create an empty freelancer profile
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            role: UserRole::Freelancer,
            display_name: None,
            bio: None,
            skills: Vec::new(),
            hourly_rate: None,
            experience_years: None,
            success_rate: None,
            average_rating: None,
            total_reviews: 0,
            embedding: None,
        }
    }

    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }

    pub fn with_hourly_rate(mut self, rate: Decimal) -> Self {
        self.hourly_rate = Some(rate);
        self
    }

    pub fn with_experience(mut self, years: u32) -> Self {
        self.experience_years = Some(years);
        self
    }

    /// Set success rate and review count together; they come from the same contract history
    pub fn with_track_record(mut self, success_rate: Decimal, total_reviews: u32) -> Self {
        self.success_rate = Some(success_rate);
        self.total_reviews = total_reviews;
        self
    }

    pub fn with_embedding(mut self, embedding: EmbeddingVector) -> Self {
        self.embedding = Some(embedding);
        self
    }

    pub fn is_freelancer(&self) -> bool {
        self.role == UserRole::Freelancer
    }

    pub fn has_reviews(&self) -> bool {
        self.total_reviews > 0
    }

    /// Bio with surrounding whitespace removed, `None` when blank
    pub fn bio_text(&self) -> Option<&str> {
        self.bio.as_deref().map(str::trim).filter(|b| !b.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_profile_serializes_user_id_as_id() {
        let profile = FreelancerProfile::new(42)
            .with_skills(["rust"])
            .with_track_record(dec!(95), 3);
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["id"], 42);
        assert_eq!(json["totalReviews"], 3);
        assert_eq!(json["role"], "freelancer");
        assert!(json.get("embedding").is_none());
    }

    #[test]
    fn test_blank_bio_is_absent() {
        let profile = FreelancerProfile::new(1).with_bio("   ");
        assert_eq!(profile.bio_text(), None);
        assert!(!profile.has_reviews());
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(UserRole::parse("Freelancer"), Some(UserRole::Freelancer));
        assert_eq!(UserRole::parse("client"), Some(UserRole::Client));
        assert_eq!(UserRole::parse("guest"), None);
    }
}
