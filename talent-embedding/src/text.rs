//! Text builders for embedding and prompting
//!
//! Each entity is embedded from a fixed template so that stored vectors and
//! on-demand vectors stay comparable.

use talent_core::{FreelancerProfile, JobListing};

/// Truncate to at most `max_chars` characters, never splitting a code point
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Comma-separated skill list, or `fallback` when empty
pub fn skill_list(skills: &[String], fallback: &str) -> String {
    if skills.is_empty() {
        fallback.to_string()
    } else {
        skills.join(", ")
    }
}

/// Scope text for a job: title, description, skills
pub fn job_text(job: &JobListing) -> String {
    format!(
        "{}\n{}\nSkills: {}",
        job.title,
        job.description,
        job.required_skills.join(", ")
    )
}

/// Bio + skills text for a freelancer, as stored alongside the profile
///
/// `None` when there is nothing worth embedding.
pub fn profile_text(profile: &FreelancerProfile) -> Option<String> {
    let bio = profile.bio_text();
    if bio.is_none() && profile.skills.is_empty() {
        return None;
    }
    Some(format!(
        "{}\nSkills: {}",
        bio.unwrap_or_default(),
        profile.skills.join(", ")
    ))
}

/// Richer freelancer summary used when searching jobs for that freelancer
pub fn profile_summary_text(profile: &FreelancerProfile) -> String {
    let rate = profile
        .hourly_rate
        .map(|r| r.normalize().to_string())
        .unwrap_or_else(|| "Flexible".to_string());

    format!(
        "Skills: {}\nBio: {}\nHourly Rate: {}\nExperience: {} years",
        skill_list(&profile.skills, "Not specified"),
        profile.bio_text().unwrap_or_default(),
        rate,
        profile.experience_years.unwrap_or(0)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_truncate_chars_respects_code_points() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("short", 100), "short");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn test_job_text() {
        let job = JobListing::new(1, 2, "Shop rebuild", "Move the store to Next.js")
            .with_skills(["React", "Node.js"]);
        assert_eq!(
            job_text(&job),
            "Shop rebuild\nMove the store to Next.js\nSkills: React, Node.js"
        );
    }

    #[test]
    fn test_profile_text_requires_content() {
        assert_eq!(profile_text(&FreelancerProfile::new(1)), None);

        let profile = FreelancerProfile::new(1).with_skills(["go"]);
        assert_eq!(profile_text(&profile).as_deref(), Some("\nSkills: go"));
    }

    #[test]
    fn test_profile_summary_text() {
        let profile = FreelancerProfile::new(3)
            .with_bio("Backend engineer")
            .with_skills(["rust", "postgres"])
            .with_hourly_rate(dec!(85.00))
            .with_experience(6);

        assert_eq!(
            profile_summary_text(&profile),
            "Skills: rust, postgres\nBio: Backend engineer\nHourly Rate: 85\nExperience: 6 years"
        );

        let empty = profile_summary_text(&FreelancerProfile::new(4));
        assert!(empty.starts_with("Skills: Not specified"));
        assert!(empty.contains("Hourly Rate: Flexible"));
    }
}
