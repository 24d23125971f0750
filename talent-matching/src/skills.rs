//! Lenient skill matching
//!
//! Two skills match when either lower-cased string contains the other. This
//! lets "react" satisfy "React.js" but also lets "Java" satisfy "JavaScript";
//! "JS" does not match "JavaScript". The rule is a product decision and is
//! kept as-is.

/// Whether two skill labels match under the containment rule
pub fn skills_match(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    !a.is_empty() && !b.is_empty() && (a.contains(&b) || b.contains(&a))
}

fn matches_any(skill: &str, others: &[String]) -> bool {
    others.iter().any(|other| skills_match(skill, other))
}

/// Required skills covered by at least one offered skill, in required order
pub fn covered_requirements(required: &[String], offered: &[String]) -> Vec<String> {
    required
        .iter()
        .filter(|r| matches_any(r, offered))
        .cloned()
        .collect()
}

/// Offered skills that satisfy at least one requirement, in offered order
pub fn matching_offered(required: &[String], offered: &[String]) -> Vec<String> {
    offered
        .iter()
        .filter(|o| matches_any(o, required))
        .cloned()
        .collect()
}
