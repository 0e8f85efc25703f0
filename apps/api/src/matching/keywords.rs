//! Keyword alias table: canonical job-function label → synonym keywords used
//! for fuzzy title/description matching.

const JOB_FUNCTION_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Software Engineer",
        &["software", "engineer", "developer", "programmer", "development"],
    ),
    (
        "Backend Engineer",
        &["backend", "back-end", "server", "api", "platform"],
    ),
    (
        "Frontend Engineer",
        &["frontend", "front-end", "react", "javascript", "user interface"],
    ),
    (
        "Full Stack Engineer",
        &["full stack", "fullstack", "full-stack", "web developer", "software engineer"],
    ),
    (
        "DevOps Engineer",
        &["devops", "sre", "site reliability", "infrastructure", "cloud", "platform"],
    ),
    (
        "Data Scientist",
        &["data scientist", "machine learning", "statistics", "analytics", "modeling"],
    ),
    (
        "Data Engineer",
        &["data engineer", "etl", "pipeline", "data platform", "big data"],
    ),
    (
        "Machine Learning Engineer",
        &["machine learning", "ml engineer", "deep learning", "artificial intelligence", "mlops"],
    ),
    (
        "Data Analyst",
        &["data analyst", "analytics", "business intelligence", "sql", "reporting"],
    ),
    (
        "Product Manager",
        &["product manager", "product owner", "product management", "roadmap", "product lead"],
    ),
    (
        "Product Designer",
        &["designer", "ux designer", "user experience", "product design", "interaction design"],
    ),
    (
        "Mobile Engineer",
        &["mobile", "ios", "android", "swift", "kotlin"],
    ),
    (
        "QA Engineer",
        &["qa", "quality assurance", "test", "testing", "automation"],
    ),
    (
        "Security Engineer",
        &["security", "cybersecurity", "appsec", "penetration", "infosec"],
    ),
];

/// Alias keywords for a preferred job function. Falls back to the lowercased
/// preference itself; an empty preference has no keywords.
pub fn keywords_for(job_function: &str) -> Vec<String> {
    let preference = job_function.trim();
    if preference.is_empty() {
        return Vec::new();
    }

    JOB_FUNCTION_KEYWORDS
        .iter()
        .find(|(label, _)| label.eq_ignore_ascii_case(preference))
        .map(|(_, keywords)| keywords.iter().map(|k| k.to_string()).collect())
        .unwrap_or_else(|| vec![preference.to_lowercase()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_function_is_case_insensitive() {
        let keywords = keywords_for("devops engineer");
        assert!(keywords.contains(&"devops".to_string()));
        assert_eq!(keywords.len(), 6);
    }

    #[test]
    fn test_unknown_function_falls_back_to_itself() {
        assert_eq!(keywords_for("  Rust Wizard "), vec!["rust wizard".to_string()]);
    }

    #[test]
    fn test_empty_function_has_no_keywords() {
        assert!(keywords_for("   ").is_empty());
    }

    #[test]
    fn test_alias_keywords_are_lowercase() {
        for (_, keywords) in JOB_FUNCTION_KEYWORDS {
            assert!(keywords.iter().all(|k| *k == k.to_lowercase()));
        }
    }
}
