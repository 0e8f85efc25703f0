//! ATS Guidelines Engine: runs the section validators and combines them into
//! a weighted overall score, compliance tier, critical issue list and
//! prioritized suggestions.

use std::collections::HashSet;

use chrono::Utc;
use tracing::debug;

use crate::ats::models::{
    ATSAnalysisResult, ComplianceLevel, SectionAnalysis, SectionType, Severity, ValidationIssue,
};
use crate::ats::validators::{
    validate_contact, validate_education, validate_experience, validate_projects, validate_skills,
};
use crate::models::ResumeRecord;

const SUGGESTIONS_PER_SECTION: usize = 2;
const MAX_TOP_SUGGESTIONS: usize = 8;

/// Sections that have a validator, in report order.
/// `Summary` carries a weight but no validator ever scores it.
pub const VALIDATED_SECTIONS: &[SectionType] = &[
    SectionType::Contact,
    SectionType::Experience,
    SectionType::Skills,
    SectionType::Education,
    SectionType::Projects,
];

pub fn analyze_resume(resume: &ResumeRecord) -> ATSAnalysisResult {
    let sections: Vec<SectionAnalysis> = VALIDATED_SECTIONS
        .iter()
        .filter_map(|&section| analyze_single_section(resume, section))
        .collect();

    let overall_score = weighted_score(&sections);
    let compliance_level = ComplianceLevel::from_score(overall_score);
    let critical_issues = critical_issues(&sections);
    let top_suggestions = top_suggestions(&sections);

    debug!(
        overall_score,
        ?compliance_level,
        critical = critical_issues.len(),
        "ATS analysis complete"
    );

    ATSAnalysisResult {
        overall_score,
        compliance_level,
        sections,
        critical_issues,
        top_suggestions,
        analyzed_at: Utc::now(),
    }
}

/// Runs one validator. Returns `None` for sections without a validator.
pub fn analyze_single_section(
    resume: &ResumeRecord,
    section: SectionType,
) -> Option<SectionAnalysis> {
    match section {
        SectionType::Contact => Some(validate_contact(resume)),
        SectionType::Experience => Some(validate_experience(resume)),
        SectionType::Skills => Some(validate_skills(resume)),
        SectionType::Education => Some(validate_education(resume)),
        SectionType::Projects => Some(validate_projects(resume)),
        SectionType::Summary => None,
    }
}

/// Σ(score × weight) / Σ(weight of the sections actually scored).
fn weighted_score(sections: &[SectionAnalysis]) -> u32 {
    let (weighted, total_weight) = sections.iter().fold((0.0_f64, 0.0_f64), |(sum, weight), s| {
        let w = s.section.weight();
        (sum + s.score as f64 * w, weight + w)
    });

    if total_weight > 0.0 {
        (weighted / total_weight).round().clamp(0.0, 100.0) as u32
    } else {
        0
    }
}

fn critical_issues(sections: &[SectionAnalysis]) -> Vec<ValidationIssue> {
    let mut issues: Vec<ValidationIssue> = sections
        .iter()
        .flat_map(|s| s.issues.iter().cloned())
        .collect();
    issues.sort_by_key(|i| i.severity);
    issues.retain(|i| matches!(i.severity, Severity::Critical | Severity::High));
    issues
}

/// Lowest-scoring sections speak first; two suggestions each, deduplicated.
fn top_suggestions(sections: &[SectionAnalysis]) -> Vec<String> {
    let mut ranked: Vec<&SectionAnalysis> = sections.iter().collect();
    ranked.sort_by_key(|s| s.score);

    let mut seen = HashSet::new();
    ranked
        .into_iter()
        .flat_map(|s| s.suggestions.iter().take(SUGGESTIONS_PER_SECTION))
        .filter(|s| seen.insert(s.as_str()))
        .take(MAX_TOP_SUGGESTIONS)
        .cloned()
        .collect()
}

/// Presentation color for a score.
pub fn score_color(score: u32) -> &'static str {
    match score {
        s if s >= 90 => "green",
        s if s >= 75 => "blue",
        s if s >= 60 => "yellow",
        _ => "red",
    }
}

/// Presentation label for a score.
pub fn score_label(score: u32) -> &'static str {
    match score {
        s if s >= 90 => "Excellent",
        s if s >= 75 => "Good",
        s if s >= 60 => "Fair",
        _ => "Needs Work",
    }
}
