//! Section validators.
//!
//! Each validator is a total function over a `ResumeRecord`: missing or
//! malformed data lowers the score and produces issues, it never errors.
//! Scores are accumulated as signed deductions from a starting value and
//! clamped to 0–100 at the end.

use std::sync::LazyLock;

use regex::Regex;

use crate::ats::models::{IssueType, SectionAnalysis, SectionType, Severity, ValidationIssue};
use crate::models::lenient::present;
use crate::models::ResumeRecord;

pub(crate) static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

pub(crate) static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d\s\-+()]+$").expect("valid phone regex"));

pub(crate) static PRONOUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(I|my|mine|we|our)\b").expect("valid pronoun regex"));

pub(crate) const WEAK_VERBS: &[&str] = &["responsible for", "worked on", "helped with", "assisted"];

// Word-bounded so detection agrees with what `improve_weak_verbs` rewrites.
pub(crate) static WEAK_VERB_RE: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = WEAK_VERBS
        .iter()
        .map(|v| regex::escape(v).replace(' ', r"\s+"))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b({alternation})\b")).expect("valid weak verb regex")
});

const MIN_EXPERIENCE_DESCRIPTION: usize = 50;
const MIN_PROJECT_DESCRIPTION: usize = 30;
const MIN_TOTAL_SKILLS: usize = 5;
const MAX_UNCATEGORIZED_SKILLS: usize = 10;

/// Builder that accumulates deductions, issues and advice for one section.
struct SectionReport {
    section: SectionType,
    score: i32,
    issues: Vec<ValidationIssue>,
    suggestions: Vec<String>,
    compliant_aspects: Vec<String>,
}

impl SectionReport {
    fn new(section: SectionType, starting_score: i32) -> Self {
        Self {
            section,
            score: starting_score,
            issues: Vec::new(),
            suggestions: Vec::new(),
            compliant_aspects: Vec::new(),
        }
    }

    fn deduct(&mut self, points: i32, issue: ValidationIssue) {
        self.score -= points;
        self.issues.push(issue);
    }

    fn suggest(&mut self, suggestion: &str) {
        if !self.suggestions.iter().any(|s| s == suggestion) {
            self.suggestions.push(suggestion.to_string());
        }
    }

    fn comply(&mut self, aspect: impl Into<String>) {
        self.compliant_aspects.push(aspect.into());
    }

    fn finish(self) -> SectionAnalysis {
        SectionAnalysis {
            section: self.section,
            score: self.score.clamp(0, 100) as u32,
            issues: self.issues,
            suggestions: self.suggestions,
            compliant_aspects: self.compliant_aspects,
        }
    }
}

pub fn validate_contact(resume: &ResumeRecord) -> SectionAnalysis {
    let section = SectionType::Contact;
    let mut report = SectionReport::new(section, 100);

    let required = [
        ("first name", &resume.first_name),
        ("last name", &resume.last_name),
        ("email", &resume.email),
        ("phone", &resume.phone),
    ];
    let missing: Vec<&str> = required
        .iter()
        .filter(|(_, value)| present(value).is_none())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        report.comply("All required contact fields present");
    } else {
        report.deduct(
            25 * missing.len() as i32,
            ValidationIssue::new(
                IssueType::InsufficientDetail,
                section,
                Severity::Critical,
                format!("Missing required contact information: {}", missing.join(", ")),
                "Add your full name, email address and phone number at the top of the resume",
            ),
        );
        report.suggest("Complete all required contact fields so recruiters can reach you");
    }

    if let Some(email) = present(&resume.email) {
        if EMAIL_RE.is_match(email) {
            report.comply("Valid email format");
        } else {
            report.deduct(
                15,
                ValidationIssue::new(
                    IssueType::FormatIssues,
                    section,
                    Severity::High,
                    format!("Email address '{email}' is not valid"),
                    "Use a standard address such as name@example.com",
                )
                .on_field("email"),
            );
            report.suggest("Use a professional, correctly formatted email address");
        }
    }

    if let Some(phone) = present(&resume.phone) {
        if PHONE_RE.is_match(phone) {
            report.comply("Phone number uses a parseable format");
        } else {
            report.deduct(
                10,
                ValidationIssue::new(
                    IssueType::FormatIssues,
                    section,
                    Severity::Medium,
                    format!("Phone number '{phone}' contains unexpected characters"),
                    "Format the number as (555) 123-4567 or +1 (555) 123-4567",
                )
                .auto_fixable()
                .on_field("phone"),
            );
            report.suggest("Use a standard phone number format");
        }
    }

    match present(&resume.linkedin) {
        Some(linkedin) if !linkedin.to_lowercase().contains("linkedin.com") => {
            report.deduct(
                10,
                ValidationIssue::new(
                    IssueType::FormatIssues,
                    section,
                    Severity::Low,
                    "LinkedIn entry is not a linkedin.com profile URL",
                    "Use the form linkedin.com/in/your-name",
                )
                .auto_fixable()
                .on_field("linkedin"),
            );
            report.suggest("Link your full LinkedIn profile URL");
        }
        Some(_) => report.comply("LinkedIn profile included"),
        None => report.suggest("Add a LinkedIn profile URL to strengthen your contact section"),
    }

    report.finish()
}

pub fn validate_experience(resume: &ResumeRecord) -> SectionAnalysis {
    let section = SectionType::Experience;
    let entries = &resume.work_experiences;

    if entries.is_empty() {
        let mut report = SectionReport::new(section, 0);
        report.issues.push(ValidationIssue::new(
            IssueType::InsufficientDetail,
            section,
            Severity::Critical,
            "No work experience listed",
            "Add at least one position with company, dates and a description of your impact",
        ));
        report.suggest("Add your work experience, most recent first");
        report.suggest("Describe each role with quantified achievements");
        return report.finish();
    }

    let mut report = SectionReport::new(section, 100);
    report.comply(format!("{} work experience entries listed", entries.len()));

    for (i, entry) in entries.iter().enumerate() {
        let n = i + 1;

        if present(&entry.position).is_none() || present(&entry.company).is_none() {
            report.deduct(
                15,
                ValidationIssue::new(
                    IssueType::InsufficientDetail,
                    section,
                    Severity::High,
                    format!("Experience entry {n} is missing a position or company"),
                    "Include both your job title and the company name",
                )
                .at(i),
            );
            report.suggest("Include a job title and company for every position");
        }

        let description = entry.description.as_deref().unwrap_or("");
        if description.chars().count() < MIN_EXPERIENCE_DESCRIPTION {
            report.deduct(
                15,
                ValidationIssue::new(
                    IssueType::InsufficientDetail,
                    section,
                    Severity::High,
                    format!("Experience entry {n} has too little detail"),
                    "Describe your responsibilities and achievements in at least two or three bullet points",
                )
                .at(i),
            );
            report.suggest("Expand role descriptions with concrete responsibilities and results");
            continue;
        }

        if !description.chars().any(|c| c.is_ascii_digit()) {
            report.deduct(
                20,
                ValidationIssue::new(
                    IssueType::MissingQuantification,
                    section,
                    Severity::High,
                    format!("Experience entry {n} has no quantified results"),
                    "Add numbers: percentages, revenue, team size, time saved",
                )
                .at(i),
            );
            report.suggest("Quantify achievements with metrics (e.g. 'reduced costs by 20%')");
        }

        if PRONOUN_RE.is_match(description) {
            report.deduct(
                10,
                ValidationIssue::new(
                    IssueType::PersonalPronouns,
                    section,
                    Severity::Medium,
                    format!("Experience entry {n} uses personal pronouns"),
                    "Start bullets with action verbs instead of I, my, we or our",
                )
                .auto_fixable()
                .at(i),
            );
            report.suggest("Remove personal pronouns and lead with action verbs");
        }

        if WEAK_VERB_RE.is_match(description) {
            report.deduct(
                10,
                ValidationIssue::new(
                    IssueType::WeakVerbs,
                    section,
                    Severity::Medium,
                    format!("Experience entry {n} uses weak phrasing"),
                    "Replace phrases like 'responsible for' with strong verbs such as 'led' or 'developed'",
                )
                .auto_fixable()
                .at(i),
            );
            report.suggest("Replace weak phrases with strong action verbs");
        }
    }

    if report.issues.is_empty() {
        report.comply("Descriptions are detailed, quantified and action-oriented");
    }

    report.finish()
}

pub fn validate_skills(resume: &ResumeRecord) -> SectionAnalysis {
    let section = SectionType::Skills;
    let sections = &resume.skill_sections;

    if sections.is_empty() {
        let mut report = SectionReport::new(section, 20);
        report.issues.push(ValidationIssue::new(
            IssueType::MissingKeywords,
            section,
            Severity::High,
            "No skills section found",
            "Add a skills section listing the tools and technologies you use",
        ));
        report.suggest("Add a skills section with keywords from your target job descriptions");
        return report.finish();
    }

    let mut report = SectionReport::new(section, 100);
    let total: usize = sections.iter().map(|s| s.skill_count()).sum();

    if total < MIN_TOTAL_SKILLS {
        report.deduct(
            20,
            ValidationIssue::new(
                IssueType::MissingKeywords,
                section,
                Severity::Medium,
                format!("Only {total} skills listed"),
                format!("List at least {MIN_TOTAL_SKILLS} relevant skills"),
            ),
        );
        report.suggest("List more relevant skills so ATS keyword filters can match you");
    } else {
        report.comply(format!("{total} skills listed"));
    }

    if sections.len() == 1 {
        if total > MAX_UNCATEGORIZED_SKILLS {
            report.deduct(
                5,
                ValidationIssue::new(
                    IssueType::FormatIssues,
                    section,
                    Severity::Low,
                    "Many skills in a single uncategorized list",
                    "Consider categorizing skills (e.g. Languages, Frameworks, Tools)",
                ),
            );
            report.suggest("Consider categorizing your skills into groups");
        }
    } else {
        report.comply("Skills are organized into categories");
    }

    report.finish()
}

pub fn validate_education(resume: &ResumeRecord) -> SectionAnalysis {
    let section = SectionType::Education;
    let entries = &resume.educations;

    if entries.is_empty() {
        let mut report = SectionReport::new(section, 50);
        report.issues.push(ValidationIssue::new(
            IssueType::InsufficientDetail,
            section,
            Severity::Medium,
            "No education listed",
            "Add your degrees, certifications or relevant coursework",
        ));
        report.suggest("Add an education section, even for certifications or bootcamps");
        return report.finish();
    }

    let mut report = SectionReport::new(section, 100);

    for (i, entry) in entries.iter().enumerate() {
        let n = i + 1;

        if present(&entry.degree).is_none() || present(&entry.school).is_none() {
            report.deduct(
                20,
                ValidationIssue::new(
                    IssueType::InsufficientDetail,
                    section,
                    Severity::Medium,
                    format!("Education entry {n} is missing a degree or school"),
                    "Include both the degree and the institution name",
                )
                .at(i),
            );
            report.suggest("Include the degree and school for every education entry");
        }

        if present(&entry.start_date).is_none() && present(&entry.end_date).is_none() {
            report.deduct(
                10,
                ValidationIssue::new(
                    IssueType::InsufficientDetail,
                    section,
                    Severity::Low,
                    format!("Education entry {n} has no dates"),
                    "Add a start or graduation date",
                )
                .at(i),
            );
            report.suggest("Add dates to education entries");
        }
    }

    if report.issues.is_empty() {
        report.comply("Education entries are complete");
    }

    report.finish()
}

pub fn validate_projects(resume: &ResumeRecord) -> SectionAnalysis {
    let section = SectionType::Projects;
    let entries = &resume.projects;

    if entries.is_empty() {
        let mut report = SectionReport::new(section, 80);
        report.suggest("Consider adding projects that demonstrate relevant skills");
        return report.finish();
    }

    let mut report = SectionReport::new(section, 100);

    for (i, entry) in entries.iter().enumerate() {
        let n = i + 1;
        let description = present(&entry.description);

        if present(&entry.name).is_none() || description.is_none() {
            report.deduct(
                15,
                ValidationIssue::new(
                    IssueType::InsufficientDetail,
                    section,
                    Severity::Medium,
                    format!("Project {n} is missing a name or description"),
                    "Give every project a name and a short description",
                )
                .at(i),
            );
            report.suggest("Name and describe every project");
        }

        if let Some(description) = description {
            if description.chars().count() < MIN_PROJECT_DESCRIPTION {
                report.deduct(
                    10,
                    ValidationIssue::new(
                        IssueType::InsufficientDetail,
                        section,
                        Severity::Low,
                        format!("Project {n} description is very short"),
                        "Explain what the project does, your role and the technologies used",
                    )
                    .at(i),
                );
                report.suggest("Expand project descriptions with technologies and outcomes");
            }
        }
    }

    if report.issues.is_empty() {
        report.comply(format!("{} projects documented", entries.len()));
    }

    report.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Education, Project, SkillSection, WorkExperience};

    const GOOD_DESCRIPTION: &str =
        "Led migration of 12 services to Kubernetes, cutting deploy time by 40% across teams";

    fn make_contact() -> ResumeRecord {
        ResumeRecord {
            first_name: Some("Grace".to_string()),
            last_name: Some("Hopper".to_string()),
            email: Some("grace@navy.mil".to_string()),
            phone: Some("(555) 123-4567".to_string()),
            linkedin: Some("https://www.linkedin.com/in/ghopper".to_string()),
            ..Default::default()
        }
    }

    fn make_experience(description: &str) -> WorkExperience {
        WorkExperience {
            position: Some("Engineer".to_string()),
            company: Some("Acme".to_string()),
            start_date: Some("2020-01".to_string()),
            end_date: None,
            description: Some(description.to_string()),
        }
    }

    fn with_experiences(descriptions: &[&str]) -> ResumeRecord {
        ResumeRecord {
            work_experiences: descriptions.iter().map(|d| make_experience(d)).collect(),
            ..Default::default()
        }
    }

    fn make_skills(sections: &[usize]) -> ResumeRecord {
        ResumeRecord {
            skill_sections: sections
                .iter()
                .enumerate()
                .map(|(i, &count)| SkillSection {
                    name: Some(format!("Group {i}")),
                    skills: (0..count).map(|k| format!("skill-{k}")).collect(),
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_contact_complete_scores_full() {
        let analysis = validate_contact(&make_contact());
        assert_eq!(analysis.score, 100);
        assert!(analysis.issues.is_empty());
        assert!(analysis.compliant_aspects.iter().any(|a| a.contains("LinkedIn")));
    }

    #[test]
    fn test_contact_valid_required_fields_score_at_least_90() {
        let mut resume = make_contact();
        resume.linkedin = Some("ghopper".to_string());
        let analysis = validate_contact(&resume);
        assert!(analysis.score >= 90, "got {}", analysis.score);
    }

    #[test]
    fn test_contact_missing_fields_deduct_25_each() {
        let resume = ResumeRecord {
            first_name: Some("Grace".to_string()),
            last_name: Some("  ".to_string()),
            ..Default::default()
        };
        let analysis = validate_contact(&resume);
        // last name, email, phone missing
        assert_eq!(analysis.score, 25);
        assert_eq!(analysis.issues.len(), 1);
        assert_eq!(analysis.issues[0].severity, Severity::Critical);
        assert!(analysis.issues[0].message.contains("last name"));
    }

    #[test]
    fn test_contact_empty_clamps_to_zero() {
        let analysis = validate_contact(&ResumeRecord::default());
        assert_eq!(analysis.score, 0);
    }

    #[test]
    fn test_contact_invalid_email_and_phone() {
        let mut resume = make_contact();
        resume.email = Some("grace-at-navy".to_string());
        resume.phone = Some("555.123.4567 ext 9".to_string());
        let analysis = validate_contact(&resume);
        assert_eq!(analysis.score, 75);

        let phone = analysis
            .issues
            .iter()
            .find(|i| i.field.as_deref() == Some("phone"))
            .unwrap();
        assert!(phone.auto_fix_available);
        let email = analysis
            .issues
            .iter()
            .find(|i| i.field.as_deref() == Some("email"))
            .unwrap();
        assert!(!email.auto_fix_available);
        assert_eq!(email.severity, Severity::High);
    }

    #[test]
    fn test_contact_linkedin_without_domain_is_fixable() {
        let mut resume = make_contact();
        resume.linkedin = Some("ghopper".to_string());
        let analysis = validate_contact(&resume);
        assert_eq!(analysis.score, 90);
        assert_eq!(analysis.issues[0].issue_type, IssueType::FormatIssues);
        assert!(analysis.issues[0].auto_fix_available);
    }

    #[test]
    fn test_experience_empty_is_zero_with_one_critical_issue() {
        let analysis = validate_experience(&ResumeRecord::default());
        assert_eq!(analysis.score, 0);
        assert_eq!(analysis.issues.len(), 1);
        assert_eq!(analysis.issues[0].severity, Severity::Critical);
    }

    #[test]
    fn test_experience_strong_entry_scores_full() {
        let analysis = validate_experience(&with_experiences(&[GOOD_DESCRIPTION]));
        assert_eq!(analysis.score, 100);
        assert!(analysis.issues.is_empty());
    }

    #[test]
    fn test_experience_short_description_skips_content_checks() {
        let analysis = validate_experience(&with_experiences(&["I worked on stuff"]));
        assert_eq!(analysis.score, 85);
        assert_eq!(analysis.issues.len(), 1);
        assert_eq!(analysis.issues[0].issue_type, IssueType::InsufficientDetail);
    }

    #[test]
    fn test_experience_stacks_content_deductions() {
        let description =
            "I was responsible for our deployment tooling and worked on the internal platform team";
        let analysis = validate_experience(&with_experiences(&[description]));
        // no digits -20, pronouns -10, weak verbs -10
        assert_eq!(analysis.score, 60);

        let quantification = analysis
            .issues
            .iter()
            .find(|i| i.issue_type == IssueType::MissingQuantification)
            .unwrap();
        assert!(!quantification.auto_fix_available);
        assert!(analysis
            .issues
            .iter()
            .filter(|i| i.issue_type != IssueType::MissingQuantification)
            .all(|i| i.auto_fix_available && i.index == Some(0)));
    }

    #[test]
    fn test_weak_verbs_only_match_whole_words() {
        let embedded = validate_experience(&with_experiences(&[
            "Ran 12 unassisted deployments across three regions with zero rollback incidents",
        ]));
        assert_eq!(embedded.score, 100);

        let standalone = validate_experience(&with_experiences(&[
            "Assisted 12 teams through three regional deployments with zero rollback incidents",
        ]));
        assert!(standalone
            .issues
            .iter()
            .any(|i| i.issue_type == IssueType::WeakVerbs));
    }

    #[test]
    fn test_experience_missing_company_is_high() {
        let mut resume = with_experiences(&[GOOD_DESCRIPTION]);
        resume.work_experiences[0].company = None;
        let analysis = validate_experience(&resume);
        assert_eq!(analysis.score, 85);
        assert_eq!(analysis.issues[0].severity, Severity::High);
    }

    #[test]
    fn test_experience_score_floors_at_zero() {
        let bad = "I was responsible for our things and I worked on many other things here too";
        let analysis = validate_experience(&with_experiences(&[bad, bad, bad]));
        assert_eq!(analysis.score, 0);
    }

    #[test]
    fn test_pronoun_regex_respects_word_boundaries() {
        assert!(PRONOUN_RE.is_match("i shipped it"));
        assert!(!PRONOUN_RE.is_match("Improved mineral yield in Ourense"));
    }

    #[test]
    fn test_skills_missing_section_scores_20() {
        let analysis = validate_skills(&ResumeRecord::default());
        assert_eq!(analysis.score, 20);
        assert_eq!(analysis.issues[0].severity, Severity::High);
    }

    #[test]
    fn test_skills_too_few() {
        assert_eq!(validate_skills(&make_skills(&[3])).score, 80);
    }

    #[test]
    fn test_skills_total_counts_every_entry() {
        let resume = ResumeRecord {
            skill_sections: vec![SkillSection {
                name: Some("Tools".to_string()),
                skills: vec!["Rust".into(), "".into(), "Go".into(), " ".into(), "SQL".into()],
            }],
            ..Default::default()
        };
        let analysis = validate_skills(&resume);
        assert_eq!(analysis.score, 100);
        assert!(analysis.issues.is_empty());
    }

    #[test]
    fn test_skills_single_large_section_should_be_categorized() {
        let analysis = validate_skills(&make_skills(&[12]));
        assert_eq!(analysis.score, 95);
        assert_eq!(analysis.issues[0].severity, Severity::Low);
    }

    #[test]
    fn test_skills_multiple_sections_are_compliant() {
        let analysis = validate_skills(&make_skills(&[8, 7]));
        assert_eq!(analysis.score, 100);
        assert!(analysis.issues.is_empty());
    }

    #[test]
    fn test_education_empty_scores_50() {
        let analysis = validate_education(&ResumeRecord::default());
        assert_eq!(analysis.score, 50);
        assert_eq!(analysis.issues[0].severity, Severity::Medium);
    }

    #[test]
    fn test_education_incomplete_entry() {
        let resume = ResumeRecord {
            educations: vec![Education {
                degree: None,
                school: Some("MIT".to_string()),
                start_date: None,
                end_date: None,
            }],
            ..Default::default()
        };
        assert_eq!(validate_education(&resume).score, 70);
    }

    #[test]
    fn test_projects_empty_scores_80_without_issues() {
        let analysis = validate_projects(&ResumeRecord::default());
        assert_eq!(analysis.score, 80);
        assert!(analysis.issues.is_empty());
        assert!(!analysis.suggestions.is_empty());
    }

    #[test]
    fn test_projects_short_and_missing_descriptions() {
        let resume = ResumeRecord {
            projects: vec![
                Project {
                    name: Some("Compiler".to_string()),
                    description: Some("A toy compiler".to_string()),
                    ..Default::default()
                },
                Project {
                    name: None,
                    description: None,
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let analysis = validate_projects(&resume);
        assert_eq!(analysis.score, 75);
        assert_eq!(analysis.issues.len(), 2);
    }
}
