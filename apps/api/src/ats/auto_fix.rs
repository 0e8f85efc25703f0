//! Auto-Fix Engine: turns auto-fixable issues into pure resume transformations.
//!
//! Each `AutoFix` reads one field, rewrites it and returns a new `ResumeRecord`
//! with only that field replaced. `apply_auto_fixes` folds them in order; a fix
//! that cannot apply is logged and skipped without aborting the batch.

use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::{Captures, Regex};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::ats::models::{IssueType, SectionType, ValidationIssue};
use crate::models::lenient::present;
use crate::models::ResumeRecord;

static PRONOUN_STRIP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(I|my|mine|we|our)\b[ \t]*").expect("valid pronoun strip regex")
});

static REPEATED_BLANKS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]{2,}").expect("valid blank regex"));

static SPACE_BEFORE_PUNCT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+([,.;:!?])").expect("valid punctuation regex"));

/// Weak phrase → strong verb. Longer phrases first so they win the alternation.
const VERB_REPLACEMENTS: &[(&str, &str)] = &[
    ("responsible for", "led"),
    ("worked on", "developed"),
    ("helped with", "contributed to"),
    ("assisted with", "supported"),
    ("assisted", "supported"),
];

static WEAK_PHRASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = VERB_REPLACEMENTS
        .iter()
        .map(|(weak, _)| regex::escape(weak).replace(' ', r"\s+"))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b({alternation})\b")).expect("valid weak phrase regex")
});

static PROTOCOL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(https?://)?(www\.)?").expect("valid protocol regex"));

static LINKEDIN_PROFILE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)linkedin\.com/in/([A-Za-z0-9_-]+)").expect("valid linkedin regex")
});

const LINKEDIN_PREFIX: &str = "linkedin.com/in/";

#[derive(Debug, Error)]
pub enum AutoFixError {
    #[error("{section} entry {index} does not exist")]
    EntryNotFound { section: SectionType, index: usize },

    #[error("field '{0}' is empty")]
    EmptyField(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FixType {
    RemovePronouns,
    ImproveVerbs,
    FormatPhone,
    FormatLinkedin,
}

type FixFn = dyn Fn(&ResumeRecord) -> Result<ResumeRecord, AutoFixError> + Send + Sync;

#[derive(Clone, Serialize)]
pub struct AutoFix {
    pub fix_type: FixType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_index: Option<usize>,
    pub description: String,
    #[serde(skip)]
    apply: Arc<FixFn>,
}

impl AutoFix {
    fn new<F>(fix_type: FixType, section_index: Option<usize>, description: String, apply: F) -> Self
    where
        F: Fn(&ResumeRecord) -> Result<ResumeRecord, AutoFixError> + Send + Sync + 'static,
    {
        Self {
            fix_type,
            section_index,
            description,
            apply: Arc::new(apply),
        }
    }

    pub fn apply(&self, resume: &ResumeRecord) -> Result<ResumeRecord, AutoFixError> {
        (self.apply)(resume)
    }
}

impl fmt::Debug for AutoFix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutoFix")
            .field("fix_type", &self.fix_type)
            .field("section_index", &self.section_index)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Result of folding a batch of fixes over a resume.
#[derive(Debug, Clone, Serialize)]
pub struct AutoFixOutcome {
    pub resume: ResumeRecord,
    pub applied: Vec<String>,
    pub skipped: Vec<String>,
}

/// Builds one fix per auto-fixable issue that has a known transformation.
pub fn generate_auto_fixes(resume: &ResumeRecord, issues: &[ValidationIssue]) -> Vec<AutoFix> {
    let mut fixes: Vec<AutoFix> = Vec::new();

    for issue in issues.iter().filter(|i| i.auto_fix_available) {
        let Some(fix) = fix_for_issue(resume, issue) else {
            debug!(issue_type = ?issue.issue_type, section = %issue.section, "no auto-fix for issue");
            continue;
        };

        let duplicate = fixes
            .iter()
            .any(|f| f.fix_type == fix.fix_type && f.section_index == fix.section_index);
        if !duplicate {
            fixes.push(fix);
        }
    }

    fixes
}

fn fix_for_issue(resume: &ResumeRecord, issue: &ValidationIssue) -> Option<AutoFix> {
    match (issue.issue_type, issue.section) {
        (IssueType::PersonalPronouns, SectionType::Experience) => {
            let index = issue.index?;
            Some(AutoFix::new(
                FixType::RemovePronouns,
                Some(index),
                format!("Remove personal pronouns from {}", experience_label(resume, index)),
                move |r| rewrite_experience(r, index, remove_personal_pronouns),
            ))
        }
        (IssueType::WeakVerbs, SectionType::Experience) => {
            let index = issue.index?;
            Some(AutoFix::new(
                FixType::ImproveVerbs,
                Some(index),
                format!("Replace weak verbs in {}", experience_label(resume, index)),
                move |r| rewrite_experience(r, index, improve_weak_verbs),
            ))
        }
        (IssueType::FormatIssues, SectionType::Contact) => match issue.field.as_deref() {
            Some("phone") => Some(AutoFix::new(
                FixType::FormatPhone,
                None,
                "Format phone number".to_string(),
                |r| {
                    let phone = present(&r.phone).ok_or(AutoFixError::EmptyField("phone"))?;
                    Ok(ResumeRecord {
                        phone: Some(format_phone_number(phone)),
                        ..r.clone()
                    })
                },
            )),
            Some("linkedin") => Some(AutoFix::new(
                FixType::FormatLinkedin,
                None,
                "Format LinkedIn profile URL".to_string(),
                |r| {
                    let url = present(&r.linkedin).ok_or(AutoFixError::EmptyField("linkedin"))?;
                    Ok(ResumeRecord {
                        linkedin: Some(format_linkedin_url(url)),
                        ..r.clone()
                    })
                },
            )),
            _ => None,
        },
        _ => None,
    }
}

fn experience_label(resume: &ResumeRecord, index: usize) -> String {
    resume
        .work_experiences
        .get(index)
        .and_then(|e| present(&e.position).map(|p| format!("'{p}'")))
        .unwrap_or_else(|| format!("experience entry {}", index + 1))
}

/// Returns a copy of `resume` with one experience description rewritten.
fn rewrite_experience(
    resume: &ResumeRecord,
    index: usize,
    rewrite: fn(&str) -> String,
) -> Result<ResumeRecord, AutoFixError> {
    let entry = resume
        .work_experiences
        .get(index)
        .ok_or(AutoFixError::EntryNotFound {
            section: SectionType::Experience,
            index,
        })?;
    let description = entry
        .description
        .as_deref()
        .ok_or(AutoFixError::EmptyField("description"))?;

    let mut work_experiences = resume.work_experiences.clone();
    work_experiences[index].description = Some(rewrite(description));

    Ok(ResumeRecord {
        work_experiences,
        ..resume.clone()
    })
}

/// Folds `fixes` over a copy of `resume` in order.
pub fn apply_auto_fixes(resume: &ResumeRecord, fixes: &[AutoFix]) -> AutoFixOutcome {
    let initial = AutoFixOutcome {
        resume: resume.clone(),
        applied: Vec::new(),
        skipped: Vec::new(),
    };

    fixes.iter().fold(initial, |mut outcome, fix| {
        match fix.apply(&outcome.resume) {
            Ok(fixed) => {
                outcome.resume = fixed;
                outcome.applied.push(fix.description.clone());
            }
            Err(e) => {
                warn!("Skipping auto-fix '{}': {e}", fix.description);
                outcome.skipped.push(fix.description.clone());
            }
        }
        outcome
    })
}

pub fn remove_personal_pronouns(text: &str) -> String {
    let stripped = PRONOUN_STRIP_RE.replace_all(text, "");
    let collapsed = REPEATED_BLANKS_RE.replace_all(&stripped, " ");
    let tidied = SPACE_BEFORE_PUNCT_RE.replace_all(&collapsed, "$1");

    tidied
        .lines()
        .map(|line| capitalize_first_letter(line.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn improve_weak_verbs(text: &str) -> String {
    WEAK_PHRASE_RE
        .replace_all(text, |caps: &Captures| {
            let matched = &caps[0];
            let normalized = matched
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase();
            let replacement = VERB_REPLACEMENTS
                .iter()
                .find(|(weak, _)| *weak == normalized)
                .map(|(_, strong)| *strong)
                .unwrap_or(matched);
            match_case(matched, replacement)
        })
        .into_owned()
}

/// Applies the case pattern of `original` to `replacement`:
/// all-lower stays lower, all-upper stays upper, anything else is capitalized.
fn match_case(original: &str, replacement: &str) -> String {
    let has_letters = original.chars().any(char::is_alphabetic);
    if original == original.to_lowercase() {
        replacement.to_lowercase()
    } else if has_letters && original == original.to_uppercase() {
        replacement.to_uppercase()
    } else {
        capitalize_first_letter(replacement)
    }
}

fn capitalize_first_letter(text: &str) -> String {
    match text.char_indices().find(|(_, c)| c.is_alphabetic()) {
        Some((i, c)) => {
            let mut out = String::with_capacity(text.len());
            out.push_str(&text[..i]);
            out.extend(c.to_uppercase());
            out.push_str(&text[i + c.len_utf8()..]);
            out
        }
        None => text.to_string(),
    }
}

/// Formats by digit count. Inputs with seven digits or fewer are returned
/// trimmed but otherwise unchanged.
pub fn format_phone_number(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    let n = digits.len();

    match n {
        10 => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
        11 if digits.starts_with('1') => {
            format!("+1 ({}) {}-{}", &digits[1..4], &digits[4..7], &digits[7..])
        }
        n if n > 7 => {
            // last ten digits are area-first-last, anything before is the country code
            let (country, local) = digits.split_at(n.saturating_sub(10));
            let (area, rest) = local.split_at(local.len() - 7);
            let grouped = format!("{area}-{}-{}", &rest[..3], &rest[3..]);
            if country.is_empty() {
                grouped
            } else {
                format!("+{country} {grouped}")
            }
        }
        _ => phone.trim().to_string(),
    }
}

pub fn format_linkedin_url(url: &str) -> String {
    let trimmed = url.trim();

    if let Some(caps) = LINKEDIN_PROFILE_RE.captures(trimmed) {
        return format!("{LINKEDIN_PREFIX}{}", &caps[1]);
    }

    let rest = PROTOCOL_RE.replace(trimmed, "");
    if rest.to_lowercase().starts_with("linkedin.com") {
        return rest.into_owned();
    }

    let handle = rest.trim_matches('/').trim_start_matches('@');
    let handle = handle.strip_prefix("in/").unwrap_or(handle);
    format!("{LINKEDIN_PREFIX}{handle}")
}
