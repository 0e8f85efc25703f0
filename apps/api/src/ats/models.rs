use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    Contact,
    Summary,
    Experience,
    Skills,
    Education,
    Projects,
}

impl SectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::Contact => "contact",
            SectionType::Summary => "summary",
            SectionType::Experience => "experience",
            SectionType::Skills => "skills",
            SectionType::Education => "education",
            SectionType::Projects => "projects",
        }
    }

    /// Contribution of the section to the overall score.
    pub fn weight(&self) -> f64 {
        match self {
            SectionType::Contact => 0.15,
            SectionType::Summary => 0.05,
            SectionType::Experience => 0.40,
            SectionType::Skills => 0.25,
            SectionType::Education => 0.10,
            SectionType::Projects => 0.05,
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "contact" => Ok(SectionType::Contact),
            "summary" => Ok(SectionType::Summary),
            "experience" => Ok(SectionType::Experience),
            "skills" => Ok(SectionType::Skills),
            "education" => Ok(SectionType::Education),
            "projects" => Ok(SectionType::Projects),
            other => Err(format!("unknown section '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    InsufficientDetail,
    MissingQuantification,
    PersonalPronouns,
    WeakVerbs,
    MissingKeywords,
    FormatIssues,
}

/// Ordered from most to least severe, so `Ord` sorts critical first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub section: SectionType,
    pub severity: Severity,
    pub message: String,
    pub suggestion: String,
    #[serde(default)]
    pub auto_fix_available: bool,
    /// Position of the offending entry within its section's list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    /// Contact field a format issue refers to ("email", "phone", "linkedin").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ValidationIssue {
    pub fn new(
        issue_type: IssueType,
        section: SectionType,
        severity: Severity,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            issue_type,
            section,
            severity,
            message: message.into(),
            suggestion: suggestion.into(),
            auto_fix_available: false,
            index: None,
            field: None,
        }
    }

    pub fn auto_fixable(mut self) -> Self {
        self.auto_fix_available = true;
        self
    }

    pub fn at(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn on_field(mut self, field: &str) -> Self {
        self.field = Some(field.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionAnalysis {
    pub section: SectionType,
    pub score: u32, // 0 – 100
    pub issues: Vec<ValidationIssue>,
    pub suggestions: Vec<String>,
    pub compliant_aspects: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplianceLevel {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ComplianceLevel {
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 90 => ComplianceLevel::Excellent,
            s if s >= 75 => ComplianceLevel::Good,
            s if s >= 60 => ComplianceLevel::Fair,
            _ => ComplianceLevel::Poor,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ATSAnalysisResult {
    pub overall_score: u32, // 0 – 100
    pub compliance_level: ComplianceLevel,
    pub sections: Vec<SectionAnalysis>,
    /// Critical and high severity issues across every section.
    pub critical_issues: Vec<ValidationIssue>,
    pub top_suggestions: Vec<String>,
    pub analyzed_at: DateTime<Utc>,
}

impl ATSAnalysisResult {
    /// Every issue from every section, in section order.
    pub fn all_issues(&self) -> Vec<ValidationIssue> {
        self.sections
            .iter()
            .flat_map(|s| s.issues.iter().cloned())
            .collect()
    }

    pub fn section(&self, section: SectionType) -> Option<&SectionAnalysis> {
        self.sections.iter().find(|s| s.section == section)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_orders_critical_first() {
        let mut severities = vec![Severity::Low, Severity::Critical, Severity::Medium, Severity::High];
        severities.sort();
        assert_eq!(
            severities,
            vec![Severity::Critical, Severity::High, Severity::Medium, Severity::Low]
        );
    }

    #[test]
    fn test_compliance_thresholds() {
        assert_eq!(ComplianceLevel::from_score(90), ComplianceLevel::Excellent);
        assert_eq!(ComplianceLevel::from_score(89), ComplianceLevel::Good);
        assert_eq!(ComplianceLevel::from_score(75), ComplianceLevel::Good);
        assert_eq!(ComplianceLevel::from_score(60), ComplianceLevel::Fair);
        assert_eq!(ComplianceLevel::from_score(59), ComplianceLevel::Poor);
    }

    #[test]
    fn test_section_type_parses_case_insensitively() {
        assert_eq!("Experience".parse::<SectionType>(), Ok(SectionType::Experience));
        assert!("hobbies".parse::<SectionType>().is_err());
    }

    #[test]
    fn test_issue_serializes_type_tag() {
        let issue = ValidationIssue::new(
            IssueType::WeakVerbs,
            SectionType::Experience,
            Severity::Medium,
            "msg",
            "fix",
        )
        .auto_fixable()
        .at(2);
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["type"], "weak_verbs");
        assert_eq!(json["severity"], "medium");
        assert_eq!(json["index"], 2);
        assert!(json.get("field").is_none());
    }
}
