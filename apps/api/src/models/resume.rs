use serde::{Deserialize, Serialize};

use crate::models::lenient;

/// A resume as captured by the editor or a parsed upload.
///
/// Every field is optional: absent data lowers the ATS score instead of
/// failing the analysis. Transformations (auto-fixes) return new copies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRecord {
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub job_title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub linkedin: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub github: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub work_experiences: Vec<WorkExperience>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub educations: Vec<Education>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub projects: Vec<Project>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub skill_sections: Vec<SkillSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    #[serde(default, deserialize_with = "lenient::string")]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    #[serde(default, deserialize_with = "lenient::string")]
    pub degree: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub school: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillSection {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub skills: Vec<String>,
}

impl SkillSection {
    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resume_deserializes_from_editor_shape() {
        let resume: ResumeRecord = serde_json::from_value(json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "workExperiences": [
                {"position": "Engineer", "company": "Analytical", "startDate": "1842-01"}
            ],
            "skillSections": [{"name": "Math", "skills": ["Calculus", "", "Logic"]}]
        }))
        .unwrap();

        assert_eq!(resume.first_name.as_deref(), Some("Ada"));
        assert_eq!(resume.work_experiences.len(), 1);
        assert_eq!(resume.work_experiences[0].start_date.as_deref(), Some("1842-01"));
        assert_eq!(resume.skill_sections[0].skill_count(), 3);
    }

    #[test]
    fn test_malformed_fields_degrade_to_missing() {
        let resume: ResumeRecord = serde_json::from_value(json!({
            "email": {"not": "a string"},
            "workExperiences": "none",
            "educations": [42, {"school": "MIT"}]
        }))
        .unwrap();

        assert_eq!(resume.email, None);
        assert!(resume.work_experiences.is_empty());
        assert_eq!(resume.educations.len(), 1);
        assert_eq!(resume.educations[0].school.as_deref(), Some("MIT"));
    }
}
