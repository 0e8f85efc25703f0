use serde::{Deserialize, Serialize};

use crate::models::lenient;

/// A scraped job posting. Read-only to the matchers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrapedJob {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: i64,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub company: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub job_type: String,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_remote: bool,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub job_function: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub date_posted: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub job_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub min_amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub max_amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub company_logo: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub company_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub company_industry: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub company_num_employees: Option<String>,
}

/// A user's stated job-search preferences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub job_function: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub job_type: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub open_to_remote: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub needs_sponsorship: bool,
}

/// A ranked posting produced by one matching run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobMatch {
    pub job: ScrapedJob,
    pub score: u32, // 0 – 100
    pub reason: String,
}
