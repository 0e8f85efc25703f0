//! Keyword Matching Service: deterministic, local relevance scoring of job
//! postings against user preferences.
//!
//! The score is the sum of four independent bands, each computed by its own
//! function and folded into one total:
//!
//! | band                 | max | signal                                         |
//! |----------------------|-----|------------------------------------------------|
//! | function / title     | 80* | exact preference match, else alias keywords    |
//! | job type             | 5   | substring match in either direction            |
//! | location / remote    | 10* | remote, location substring, location tokens    |
//! | description keywords | 5   | alias keywords present in the description      |
//!
//! (*) The exact-keyword bonus and per-token location points are not capped by
//! their band; only the final total is capped at 100.

use async_trait::async_trait;

use crate::matching::keywords::keywords_for;
use crate::matching::JobMatcher;
use crate::models::{JobMatch, ScrapedJob, UserPreferences};

pub const MIN_MATCH_SCORE: u32 = 50;
const EXACT_FUNCTION_POINTS: u32 = 80;
const EXACT_KEYWORD_BONUS: u32 = 5;
const JOB_TYPE_POINTS: u32 = 5;
const REMOTE_POINTS: u32 = 10;
const LOCATION_POINTS: u32 = 8;
const LOCATION_TOKEN_POINTS: u32 = 3;
const MAX_DESCRIPTION_POINTS: u32 = 5;

/// Points and human-readable reasons contributed by one band.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BandScore {
    pub points: u32,
    pub reasons: Vec<String>,
}

impl BandScore {
    fn award(points: u32, reason: impl Into<String>) -> Self {
        Self {
            points,
            reasons: vec![reason.into()],
        }
    }

    fn and(mut self, other: BandScore) -> Self {
        self.points += other.points;
        self.reasons.extend(other.reasons);
        self
    }
}

/// Scores one posting. Returns `None` when the total is below `MIN_MATCH_SCORE`.
pub fn calculate_job_match(job: &ScrapedJob, prefs: &UserPreferences) -> Option<JobMatch> {
    let keywords = keywords_for(&prefs.job_function);

    let total = [
        function_band(job, prefs, &keywords),
        job_type_band(job, prefs),
        location_band(job, prefs),
        description_band(job, &keywords),
    ]
    .into_iter()
    .fold(BandScore::default(), BandScore::and);

    let score = total.points.min(100);
    if score < MIN_MATCH_SCORE {
        return None;
    }

    Some(JobMatch {
        job: job.clone(),
        score,
        reason: total.reasons.join(", "),
    })
}

/// Scores every posting and returns the survivors, best first.
pub fn match_jobs(jobs: &[ScrapedJob], prefs: &UserPreferences) -> Vec<JobMatch> {
    let mut matches: Vec<JobMatch> = jobs
        .iter()
        .filter_map(|job| calculate_job_match(job, prefs))
        .collect();
    rank(&mut matches);
    matches
}

/// Sorts descending by score; ties keep input order.
pub fn rank(matches: &mut [JobMatch]) {
    matches.sort_by(|a, b| b.score.cmp(&a.score));
}

pub fn function_band(job: &ScrapedJob, prefs: &UserPreferences, keywords: &[String]) -> BandScore {
    let preference = prefs.job_function.trim().to_lowercase();
    if preference.is_empty() || keywords.is_empty() {
        return BandScore::default();
    }

    let title = job.title.to_lowercase();
    let function = job.job_function.to_lowercase();

    if function.contains(&preference) || title.contains(&preference) {
        return BandScore::award(EXACT_FUNCTION_POINTS, "Exact job function match");
    }

    let description = job.description.to_lowercase();
    let mut keyword_matches = 0.0_f64;
    let mut exact_matches = 0_u32;

    for keyword in keywords {
        let lower = keyword.to_lowercase();
        if title.contains(&lower) || function.contains(&lower) {
            keyword_matches += 1.0;
            if job.title.contains(keyword.as_str()) || job.job_function.contains(keyword.as_str()) {
                exact_matches += 1;
            }
        } else if description.contains(&lower) {
            keyword_matches += 0.5;
        }
    }

    let strength = keyword_matches / keywords.len() as f64;
    let mut band = match strength {
        s if s >= 0.8 => BandScore::award(75, "Strong job function match"),
        s if s >= 0.6 => BandScore::award(65, "Good job function match"),
        s if s >= 0.4 => BandScore::award(55, "Moderate job function match"),
        s if s >= 0.2 => BandScore::award(45, "Partial job function match"),
        _ => BandScore::default(),
    };

    if exact_matches > 0 {
        band = band.and(BandScore::award(
            EXACT_KEYWORD_BONUS * exact_matches,
            format!("{exact_matches} exact keyword matches"),
        ));
    }

    band
}

pub fn job_type_band(job: &ScrapedJob, prefs: &UserPreferences) -> BandScore {
    let job_type = job.job_type.trim().to_lowercase();
    let preferred = prefs.job_type.trim().to_lowercase();

    if !job_type.is_empty()
        && !preferred.is_empty()
        && (job_type.contains(&preferred) || preferred.contains(&job_type))
    {
        BandScore::award(JOB_TYPE_POINTS, "Job type match")
    } else {
        BandScore::default()
    }
}

pub fn location_band(job: &ScrapedJob, prefs: &UserPreferences) -> BandScore {
    if prefs.open_to_remote && job.is_remote {
        return BandScore::award(REMOTE_POINTS, "Remote work available");
    }

    let location = job.location.trim().to_lowercase();
    let preferred = prefs.location.trim().to_lowercase();
    if location.is_empty() || preferred.is_empty() {
        return BandScore::default();
    }

    if location.contains(&preferred) || preferred.contains(&location) {
        return BandScore::award(LOCATION_POINTS, "Location match");
    }

    let matched_tokens = preferred
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| token.chars().count() > 2)
        .filter(|token| location.contains(token))
        .count() as u32;

    if matched_tokens > 0 {
        BandScore::award(LOCATION_TOKEN_POINTS * matched_tokens, "Partial location match")
    } else {
        BandScore::default()
    }
}

pub fn description_band(job: &ScrapedJob, keywords: &[String]) -> BandScore {
    let description = job.description.to_lowercase();
    let found = keywords
        .iter()
        .filter(|k| k.chars().count() > 3)
        .filter(|k| description.contains(&k.to_lowercase()))
        .count() as u32;

    if found > 0 {
        BandScore::award(
            found.min(MAX_DESCRIPTION_POINTS),
            format!("{found} relevant keywords in description"),
        )
    } else {
        BandScore::default()
    }
}

/// Local, deterministic matcher backend.
pub struct KeywordJobMatcher;

#[async_trait]
impl JobMatcher for KeywordJobMatcher {
    async fn match_jobs(&self, jobs: &[ScrapedJob], prefs: &UserPreferences) -> Vec<JobMatch> {
        match_jobs(jobs, prefs)
    }

    fn backend(&self) -> &'static str {
        "keyword"
    }
}
