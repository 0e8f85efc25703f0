//! Axum route handlers for the Job Matching API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::matching::paging::{paginate, Page, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::models::lenient;
use crate::models::{JobMatch, ScrapedJob, UserPreferences};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    #[serde(default, deserialize_with = "lenient::list")]
    pub jobs: Vec<ScrapedJob>,
    #[serde(default)]
    pub preferences: UserPreferences,
    /// Offset returned as `next_cursor` by the previous page.
    #[serde(default)]
    pub cursor: usize,
    pub page_size: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    #[serde(flatten)]
    pub page: Page<JobMatch>,
    pub backend: &'static str,
}

/// POST /api/v1/jobs/match
pub async fn handle_match_jobs(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let page_size = request.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(AppError::Validation(format!(
            "page_size must be between 1 and {MAX_PAGE_SIZE}"
        )));
    }
    if request.preferences.job_function.trim().is_empty() {
        return Err(AppError::Validation(
            "preferences.jobFunction is required".to_string(),
        ));
    }

    let matcher = &state.job_matcher;
    let matches = matcher
        .match_jobs(&request.jobs, &request.preferences)
        .await;

    info!(
        "Matched {} of {} jobs for '{}' using {} backend",
        matches.len(),
        request.jobs.len(),
        request.preferences.job_function,
        matcher.backend()
    );

    Ok(Json(MatchResponse {
        page: paginate(matches, request.cursor, page_size),
        backend: matcher.backend(),
    }))
}
