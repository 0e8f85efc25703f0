// Job Matching
// Ranks scraped postings against a user's preferences. Two interchangeable
// backends implement `JobMatcher`: the local keyword scorer and the
// completion-API scorer that falls back to it per batch.

pub mod ai_matcher;
pub mod handlers;
pub mod keyword_matcher;
pub mod keywords;
pub mod paging;
pub mod prompts;

use async_trait::async_trait;

use crate::models::{JobMatch, ScrapedJob, UserPreferences};

/// Carried in `AppState` as `Arc<dyn JobMatcher>`, selected at startup.
#[async_trait]
pub trait JobMatcher: Send + Sync {
    /// Matches sorted descending by score.
    async fn match_jobs(&self, jobs: &[ScrapedJob], prefs: &UserPreferences) -> Vec<JobMatch>;

    /// Backend label reported to callers ("keyword" | "ai").
    fn backend(&self) -> &'static str;
}
