//! AI Matching Service: best-effort augmentation of keyword matching.
//!
//! Jobs are scored in batches of `AI_BATCH_SIZE` by the completion API. A
//! batch is retried only on rate limiting; any other failure (transport, API
//! error, unparseable output, retries exhausted) falls back to keyword
//! matching for that batch alone.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::llm_client::json_repair::parse_json_array;
use crate::llm_client::{CompletionClient, LlmError};
use crate::matching::keyword_matcher::{self, rank};
use crate::matching::prompts::{build_match_prompt, match_system_prompt};
use crate::matching::JobMatcher;
use crate::models::lenient::{value_as_f64, value_as_i64};
use crate::models::{JobMatch, ScrapedJob, UserPreferences};

pub const AI_BATCH_SIZE: usize = 3;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const AI_MIN_MATCH_SCORE: u32 = 70;
const RETRY_BASE_DELAY_MS: u64 = 5_000;
const RETRY_MAX_DELAY_MS: u64 = 30_000;
const DEFAULT_REASON: &str = "AI match";

/// Delay before retry number `attempt` (1-based).
pub fn retry_delay(attempt: u32) -> Duration {
    Duration::from_millis((RETRY_BASE_DELAY_MS * attempt as u64).min(RETRY_MAX_DELAY_MS))
}

pub struct AiJobMatcher {
    client: Arc<dyn CompletionClient>,
    /// Pause between consecutive batches to stay under the provider's rate limit.
    batch_delay: Duration,
}

impl AiJobMatcher {
    pub fn new(client: Arc<dyn CompletionClient>, batch_delay: Duration) -> Self {
        Self {
            client,
            batch_delay,
        }
    }

    /// Scores one batch, falling back to keyword matching on failure.
    pub async fn process_batch(
        &self,
        jobs: &[ScrapedJob],
        prefs: &UserPreferences,
        max_retries: u32,
    ) -> Vec<JobMatch> {
        match self.score_batch(jobs, prefs, max_retries).await {
            Ok(matches) => {
                debug!("AI scored batch of {}: {} matches", jobs.len(), matches.len());
                matches
            }
            Err(e) => {
                warn!(
                    "AI matching failed for batch of {} jobs, using keyword matching: {e}",
                    jobs.len()
                );
                keyword_matcher::match_jobs(jobs, prefs)
            }
        }
    }

    async fn score_batch(
        &self,
        jobs: &[ScrapedJob],
        prefs: &UserPreferences,
        max_retries: u32,
    ) -> Result<Vec<JobMatch>, LlmError> {
        let system = match_system_prompt();
        let prompt = build_match_prompt(jobs, prefs);

        let mut attempt = 0;
        let text = loop {
            match self.client.complete(&system, &prompt).await {
                Ok(text) => break text,
                Err(LlmError::RateLimited { .. }) if attempt < max_retries => {
                    attempt += 1;
                    let delay = retry_delay(attempt);
                    warn!(
                        "Rate limited, retry {attempt}/{max_retries} after {}ms",
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        };

        let entries = parse_json_array(&text)?;
        Ok(decode_matches(&entries, jobs))
    }
}

/// Maps model output back onto the batch. Unknown or repeated ids and scores
/// below `AI_MIN_MATCH_SCORE` are dropped.
fn decode_matches(entries: &[Value], jobs: &[ScrapedJob]) -> Vec<JobMatch> {
    let mut seen = HashSet::new();

    entries
        .iter()
        .filter_map(|entry| {
            let id = entry.get("id").and_then(value_as_i64)?;
            let score = entry.get("score").and_then(value_as_f64)?;
            let score = score.round().clamp(0.0, 100.0) as u32;
            if score < AI_MIN_MATCH_SCORE || !seen.insert(id) {
                return None;
            }

            let job = jobs.iter().find(|j| j.id == id)?;
            let reason = entry
                .get("reason")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .unwrap_or(DEFAULT_REASON);

            Some(JobMatch {
                job: job.clone(),
                score,
                reason: reason.to_string(),
            })
        })
        .collect()
}

#[async_trait]
impl JobMatcher for AiJobMatcher {
    async fn match_jobs(&self, jobs: &[ScrapedJob], prefs: &UserPreferences) -> Vec<JobMatch> {
        let mut matches = Vec::new();

        for (i, batch) in jobs.chunks(AI_BATCH_SIZE).enumerate() {
            if i > 0 && !self.batch_delay.is_zero() {
                tokio::time::sleep(self.batch_delay).await;
            }
            matches.extend(self.process_batch(batch, prefs, DEFAULT_MAX_RETRIES).await);
        }

        rank(&mut matches);
        matches
    }

    fn backend(&self) -> &'static str {
        "ai"
    }
}
