use std::sync::Arc;

use crate::matching::JobMatcher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable job matcher. Default: KeywordJobMatcher. Swap via ENABLE_AI_MATCHING env.
    pub job_matcher: Arc<dyn JobMatcher>,
}
