//! Axum route handlers for the ATS API.

use axum::{extract::Path, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ats::auto_fix::{apply_auto_fixes, generate_auto_fixes, AutoFix};
use crate::ats::engine::{analyze_resume, analyze_single_section, score_color, score_label};
use crate::ats::models::{ATSAnalysisResult, SectionAnalysis, SectionType, ValidationIssue};
use crate::errors::AppError;
use crate::models::ResumeRecord;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub resume: ResumeRecord,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    #[serde(flatten)]
    pub analysis: ATSAnalysisResult,
    pub score_color: &'static str,
    pub score_label: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct AutoFixRequest {
    #[serde(default)]
    pub resume: ResumeRecord,
    /// Issues to fix. When absent, every auto-fixable issue from a fresh analysis.
    pub issues: Option<Vec<ValidationIssue>>,
}

#[derive(Debug, Serialize)]
pub struct AutoFixResponse {
    pub resume: ResumeRecord,
    pub fixes: Vec<AutoFix>,
    pub applied_fixes: Vec<String>,
    pub skipped_fixes: Vec<String>,
    pub analysis: ATSAnalysisResult,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/ats/analyze
pub async fn handle_analyze(
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let analysis = analyze_resume(&request.resume);
    Ok(Json(AnalyzeResponse {
        score_color: score_color(analysis.overall_score),
        score_label: score_label(analysis.overall_score),
        analysis,
    }))
}

/// POST /api/v1/ats/sections/:section
pub async fn handle_analyze_section(
    Path(section): Path<String>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<SectionAnalysis>, AppError> {
    let section: SectionType = section.parse().map_err(AppError::Validation)?;

    analyze_single_section(&request.resume, section)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No validator for section '{section}'")))
}

/// POST /api/v1/ats/auto-fix
///
/// Generates fixes for the given (or freshly detected) issues, applies them and
/// returns the corrected resume with its re-analysis.
pub async fn handle_auto_fix(
    Json(request): Json<AutoFixRequest>,
) -> Result<Json<AutoFixResponse>, AppError> {
    let issues = match request.issues {
        Some(issues) => issues,
        None => analyze_resume(&request.resume).all_issues(),
    };

    let fixes = generate_auto_fixes(&request.resume, &issues);
    let outcome = apply_auto_fixes(&request.resume, &fixes);
    let analysis = analyze_resume(&outcome.resume);

    info!(
        "Auto-fix applied {} of {} fixes, score now {}",
        outcome.applied.len(),
        fixes.len(),
        analysis.overall_score
    );

    Ok(Json(AutoFixResponse {
        resume: outcome.resume,
        fixes,
        applied_fixes: outcome.applied,
        skipped_fixes: outcome.skipped,
        analysis,
    }))
}
