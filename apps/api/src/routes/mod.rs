pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::ats::handlers as ats;
use crate::matching::handlers as matching;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // ATS API
        .route("/api/v1/ats/analyze", post(ats::handle_analyze))
        .route(
            "/api/v1/ats/sections/:section",
            post(ats::handle_analyze_section),
        )
        .route("/api/v1/ats/auto-fix", post(ats::handle_auto_fix))
        // Job Matching API
        .route("/api/v1/jobs/match", post(matching::handle_match_jobs))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::matching::keyword_matcher::KeywordJobMatcher;

    fn app() -> Router {
        build_router(AppState {
            job_matcher: Arc::new(KeywordJobMatcher),
        })
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        send(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(Request::get("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "ats-api");
    }

    #[tokio::test]
    async fn test_analyze_tolerates_malformed_fields() {
        let (status, body) = post_json(
            "/api/v1/ats/analyze",
            json!({"resume": {"firstName": 7, "email": ["nope"], "workExperiences": "none"}}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["compliance_level"], "poor");
        assert_eq!(body["score_label"], "Needs Work");
        assert_eq!(body["sections"].as_array().unwrap().len(), 5);
        assert!(body["overall_score"].as_u64().unwrap() <= 100);
    }

    #[tokio::test]
    async fn test_section_errors() {
        let (status, body) = post_json("/api/v1/ats/sections/hobbies", json!({"resume": {}})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (status, body) = post_json("/api/v1/ats/sections/summary", json!({"resume": {}})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_single_section_analysis() {
        let (status, body) = post_json(
            "/api/v1/ats/sections/Education",
            json!({"resume": {"educations": [{"degree": "BSc", "school": "MIT", "endDate": "2019"}]}}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["section"], "education");
        assert_eq!(body["score"], 100);
    }

    #[tokio::test]
    async fn test_auto_fix_rewrites_pronouns() {
        let (status, body) = post_json(
            "/api/v1/ats/auto-fix",
            json!({"resume": {
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@example.com",
                "workExperiences": [{
                    "position": "Engineer",
                    "company": "Analytical Engines",
                    "description": "I built my team's deployment pipeline, cutting release time by 40% across 12 services"
                }]
            }}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let description = body["resume"]["workExperiences"][0]["description"]
            .as_str()
            .unwrap();
        assert!(description.starts_with("Built"));
        assert!(!description.contains("my "));
        assert_eq!(body["applied_fixes"].as_array().unwrap().len(), 1);
        assert!(body["skipped_fixes"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_match_pages_results() {
        let jobs: Vec<Value> = (1..=3)
            .map(|id| json!({"id": id, "title": "DevOps Engineer", "company": "Initech"}))
            .chain([json!({"id": 4, "title": "Pastry Chef"}), json!("garbage")])
            .collect();

        let (status, body) = post_json(
            "/api/v1/jobs/match",
            json!({
                "jobs": jobs,
                "preferences": {"jobFunction": "DevOps Engineer"},
                "page_size": 2
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["backend"], "keyword");
        assert_eq!(body["items"].as_array().unwrap().len(), 2);
        assert_eq!(body["total"], 3);
        assert_eq!(body["next_cursor"], 2);
        assert_eq!(body["remaining"], 1);
        assert_eq!(body["items"][0]["score"], 80);
    }

    #[tokio::test]
    async fn test_match_rejects_bad_requests() {
        let (status, _) = post_json(
            "/api/v1/jobs/match",
            json!({"jobs": [], "preferences": {"jobFunction": "QA Engineer"}, "page_size": 0}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = post_json(
            "/api/v1/jobs/match",
            json!({"jobs": [], "preferences": {"jobFunction": "  "}}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_malformed_json_body_rejected() {
        let (status, _) = send(
            Request::post("/api/v1/ats/analyze")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await;
        assert!(status.is_client_error());
    }
}
