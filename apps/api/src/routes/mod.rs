pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::interview::handlers as interview;
use crate::resume::handlers as resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Interview API
        .route("/api/v1/interview/start-interview", post(interview::handle_start))
        .route("/api/v1/interview/answer", post(interview::handle_answer))
        .route("/api/v1/interview/next", post(interview::handle_next))
        .route("/api/v1/interview/finish", post(interview::handle_finish))
        .route(
            "/api/v1/interview/summary/:interview_id",
            get(interview::handle_summary),
        )
        .route(
            "/api/v1/interview/:interview_id",
            get(interview::handle_get_interview),
        )
        // Resume API
        .route(
            "/api/v1/resume/analyze",
            post(resume::handle_analyze).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::interview::interviewer::OfflineInterviewer;

    const BOUNDARY: &str = "careero-test-boundary";

    /// State with a lazy pool: requests rejected before touching the
    /// database never need a running Postgres.
    fn test_state() -> AppState {
        let config = Config {
            database_url: "postgres://localhost/careero_test".to_string(),
            llm: None,
            llm_fallback: None,
            interview_duration_secs: 120,
            max_upload_bytes: 1024 * 1024,
            port: 0,
            rust_log: "info".to_string(),
        };
        AppState {
            db: PgPoolOptions::new()
                .connect_lazy(&config.database_url)
                .unwrap(),
            llm: None,
            config,
            interviewer: Arc::new(OfflineInterviewer),
        }
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = build_router(test_state()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart(field: &str, file_name: &str, content_type: &str, content: &str) -> Request<Body> {
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
             Content-Type: {content_type}\r\n\r\n\
             {content}\r\n\
             --{BOUNDARY}--\r\n"
        );
        Request::post("/api/v1/resume/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_offline_backend() {
        let (status, body) = send(Request::get("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["interviewer"], "offline");
        assert_eq!(body["resumeAnalysis"], false);
    }

    #[tokio::test]
    async fn test_start_without_role_is_rejected() {
        let (status, body) = send(post_json(
            "/api/v1/interview/start-interview",
            r#"{"role": "  ", "level": "Junior"}"#,
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Role is required");
    }

    #[tokio::test]
    async fn test_blank_answer_is_rejected() {
        let (status, body) = send(post_json(
            "/api/v1/interview/answer",
            r#"{"interviewId": "6f1c2a52-5d4e-4f5c-9a59-0d1c7f3e8b21",
                "questionIndex": 0, "answerText": "   ",
                "questionText": "ignored", "role": "ignored"}"#,
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_negative_question_index_is_validation_error() {
        let (status, body) = send(post_json(
            "/api/v1/interview/answer",
            r#"{"interviewId": "6f1c2a52-5d4e-4f5c-9a59-0d1c7f3e8b21",
                "questionIndex": -1, "answerText": "REST is stateless."}"#,
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_missing_answer_text_is_validation_error() {
        let (status, body) = send(post_json(
            "/api/v1/interview/answer",
            r#"{"interviewId": "6f1c2a52-5d4e-4f5c-9a59-0d1c7f3e8b21", "questionIndex": 0}"#,
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_finish_with_bad_body_is_validation_error() {
        let (status, body) = send(post_json(
            "/api/v1/interview/finish",
            r#"{"interviewId": "not-a-uuid"}"#,
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_malformed_interview_id_is_client_error() {
        let (status, _) = send(
            Request::get("/api/v1/interview/summary/not-a-uuid")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_resume_without_file_field() {
        let (status, body) = send(multipart("notes", "cv.txt", "text/plain", "hello")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "File not provided");
    }

    #[tokio::test]
    async fn test_resume_docx_unsupported() {
        let (status, body) = send(multipart(
            "file",
            "cv.docx",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            "PK",
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Unsupported file format");
    }

    #[tokio::test]
    async fn test_oversized_resume_is_payload_too_large() {
        let content = "a".repeat(2 * 1024 * 1024);
        let (status, body) = send(multipart("file", "cv.txt", "text/plain", &content)).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
        assert_eq!(body["error"]["message"], "File too large");
    }

    #[tokio::test]
    async fn test_resume_analysis_needs_provider() {
        let (status, body) = send(multipart(
            "file",
            "cv.txt",
            "text/plain",
            "Jane Doe - Rust Engineer",
        ))
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "SERVICE_UNAVAILABLE");
    }
}
