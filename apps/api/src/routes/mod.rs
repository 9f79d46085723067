pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::scoring::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/upload-resume", post(handlers::handle_upload_resume))
        .route("/analyze", post(handlers::handle_analyze))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use bytes::Bytes;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::embedding::{Embedder, EmbeddingError, EmbeddingVector, HashEmbedder};
    use crate::extraction::{ExtractionError, TextExtractor};
    use crate::scoring::fusion::FusionWeights;
    use crate::scoring::{Analyzer, VocabularyStore};

    const BOUNDARY: &str = "resume-match-test-boundary";

    /// Treats uploaded bytes as UTF-8 text; "%PDF-broken" simulates a parser failure.
    struct PlainTextExtractor;

    #[async_trait]
    impl TextExtractor for PlainTextExtractor {
        async fn extract(&self, bytes: Bytes) -> Result<String, ExtractionError> {
            if bytes.starts_with(b"%PDF-broken") {
                return Err(ExtractionError::Unreadable("broken xref".to_string()));
            }
            Ok(String::from_utf8_lossy(&bytes).trim().to_string())
        }
    }

    struct DownEmbedder;

    #[async_trait]
    impl Embedder for DownEmbedder {
        fn name(&self) -> &'static str {
            "down"
        }

        async fn embed(&self, _text: &str) -> Result<EmbeddingVector, EmbeddingError> {
            Err(EmbeddingError::RetriesExhausted { retries: 3 })
        }
    }

    fn app_with(embedder: Arc<dyn Embedder>) -> Router {
        let state = AppState {
            config: Config::default(),
            analyzer: Analyzer::new(
                Arc::new(VocabularyStore::with_default_skills().unwrap()),
                embedder,
                FusionWeights::default(),
            ),
            text_extractor: Arc::new(PlainTextExtractor),
        };
        build_router(state)
    }

    fn app() -> Router {
        app_with(Arc::new(HashEmbedder::new(384)))
    }

    fn multipart_body(file: Option<&[u8]>, job_description: Option<&str>) -> Vec<u8> {
        let mut body = Vec::new();
        if let Some(file) = file {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"resume.pdf\"\r\nContent-Type: application/pdf\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(file);
            body.extend_from_slice(b"\r\n");
        }
        if let Some(jd) = job_description {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"job_description\"\r\n\r\n{jd}\r\n"
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    async fn post_multipart(app: Router, uri: &str, body: Vec<u8>) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={BOUNDARY}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_reports_backend() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["embedding_backend"], "hash");
    }

    #[tokio::test]
    async fn test_upload_resume_returns_preview() {
        let resume = "x".repeat(1500);
        let (status, json) = post_multipart(
            app(),
            "/upload-resume",
            multipart_body(Some(resume.as_bytes()), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["resume_text_preview"].as_str().unwrap().len(), 1000);
    }

    #[tokio::test]
    async fn test_upload_resume_without_file_is_bad_request() {
        let (status, json) =
            post_multipart(app(), "/upload-resume", multipart_body(None, Some("jd"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_analyze_returns_match_result() {
        let (status, json) = post_multipart(
            app(),
            "/analyze",
            multipart_body(
                Some(b"Experienced in python and react, built rest api services".as_slice()),
                Some("Looking for python developer with react and docker skills"),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["matched_skills"], serde_json::json!(["python", "react"]));
        assert_eq!(json["missing_skills"], serde_json::json!(["docker"]));
        let skill = json["skill_match_percentage"].as_f64().unwrap();
        assert!((skill - 66.67).abs() < 0.01);
        assert!(json["semantic_match_percentage"].is_number());
        assert!(json["final_match_percentage"].is_number());
    }

    #[tokio::test]
    async fn test_analyze_requires_job_description() {
        let (status, json) = post_multipart(
            app(),
            "/analyze",
            multipart_body(Some(b"python developer".as_slice()), None),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["message"], "job_description is required");
    }

    #[tokio::test]
    async fn test_analyze_unreadable_document_is_unprocessable() {
        let (status, json) = post_multipart(
            app(),
            "/analyze",
            multipart_body(Some(b"%PDF-broken".as_slice()), Some("python")),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["error"]["code"], "UNREADABLE_DOCUMENT");
    }

    #[tokio::test]
    async fn test_analyze_embedding_failure_is_service_unavailable() {
        let (status, json) = post_multipart(
            app_with(Arc::new(DownEmbedder)),
            "/analyze",
            multipart_body(Some(b"python developer".as_slice()), Some("python developer")),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json["error"]["code"], "EMBEDDING_UNAVAILABLE");
    }
}
