//! Axum route handlers for résumé upload and match analysis.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::preview;
use crate::scoring::pipeline::MatchResult;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UploadResumeResponse {
    pub resume_text_preview: String,
}

/// Multipart fields accepted by both endpoints. Unknown fields are ignored.
#[derive(Debug, Default)]
struct UploadForm {
    file: Option<Bytes>,
    job_description: Option<String>,
}

impl UploadForm {
    async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = UploadForm::default();
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().map(str::to_owned);
            match name.as_deref() {
                Some("file") => form.file = Some(field.bytes().await?),
                Some("job_description") => form.job_description = Some(field.text().await?),
                _ => {}
            }
        }
        Ok(form)
    }

    fn require_file(&mut self) -> Result<Bytes, AppError> {
        match self.file.take() {
            Some(bytes) if !bytes.is_empty() => Ok(bytes),
            Some(_) => Err(AppError::Validation("file cannot be empty".to_string())),
            None => Err(AppError::Validation("file is required".to_string())),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /upload-resume
///
/// Extracts the résumé text and returns its first characters as a preview.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResumeResponse>, AppError> {
    let mut form = UploadForm::read(multipart).await?;
    let file = form.require_file()?;

    let resume_text = state.text_extractor.extract(file).await?;

    Ok(Json(UploadResumeResponse {
        resume_text_preview: preview(&resume_text, state.config.preview_chars).to_string(),
    }))
}

/// POST /analyze
///
/// Extracts the résumé text and scores it against `job_description`.
/// An empty job description is allowed and scores zero on skills.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<MatchResult>, AppError> {
    let mut form = UploadForm::read(multipart).await?;
    let file = form.require_file()?;
    let job_description = form
        .job_description
        .take()
        .ok_or_else(|| AppError::Validation("job_description is required".to_string()))?;

    let resume_text = state.text_extractor.extract(file).await?;
    info!(
        resume_chars = resume_text.chars().count(),
        jd_chars = job_description.chars().count(),
        "Analyzing résumé against job description"
    );

    let result = state.analyzer.analyze(&resume_text, &job_description).await?;

    Ok(Json(result))
}
