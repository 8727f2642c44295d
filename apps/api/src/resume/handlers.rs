//! Axum route handlers for resume analysis.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::resume::analyzer::analyze_resume;
use crate::resume::extract::{extract_text, ResumeFormat};
use crate::resume::report::AtsReport;
use crate::state::AppState;

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct AnalyzeResumeResponse {
    pub success: bool,
    pub data: AtsReport,
}

/// POST /api/v1/resume/analyze
///
/// Multipart upload with a single `file` field (PDF or plain text).
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResumeResponse>, AppError> {
    let mut upload = None;
    // Body limit overruns surface here as 413, other multipart errors as 400.
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let format = ResumeFormat::detect(field.content_type(), field.file_name())
            .ok_or_else(|| AppError::Validation("Unsupported file format".to_string()))?;
        let bytes = field.bytes().await?;
        upload = Some((format, bytes));
        break;
    }

    let (format, bytes) = upload
        .filter(|(_, bytes)| !bytes.is_empty())
        .ok_or_else(|| AppError::Validation("File not provided".to_string()))?;

    let llm = state.llm.as_ref().ok_or_else(|| {
        AppError::ServiceUnavailable("Resume analysis requires an LLM provider".to_string())
    })?;

    let size = bytes.len();
    let resume_text = extract_text(format, bytes).await?;
    let report = analyze_resume(&resume_text, llm).await?;

    info!(
        "Analyzed {:?} resume ({} bytes, {} chars): ATS score {}",
        format,
        size,
        resume_text.len(),
        report.ats_score
    );

    Ok(Json(AnalyzeResumeResponse {
        success: true,
        data: report,
    }))
}
