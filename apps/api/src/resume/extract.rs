//! Resume text extraction. PDF and plain text only.

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    PlainText,
}

impl ResumeFormat {
    /// Picks the format from the declared content type, then from the file
    /// extension when the client sent a generic type.
    pub fn detect(content_type: Option<&str>, file_name: Option<&str>) -> Option<Self> {
        let content_type = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_ascii_lowercase());

        match content_type.as_deref() {
            Some("application/pdf") => return Some(Self::Pdf),
            Some("text/plain") | Some("text/markdown") => return Some(Self::PlainText),
            Some("application/octet-stream") | None => {}
            Some(_) => return None,
        }

        let extension = file_name?.rsplit_once('.')?.1.to_ascii_lowercase();
        match extension.as_str() {
            "pdf" => Some(Self::Pdf),
            "txt" | "md" => Some(Self::PlainText),
            _ => None,
        }
    }
}

/// Extracts and tidies the text of an uploaded resume.
/// PDF parsing is CPU-bound and runs on the blocking pool.
pub async fn extract_text(format: ResumeFormat, bytes: bytes::Bytes) -> Result<String, AppError> {
    let raw = match format {
        ResumeFormat::PlainText => String::from_utf8(bytes.to_vec()).map_err(|_| {
            AppError::UnprocessableEntity("Resume text is not valid UTF-8".to_string())
        })?,
        ResumeFormat::Pdf => tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes)
        })
        .await
        .map_err(|e| AppError::UnprocessableEntity(format!("Could not read PDF: {e}")))?
        .map_err(|e| AppError::UnprocessableEntity(format!("Could not read PDF: {e:?}")))?,
    };

    let text = tidy_text(&raw);
    if text.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "No text could be extracted from the resume".to_string(),
        ));
    }
    Ok(text)
}

/// Collapses runs of spaces inside lines and drops blank lines.
fn tidy_text(raw: &str) -> String {
    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
