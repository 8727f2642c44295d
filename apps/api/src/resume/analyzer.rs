use crate::errors::AppError;
use crate::llm_client::prompts::json_system;
use crate::llm_client::LlmClient;
use crate::resume::prompts::{ats_prompt, ATS_SCHEMA, ATS_SYSTEM_PREAMBLE};
use crate::resume::report::AtsReport;

/// Scores resume text against the ATS rubric. The client handles the
/// primary → fallback provider switch.
pub async fn analyze_resume(resume_text: &str, llm: &LlmClient) -> Result<AtsReport, AppError> {
    let system = json_system(ATS_SYSTEM_PREAMBLE, ATS_SCHEMA);
    let report: AtsReport = llm
        .call_json(&ats_prompt(resume_text), &system)
        .await
        .map_err(|e| AppError::Llm(format!("Resume analysis failed: {e}")))?;
    Ok(report.normalized())
}
