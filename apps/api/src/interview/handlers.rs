//! Axum route handlers for the mock-interview API.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::{ApiJson, AppError};
use crate::interview::interviewer::Interviewer;
use crate::interview::models::{AnswerRecord, InterviewSummary, Question};
use crate::interview::session::{normalize_level, usable_questions, Interview};
use crate::interview::store::{create_interview, get_interview, modify_interview};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct StartInterviewRequest {
    pub role: Option<String>,
    pub level: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartInterviewResponse {
    pub interview_id: Uuid,
    pub role: String,
    pub level: String,
    pub questions: Vec<Question>,
    pub duration_secs: u64,
}

/// `questionText`, `role` and `level` sent by older clients are accepted and
/// ignored: the stored interview is authoritative.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswerRequest {
    pub interview_id: Uuid,
    pub question_index: usize,
    pub answer_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewIdRequest {
    pub interview_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextQuestionResponse {
    pub question: Question,
    pub question_index: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewDetailResponse {
    #[serde(flatten)]
    pub interview: Interview,
    pub remaining_secs: i64,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/interview/start-interview
pub async fn handle_start(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<StartInterviewRequest>,
) -> Result<Json<StartInterviewResponse>, AppError> {
    let role = request
        .role
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .ok_or_else(|| AppError::Validation("Role is required".to_string()))?
        .to_string();
    let level = normalize_level(request.level.as_deref());

    let questions = state.interviewer.opening_questions(&role, &level).await?;
    let questions = usable_questions(questions)?;

    let interview = create_interview(&state.db, &role, &level, &questions).await?;

    info!(
        "Interview {} started: role='{}' level='{}' backend={}",
        interview.id,
        role,
        level,
        state.interviewer.backend()
    );

    Ok(Json(StartInterviewResponse {
        interview_id: interview.id,
        role: interview.role,
        level: interview.level,
        questions: interview.questions,
        duration_secs: state.config.interview_duration_secs,
    }))
}

/// POST /api/v1/interview/answer
///
/// Scores the answer and appends it. The checks run once before the LLM call
/// (to avoid wasted work) and again under the row lock before writing.
pub async fn handle_answer(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SubmitAnswerRequest>,
) -> Result<Json<AnswerRecord>, AppError> {
    let answer_text = request.answer_text.trim();
    if answer_text.is_empty() {
        return Err(AppError::Validation("Answer text is required".to_string()));
    }

    let interview = get_interview(&state.db, request.interview_id).await?;
    interview.ensure_open(Utc::now(), state.config.interview_duration())?;
    let question = interview.answerable(request.question_index)?.clone();

    let evaluation = state
        .interviewer
        .evaluate(&interview.role, &interview.level, &question.text, answer_text)
        .await?;

    let record = AnswerRecord::new(
        request.question_index,
        question.text,
        answer_text.to_string(),
        evaluation,
    );

    let duration = state.config.interview_duration();
    let saved = modify_interview(&state.db, interview.id, |iv| {
        iv.submit_answer(record, Utc::now(), duration)
    })
    .await?;

    info!(
        "Interview {}: answer to Q{} scored {}/{}",
        interview.id,
        saved.question_index + 1,
        saved.score,
        saved.max_score
    );

    Ok(Json(saved))
}

/// POST /api/v1/interview/next
pub async fn handle_next(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<InterviewIdRequest>,
) -> Result<Json<NextQuestionResponse>, AppError> {
    let interview = get_interview(&state.db, request.interview_id).await?;
    interview.ensure_open(Utc::now(), state.config.interview_duration())?;

    let question = state
        .interviewer
        .next_question(&interview.role, &interview.level, &interview.questions)
        .await?;
    let question = usable_questions(vec![question])?.remove(0);

    let pushed = question.clone();
    let duration = state.config.interview_duration();
    let question_index = modify_interview(&state.db, interview.id, move |iv| {
        iv.ensure_open(Utc::now(), duration)?;
        iv.push_question(pushed)
    })
    .await?;

    Ok(Json(NextQuestionResponse {
        question,
        question_index,
    }))
}

/// GET /api/v1/interview/summary/:interview_id
///
/// Returns the stored summary of a finished interview, otherwise a fresh one.
pub async fn handle_summary(
    State(state): State<AppState>,
    Path(interview_id): Path<Uuid>,
) -> Result<Json<InterviewSummary>, AppError> {
    let interview = get_interview(&state.db, interview_id).await?;
    if let Some(summary) = stored_summary(&interview) {
        return Ok(Json(summary));
    }
    Ok(Json(summarize(state.interviewer.as_ref(), &interview).await?))
}

/// POST /api/v1/interview/finish
///
/// Idempotent: a second call returns the summary stored by the first.
pub async fn handle_finish(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<InterviewIdRequest>,
) -> Result<Json<InterviewSummary>, AppError> {
    let interview = get_interview(&state.db, request.interview_id).await?;
    if let Some(summary) = stored_summary(&interview) {
        return Ok(Json(summary));
    }

    let summary = summarize(state.interviewer.as_ref(), &interview).await?;
    let summary = modify_interview(&state.db, interview.id, |iv| Ok(iv.finish(summary))).await?;

    info!(
        "Interview {} finished: {} answers, overall {}/10",
        interview.id,
        interview.answers.len(),
        summary.overall_score
    );

    Ok(Json(summary))
}

/// GET /api/v1/interview/:interview_id
pub async fn handle_get_interview(
    State(state): State<AppState>,
    Path(interview_id): Path<Uuid>,
) -> Result<Json<InterviewDetailResponse>, AppError> {
    let interview = get_interview(&state.db, interview_id).await?;
    let remaining_secs = if interview.finished {
        0
    } else {
        interview.remaining_secs(Utc::now(), state.config.interview_duration())
    };
    Ok(Json(InterviewDetailResponse {
        interview,
        remaining_secs,
    }))
}

/// The summary written by `finish`, if the interview has one.
fn stored_summary(interview: &Interview) -> Option<InterviewSummary> {
    interview
        .summary
        .clone()
        .filter(|_| interview.finished)
}

/// Zero answers need no backend call.
async fn summarize(
    interviewer: &dyn Interviewer,
    interview: &Interview,
) -> Result<InterviewSummary, AppError> {
    let answers = interview.answers_in_order();
    if answers.is_empty() {
        return Ok(InterviewSummary::unanswered());
    }
    let summary = interviewer
        .summarize(&interview.role, &interview.level, &answers)
        .await?;
    Ok(summary.normalized())
}
