//! The interview record and the rules for changing it.
//!
//! Lifecycle: created with its opening questions, then questions and answers
//! are appended until the interview is finished or its time runs out.
//! Nothing is ever removed or rewritten.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::models::{AnswerRecord, InterviewSummary, Question};
use crate::models::interview::InterviewRow;

pub const DEFAULT_LEVEL: &str = "intermediate";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
    pub id: Uuid,
    pub role: String,
    pub level: String,
    pub questions: Vec<Question>,
    pub answers: Vec<AnswerRecord>,
    pub finished: bool,
    pub summary: Option<InterviewSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<InterviewRow> for Interview {
    fn from(row: InterviewRow) -> Self {
        Self {
            id: row.id,
            role: row.role,
            level: row.level,
            questions: row.questions.0,
            answers: row.answers.0,
            finished: row.finished,
            summary: row.summary.map(|s| s.0),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl Interview {
    pub fn deadline(&self, duration: Duration) -> DateTime<Utc> {
        self.created_at + duration
    }

    pub fn is_expired(&self, now: DateTime<Utc>, duration: Duration) -> bool {
        now >= self.deadline(duration)
    }

    /// Seconds left on the session clock, never negative.
    pub fn remaining_secs(&self, now: DateTime<Utc>, duration: Duration) -> i64 {
        (self.deadline(duration) - now).num_seconds().max(0)
    }

    /// Rejects work on an interview that is finished or out of time.
    pub fn ensure_open(&self, now: DateTime<Utc>, duration: Duration) -> Result<(), AppError> {
        if self.finished || self.is_expired(now, duration) {
            return Err(already_finished());
        }
        Ok(())
    }

    pub fn question(&self, index: usize) -> Result<&Question, AppError> {
        self.questions.get(index).ok_or_else(|| {
            AppError::Validation(format!(
                "Question index {index} was never asked (interview has {} questions)",
                self.questions.len()
            ))
        })
    }

    pub fn is_answered(&self, index: usize) -> bool {
        self.answers.iter().any(|a| a.question_index == index)
    }

    /// Checks that an answer for `index` could be recorded right now,
    /// and returns the asked question.
    pub fn answerable(&self, index: usize) -> Result<&Question, AppError> {
        if self.finished {
            return Err(already_finished());
        }
        let question = self.question(index)?;
        if self.is_answered(index) {
            return Err(AppError::Validation(format!(
                "Question {index} has already been answered"
            )));
        }
        Ok(question)
    }

    /// Appends an answer. The stored question text always comes from the
    /// asked question, not from the caller.
    pub fn record_answer(&mut self, mut record: AnswerRecord) -> Result<AnswerRecord, AppError> {
        let question = self.answerable(record.question_index)?;
        record.question_text = question.text.clone();
        self.answers.push(record.clone());
        Ok(record)
    }

    /// Records an answer only while the session clock is still running.
    /// Scoring can take long enough for the deadline to pass in between.
    pub fn submit_answer(
        &mut self,
        record: AnswerRecord,
        now: DateTime<Utc>,
        duration: Duration,
    ) -> Result<AnswerRecord, AppError> {
        self.ensure_open(now, duration)?;
        self.record_answer(record)
    }

    /// Appends a question and returns its index.
    pub fn push_question(&mut self, question: Question) -> Result<usize, AppError> {
        if self.finished {
            return Err(already_finished());
        }
        self.questions.push(question);
        Ok(self.questions.len() - 1)
    }

    /// Answers sorted by the question they belong to.
    pub fn answers_in_order(&self) -> Vec<AnswerRecord> {
        let mut answers = self.answers.clone();
        answers.sort_by_key(|a| a.question_index);
        answers
    }

    /// Marks the interview finished. If a summary was already stored it wins
    /// and is returned unchanged.
    pub fn finish(&mut self, summary: InterviewSummary) -> InterviewSummary {
        self.finished = true;
        self.summary.get_or_insert(summary).clone()
    }
}

/// Trims the requested level, falling back to the default for blank input.
pub fn normalize_level(level: Option<&str>) -> String {
    level
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(DEFAULT_LEVEL)
        .to_string()
}

/// Drops blank questions produced by a backend. Fails if nothing usable is left.
pub fn usable_questions(questions: Vec<Question>) -> Result<Vec<Question>, AppError> {
    let questions: Vec<Question> = questions
        .into_iter()
        .map(|q| Question::new(q.text.trim()))
        .filter(|q| !q.text.is_empty())
        .collect();
    if questions.is_empty() {
        return Err(AppError::Llm(
            "Interviewer produced no usable questions".to_string(),
        ));
    }
    Ok(questions)
}

pub fn not_found() -> AppError {
    AppError::NotFound("Interview not found".to_string())
}

fn already_finished() -> AppError {
    AppError::Validation("Interview already finished".to_string())
}
