use serde::{Deserialize, Serialize};

/// Scores are out of this unless the evaluator says otherwise.
pub const DEFAULT_MAX_SCORE: f64 = 10.0;

fn default_max_score() -> f64 {
    DEFAULT_MAX_SCORE
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
}

impl Question {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Raw evaluation of a single answer as produced by an interviewer backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    #[serde(default)]
    pub score: f64,
    #[serde(default = "default_max_score")]
    pub max_score: f64,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
    #[serde(default)]
    pub short_feedback: String,
}

impl Evaluation {
    /// Brings model output into range: `max_score` positive, `score` in `0..=max_score`,
    /// no blank list entries.
    pub fn normalized(self) -> Self {
        let max_score = if self.max_score.is_finite() && self.max_score > 0.0 {
            self.max_score
        } else {
            DEFAULT_MAX_SCORE
        };
        Self {
            score: clamp_score(self.score, max_score),
            max_score,
            strengths: clean_list(self.strengths),
            improvements: clean_list(self.improvements),
            short_feedback: self.short_feedback.trim().to_string(),
        }
    }
}

/// One answered question, stored in the order answers arrive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub question_index: usize,
    pub question_text: String,
    pub answer_text: String,
    pub score: f64,
    pub max_score: f64,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub short_feedback: String,
}

impl AnswerRecord {
    pub fn new(
        question_index: usize,
        question_text: String,
        answer_text: String,
        evaluation: Evaluation,
    ) -> Self {
        let evaluation = evaluation.normalized();
        Self {
            question_index,
            question_text,
            answer_text,
            score: evaluation.score,
            max_score: evaluation.max_score,
            strengths: evaluation.strengths,
            improvements: evaluation.improvements,
            short_feedback: evaluation.short_feedback,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewSummary {
    #[serde(default)]
    pub overall_score: f64,
    #[serde(default)]
    pub overall_comment: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub improvement_plan: Vec<String>,
}

impl InterviewSummary {
    /// Summary for a session in which nothing was answered.
    pub fn unanswered() -> Self {
        Self {
            overall_score: 0.0,
            overall_comment: "No questions were answered in this interview.".to_string(),
            strengths: vec![],
            weaknesses: vec![],
            improvement_plan: vec![
                "Answer at least one question to receive feedback.".to_string(),
            ],
        }
    }

    pub fn normalized(self) -> Self {
        Self {
            overall_score: clamp_score(self.overall_score, DEFAULT_MAX_SCORE),
            overall_comment: self.overall_comment.trim().to_string(),
            strengths: clean_list(self.strengths),
            weaknesses: clean_list(self.weaknesses),
            improvement_plan: clean_list(self.improvement_plan),
        }
    }
}

fn clamp_score(score: f64, max: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, max)
    } else {
        0.0
    }
}

pub(crate) fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
