//! Interviewer: pluggable backend that asks questions, scores answers and
//! summarises a session.
//!
//! `LlmInterviewer` is used whenever an LLM provider is configured.
//! `OfflineInterviewer` is deterministic and needs no network, so the flow
//! still works without an API key.
//!
//! `AppState` holds an `Arc<dyn Interviewer>`, picked at startup from config.

use async_trait::async_trait;
use serde::Deserialize;

use crate::errors::AppError;
use crate::interview::models::{AnswerRecord, Evaluation, InterviewSummary, Question};
use crate::interview::prompts::{
    evaluate_prompt, next_prompt, opening_prompt, summary_prompt, INTERVIEW_SYSTEM_PREAMBLE,
    NEXT_SCHEMA, OPENING_SCHEMA, PROMPT_DESCRIBED_SCHEMA,
};
use crate::llm_client::prompts::json_system;
use crate::llm_client::LlmClient;

#[async_trait]
pub trait Interviewer: Send + Sync {
    /// Questions to open the interview with. Never empty on success.
    async fn opening_questions(&self, role: &str, level: &str) -> Result<Vec<Question>, AppError>;

    async fn next_question(
        &self,
        role: &str,
        level: &str,
        asked: &[Question],
    ) -> Result<Question, AppError>;

    async fn evaluate(
        &self,
        role: &str,
        level: &str,
        question: &str,
        answer: &str,
    ) -> Result<Evaluation, AppError>;

    /// `answers` are sorted by question index and never empty.
    async fn summarize(
        &self,
        role: &str,
        level: &str,
        answers: &[AnswerRecord],
    ) -> Result<InterviewSummary, AppError>;

    /// "llm" or "offline", for logs and the health endpoint.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmInterviewer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct OpeningQuestions {
    #[serde(default)]
    questions: Vec<Question>,
}

#[derive(Debug, Deserialize)]
struct NextQuestion {
    question: Question,
}

pub struct LlmInterviewer(pub LlmClient);

#[async_trait]
impl Interviewer for LlmInterviewer {
    async fn opening_questions(&self, role: &str, level: &str) -> Result<Vec<Question>, AppError> {
        let system = json_system(INTERVIEW_SYSTEM_PREAMBLE, OPENING_SCHEMA);
        let out: OpeningQuestions = self
            .0
            .call_json(&opening_prompt(role, level), &system)
            .await
            .map_err(|e| AppError::Llm(format!("Failed to start interview: {e}")))?;
        Ok(out.questions)
    }

    async fn next_question(
        &self,
        role: &str,
        level: &str,
        asked: &[Question],
    ) -> Result<Question, AppError> {
        let system = json_system(INTERVIEW_SYSTEM_PREAMBLE, NEXT_SCHEMA);
        let out: NextQuestion = self
            .0
            .call_json(&next_prompt(role, level, asked), &system)
            .await
            .map_err(|e| AppError::Llm(format!("Failed to get next question: {e}")))?;
        Ok(out.question)
    }

    async fn evaluate(
        &self,
        role: &str,
        level: &str,
        question: &str,
        answer: &str,
    ) -> Result<Evaluation, AppError> {
        let system = json_system(INTERVIEW_SYSTEM_PREAMBLE, PROMPT_DESCRIBED_SCHEMA);
        self.0
            .call_json(&evaluate_prompt(role, level, question, answer), &system)
            .await
            .map_err(|e| AppError::Llm(format!("Failed to evaluate answer: {e}")))
    }

    async fn summarize(
        &self,
        role: &str,
        level: &str,
        answers: &[AnswerRecord],
    ) -> Result<InterviewSummary, AppError> {
        let system = json_system(INTERVIEW_SYSTEM_PREAMBLE, PROMPT_DESCRIBED_SCHEMA);
        self.0
            .call_json(&summary_prompt(role, level, answers), &system)
            .await
            .map_err(|e| AppError::Llm(format!("Failed to generate summary: {e}")))
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// OfflineInterviewer
// ────────────────────────────────────────────────────────────────────────────

const QUESTION_BANK: &[&str] = &[
    "Tell me about a challenging technical problem you solved.",
    "Describe a time you worked on a team and had to handle conflict.",
    "How do you prioritize tasks when you have multiple deadlines?",
    "Explain a recent project where you had to learn a new technology quickly.",
    "Why are you interested in this role and how does your background fit?",
];

/// Deterministic interviewer with a fixed question bank and a length-based score.
pub struct OfflineInterviewer;

impl OfflineInterviewer {
    /// 3 points for answering, up to 7 more at one point per ten words.
    fn heuristic_score(answer: &str) -> f64 {
        let words = answer.split_whitespace().count();
        let length_score = (words / 10).min(7);
        (length_score + 3).max(3) as f64
    }
}

#[async_trait]
impl Interviewer for OfflineInterviewer {
    async fn opening_questions(&self, role: &str, _level: &str) -> Result<Vec<Question>, AppError> {
        Ok(vec![Question::new(format!(
            "What about your experience makes you a strong fit for the {role} role?"
        ))])
    }

    async fn next_question(
        &self,
        _role: &str,
        _level: &str,
        asked: &[Question],
    ) -> Result<Question, AppError> {
        // The opener is role-specific, so the bank starts with the second question.
        let idx = asked.len().saturating_sub(1).min(QUESTION_BANK.len() - 1);
        Ok(Question::new(QUESTION_BANK[idx]))
    }

    async fn evaluate(
        &self,
        _role: &str,
        _level: &str,
        _question: &str,
        answer: &str,
    ) -> Result<Evaluation, AppError> {
        let score = Self::heuristic_score(answer);
        let mut strengths = vec!["Answered the question directly.".to_string()];
        if score >= 7.0 {
            strengths.push("Gave a detailed answer.".to_string());
        }
        Ok(Evaluation {
            score,
            max_score: 10.0,
            strengths,
            improvements: vec![
                "Mention concrete metrics and outcomes.".to_string(),
                "Explain your exact contribution.".to_string(),
            ],
            short_feedback: "Good structure; expand on specifics and examples.".to_string(),
        })
    }

    async fn summarize(
        &self,
        _role: &str,
        _level: &str,
        answers: &[AnswerRecord],
    ) -> Result<InterviewSummary, AppError> {
        if answers.is_empty() {
            return Ok(InterviewSummary::unanswered());
        }
        // Rescale each answer to /10 before averaging.
        let total: f64 = answers
            .iter()
            .map(|a| a.score / a.max_score * 10.0)
            .sum();
        let mean = (total / answers.len() as f64 * 10.0).round() / 10.0;

        let overall_comment = if mean >= 7.0 {
            "Strong performance with well-developed answers."
        } else if mean >= 5.0 {
            "Solid foundation; answers would benefit from more depth."
        } else {
            "Answers were brief; practice giving fuller, structured responses."
        };

        Ok(InterviewSummary {
            overall_score: mean,
            overall_comment: overall_comment.to_string(),
            strengths: vec![format!("Answered {} question(s).", answers.len())],
            weaknesses: if mean < 7.0 {
                vec!["Limited detail and supporting examples.".to_string()]
            } else {
                vec![]
            },
            improvement_plan: vec![
                "Use the STAR method (Situation, Task, Action, Result).".to_string(),
                "Quantify results wherever possible.".to_string(),
            ],
        })
    }

    fn backend(&self) -> &'static str {
        "offline"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[tokio::test]
    async fn test_offline_opener_mentions_role() {
        let qs = OfflineInterviewer
            .opening_questions("React Developer", "Junior")
            .await
            .unwrap();
        assert_eq!(qs.len(), 1);
        assert!(qs[0].text.contains("React Developer role"));
    }

    #[tokio::test]
    async fn test_offline_next_walks_bank_then_sticks_at_last() {
        let mut asked = vec![Question::new("opener")];
        let second = OfflineInterviewer.next_question("r", "l", &asked).await.unwrap();
        assert_eq!(second.text, QUESTION_BANK[0]);

        asked.extend((0..10).map(|i| Question::new(format!("q{i}"))));
        let late = OfflineInterviewer.next_question("r", "l", &asked).await.unwrap();
        assert_eq!(late.text, QUESTION_BANK[QUESTION_BANK.len() - 1]);
    }

    #[test]
    fn test_heuristic_score_bounds() {
        assert_eq!(OfflineInterviewer::heuristic_score(""), 3.0);
        assert_eq!(OfflineInterviewer::heuristic_score(&words(9)), 3.0);
        assert_eq!(OfflineInterviewer::heuristic_score(&words(25)), 5.0);
        assert_eq!(OfflineInterviewer::heuristic_score(&words(500)), 10.0);
    }

    #[tokio::test]
    async fn test_offline_summary_averages_scores() {
        let answers: Vec<AnswerRecord> = [6.0, 8.0, 7.0]
            .iter()
            .enumerate()
            .map(|(i, s)| {
                AnswerRecord::new(
                    i,
                    format!("Q{i}"),
                    "answer".into(),
                    Evaluation {
                        score: *s,
                        max_score: 10.0,
                        ..Default::default()
                    },
                )
            })
            .collect();
        let summary = OfflineInterviewer.summarize("r", "l", &answers).await.unwrap();
        assert_eq!(summary.overall_score, 7.0);
        assert!(summary.weaknesses.is_empty());
        assert!(summary.strengths[0].contains("3 question"));
    }

    #[tokio::test]
    async fn test_offline_summary_rescales_other_max_scores() {
        let answers = vec![AnswerRecord::new(
            0,
            "Q".into(),
            "A".into(),
            Evaluation {
                score: 2.5,
                max_score: 5.0,
                ..Default::default()
            },
        )];
        let summary = OfflineInterviewer.summarize("r", "l", &answers).await.unwrap();
        assert_eq!(summary.overall_score, 5.0);
    }
}
