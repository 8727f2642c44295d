// Mock-interview LLM prompt templates.
// All prompts for the interview module are defined here.

use crate::interview::models::{AnswerRecord, Question};

pub const INTERVIEW_SYSTEM_PREAMBLE: &str = "You are an interview assistant.";

pub const OPENING_SCHEMA: &str = r#"The JSON must be: { "questions": [ { "text": "..." } ] }"#;

pub const NEXT_SCHEMA: &str = r#"The JSON must be: { "question": { "text": "..." } }"#;

pub const PROMPT_DESCRIBED_SCHEMA: &str = "The JSON structure is exactly as described in the prompt.";

pub const OPENING_PROMPT: &str =
    r#"Generate one interview question for job role "{role}" at "{level}" level."#;

pub const NEXT_PROMPT: &str = r#"Generate another interview question for job role "{role}" at "{level}" level.

Questions already asked (do not repeat them):
{asked}"#;

pub const EVALUATE_PROMPT: &str = r#"
Role: {role}
Level: {level}
Question: {question}
Candidate answer: {answer}

Evaluate the answer on correctness, depth, clarity, and communication.
Return JSON with:
{
  "score": number (0-10),
  "maxScore": 10,
  "strengths": string[],
  "improvements": string[],
  "shortFeedback": string
}
"#;

pub const SUMMARY_PROMPT: &str = r#"
Give an overall summary for this mock interview.

Role: {role}
Level: {level}

Questions and answers with scores:
{transcript}

Return JSON:
{
  "overallScore": number (0-10),
  "overallComment": string,
  "strengths": string[],
  "weaknesses": string[],
  "improvementPlan": string[]
}
"#;

pub fn opening_prompt(role: &str, level: &str) -> String {
    fill(OPENING_PROMPT, &[("role", role), ("level", level)])
}

pub fn next_prompt(role: &str, level: &str, asked: &[Question]) -> String {
    let asked = if asked.is_empty() {
        "(none)".to_string()
    } else {
        asked
            .iter()
            .enumerate()
            .map(|(i, q)| format!("{}. {}", i + 1, q.text))
            .collect::<Vec<_>>()
            .join("\n")
    };
    fill(
        NEXT_PROMPT,
        &[("role", role), ("level", level), ("asked", asked.as_str())],
    )
}

pub fn evaluate_prompt(role: &str, level: &str, question: &str, answer: &str) -> String {
    fill(
        EVALUATE_PROMPT,
        &[
            ("role", role),
            ("level", level),
            ("question", question),
            ("answer", answer),
        ],
    )
}

/// Expects `answers` already sorted by question index.
pub fn summary_prompt(role: &str, level: &str, answers: &[AnswerRecord]) -> String {
    let transcript = render_transcript(answers);
    fill(
        SUMMARY_PROMPT,
        &[("role", role), ("level", level), ("transcript", transcript.as_str())],
    )
}

/// Replaces `{name}` placeholders in a single scan of the template, so
/// inserted values are never scanned again. Unknown `{...}` text is kept.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value, close))
        });
        match value {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn render_transcript(answers: &[AnswerRecord]) -> String {
    answers
        .iter()
        .map(|a| {
            format!(
                "Q{}: {}\nAnswer: {}\nScore: {}/{}\n",
                a.question_index + 1,
                a.question_text,
                a.answer_text,
                a.score,
                a.max_score
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::models::Evaluation;

    #[test]
    fn test_opening_prompt_fills_role_and_level() {
        let prompt = opening_prompt("React Developer", "Junior");
        assert_eq!(
            prompt,
            r#"Generate one interview question for job role "React Developer" at "Junior" level."#
        );
    }

    #[test]
    fn test_next_prompt_lists_asked_questions() {
        let prompt = next_prompt(
            "SRE",
            "Senior",
            &[Question::new("What is an SLO?"), Question::new("Describe an outage.")],
        );
        assert!(prompt.contains("1. What is an SLO?"));
        assert!(prompt.contains("2. Describe an outage."));
        assert!(!prompt.contains("{asked}"));
    }

    #[test]
    fn test_placeholders_in_values_stay_literal() {
        let prompt = evaluate_prompt("{answer} engineer", "{level}", "Why {role}?", "my answer");
        assert!(prompt.contains("Role: {answer} engineer\n"));
        assert!(prompt.contains("Level: {level}\n"));
        assert!(prompt.contains("Question: Why {role}?\n"));
        assert!(prompt.contains("Candidate answer: my answer\n"));
    }

    #[test]
    fn test_fill_keeps_json_braces() {
        let prompt = evaluate_prompt("SRE", "Senior", "Q", "A");
        assert!(prompt.contains("\"maxScore\": 10,"));
        assert!(prompt.contains("Return JSON with:\n{\n"));
        assert_eq!(fill("{a}{b} {x} {", &[("a", "1"), ("b", "2")]), "12 {x} {");
    }

    #[test]
    fn test_summary_transcript_numbers_from_one() {
        let answers = vec![
            AnswerRecord::new(
                0,
                "Q zero".into(),
                "A zero".into(),
                Evaluation {
                    score: 7.0,
                    max_score: 10.0,
                    ..Default::default()
                },
            ),
            AnswerRecord::new(
                1,
                "Q one".into(),
                "A one".into(),
                Evaluation {
                    score: 4.5,
                    max_score: 10.0,
                    ..Default::default()
                },
            ),
        ];
        let prompt = summary_prompt("Data Analyst", "Mid", &answers);
        let q1 = prompt.find("Q1: Q zero").unwrap();
        let q2 = prompt.find("Q2: Q one").unwrap();
        assert!(q1 < q2);
        assert!(prompt.contains("Score: 7/10"));
        assert!(prompt.contains("Score: 4.5/10"));
    }
}
