// Resume analysis LLM prompt templates.

pub const ATS_SYSTEM_PREAMBLE: &str = "You are an ATS resume evaluator.";

pub const ATS_SCHEMA: &str = "The JSON must contain exactly the keys shown in the prompt.";

pub const ATS_PROMPT: &str = r#"
You are an ATS resume evaluator.

Return ONLY valid JSON in this format:
{
  "atsScore": number (0-100),
  "strengths": string[],
  "weaknesses": string[],
  "improvements": string[],
  "missingKeywords": string[]
}

Evaluate the resume based on:
- ATS compatibility
- Skills relevance
- Experience clarity
- Missing keywords

Resume:
{resume_text}
"#;

pub fn ats_prompt(resume_text: &str) -> String {
    ATS_PROMPT.replace("{resume_text}", resume_text)
}
