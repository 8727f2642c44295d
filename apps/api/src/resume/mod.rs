// Resume ATS analysis: text extraction and LLM scoring.

pub mod analyzer;
pub mod extract;
pub mod handlers;
pub mod prompts;
pub mod report;
