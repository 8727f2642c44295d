// Mock interview: question generation, answer scoring and session summary.
// All LLM calls go through llm_client via the Interviewer trait.

pub mod handlers;
pub mod interviewer;
pub mod models;
pub mod prompts;
pub mod session;
pub mod store;
