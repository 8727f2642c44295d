// Shared prompt fragments.
// Each feature that needs LLM calls defines its own prompts.rs alongside it.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Joins a role-specific system preamble with the JSON-only rules and the
/// schema the caller expects back.
pub fn json_system(preamble: &str, schema_description: &str) -> String {
    format!("{preamble} {JSON_ONLY_SYSTEM} {schema_description}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_system_keeps_all_parts_in_order() {
        let system = json_system("You are an interview assistant.", "Schema: {}");
        assert!(system.starts_with("You are an interview assistant."));
        assert!(system.contains("valid JSON only"));
        assert!(system.ends_with("Schema: {}"));
    }
}
