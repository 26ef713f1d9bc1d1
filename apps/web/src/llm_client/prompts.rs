// Shared prompt fragments.
// Each feature that needs LLM calls defines its own prompts.rs alongside it.

/// Instruction appended to every prompt that expects a JSON document back.
pub const JSON_ONLY_INSTRUCTION: &str = "\
Respond strictly in the specified JSON format only. \
Do NOT wrap the output in markdown such as ```json fences. \
Do NOT include any text outside the JSON object.";
