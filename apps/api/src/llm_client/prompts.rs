// Shared prompt fragments for every completion call.
// Task-specific prompts live next to the module that uses them (see labeling::prompts).

/// System prompt line that enforces JSON-only output. Pairs with the
/// `json_object` response format requested by `LlmClient`.
pub const JSON_ONLY_RULE: &str =
    "You must output ONLY valid JSON. Do not include explanations, markdown, or extra text.";
