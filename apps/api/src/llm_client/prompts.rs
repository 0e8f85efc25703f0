// Cross-cutting prompt fragments shared by every LLM-backed feature.
// Feature-specific prompts live next to the feature (see matching/prompts.rs).

/// System prompt that asks for machine-readable output only.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    Respond with valid JSON only. \
    Do NOT include any text before or after the JSON. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Persona prepended to recruiting-related prompts.
pub const RECRUITER_PERSONA: &str = "You are an experienced technical recruiter who \
    matches candidates to job postings strictly on the stated criteria.";
