// Cross-cutting prompt fragments for the model gateway.
// Per-feature prompt templates live next to the feature (see analysis::prompt).

/// System prompt for job fact-checking; enforces JSON-only output.
pub const FACT_CHECK_SYSTEM: &str =
    "You are a job verification expert. Analyze the job posting and provide \
    detailed insights with explanations. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";
