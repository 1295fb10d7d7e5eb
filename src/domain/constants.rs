/// IR format version written by this compiler.
pub const CURRENT_IR_VERSION: &str = "1";

pub const PROMPT_IR_SCHEMA_ID: &str = "https://promptforge.dev/schemas/prompt-ir.schema.json";

pub const PLAN_DIR: &str = "promptforge";
pub const PLAN_FILE: &str = "plan.md";
pub const IR_FILE: &str = "prompt.ir.json";
pub const SCHEMA_FILE: &str = "prompt.ir.schema.json";
pub const EXPLAIN_FILE: &str = "prompt.ir.explain.json";
pub const CONFIG_FILE: &str = "promptforge.toml";

pub const GENERIC_SYSTEM_ROLE: &str =
    "You are a deterministic assistant that follows strict rules and schemas.";
pub const SYSTEM_ROLE_PREFIX: &str = "You are an assistant designed to:";
pub const SYSTEM_ROLE_COMPLIANCE: &str =
    "You must follow all specified rules and constraints strictly.";

pub const PLACEHOLDER_SCHEMA_TYPE: &str = "object";

/// `(id, description)`
pub const BASELINE_RULES: &[(&str, &str)] = &[
    ("output-json", "Output must be valid JSON"),
    (
        "no-explanations",
        "Do not include explanations unless explicitly requested",
    ),
    (
        "no-inference",
        "Do not infer missing values - fail if required data is missing",
    ),
    (
        "fail-ambiguity",
        "Fail on ambiguity - request clarification if intent is unclear",
    ),
];

/// `(id, condition, response)`
pub const BASELINE_FAILURE_MODES: &[(&str, &str, &str)] = &[
    (
        "invalid-input",
        "Input does not match input_schema",
        "Return error indicating schema validation failure",
    ),
    (
        "ambiguous-request",
        "Request cannot be unambiguously interpreted",
        "Return error indicating ambiguity and request clarification",
    ),
    (
        "missing-required",
        "Required fields are missing from input",
        "Return error listing missing required fields",
    ),
];

/// Articles, modal verbs and connectors that never make it into an identifier.
pub const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "is", "are", "must", "should", "can", "will", "be", "to", "of", "not",
    "only",
];

/// Verbs that carry no meaning in "does not handle X" style scope items.
pub const SCOPE_FILLER_WORDS: &[&str] = &["handle", "support", "debug"];

pub const VAGUE_TERMS: &[&str] = &["etc", "misc", "various", "stuff", "things"];

pub const MIN_GOAL_CHARS: usize = 15;
pub const MIN_GOAL_WORDS: usize = 3;

/// Suffix attempts before an identifier falls back to its positional form.
pub const MAX_SUFFIX_ATTEMPTS: usize = 1000;
