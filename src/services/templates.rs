use crate::domain::models::{SectionKind, TemplateInfo};
use crate::error::{ForgeError, Result};
use crate::services::document::Document;

pub struct Template {
    pub name: &'static str,
    pub description: &'static str,
    pub plan: &'static str,
}

impl Template {
    pub fn info(&self) -> TemplateInfo {
        TemplateInfo {
            name: self.name.to_string(),
            description: self.description.to_string(),
        }
    }
}

pub const BLANK_PLAN: &str = "# Prompt Plan

## Goal
<!-- Describe what the assistant must accomplish in one or two sentences. -->

## Constraints
<!-- One rule per line, for example: - Output must be valid JSON -->

## Out of Scope
<!-- Requests the assistant must refuse, for example: - Does not handle payments -->
";

const REGISTRY: &[Template] = &[
    Template {
        name: "api-guardrails",
        description: "API assistant with strict input/output and error handling",
        plan: "# Prompt Plan

## Goal
Design a reliable API assistant that validates inputs and returns structured JSON responses.

## Constraints
- Output must be valid JSON
- Validate all required fields
- Reject ambiguous requests with a clear error

## Out of Scope
- Payments
- Authentication flows
",
    },
    Template {
        name: "data-extraction",
        description: "Extract structured fields from unstructured text",
        plan: "# Prompt Plan

## Goal
Extract structured fields from unstructured text into a strict JSON schema.

## Constraints
- Do not infer missing values
- Return a validation error if required fields are missing
- Preserve original wording in extracted fields

## Out of Scope
- Summarization beyond field extraction
- Rewriting or paraphrasing the input
",
    },
    Template {
        name: "code-review",
        description: "Review code for correctness, security, and tests",
        plan: "# Prompt Plan

## Goal
Provide a concise, high-signal code review focused on correctness, security, and tests.

## Constraints
- Prioritize critical issues over style
- Provide actionable remediation steps
- Call out missing tests

## Out of Scope
- Large refactors without a clear bug
- Formatting-only feedback
",
    },
];

pub fn list() -> &'static [Template] {
    REGISTRY
}

pub fn get(name: &str) -> Result<&'static Template> {
    REGISTRY
        .iter()
        .find(|t| t.name == name)
        .ok_or_else(|| ForgeError::UnknownTemplate(name.to_string()))
}

/// Plan text for `init`: the named template (or the blank plan) with the
/// Goal body replaced by `description` when one is given.
pub fn render_plan(template: Option<&str>, description: Option<&str>) -> Result<String> {
    let base = match template {
        Some(name) => get(name)?.plan,
        None => BLANK_PLAN,
    };
    let description = description.map(str::trim).filter(|d| !d.is_empty());
    let Some(description) = description else {
        return Ok(base.to_string());
    };
    let doc = Document::parse(base);
    Ok(match doc.section(SectionKind::Goal) {
        Some(range) => doc.replace_body(&range, description),
        None => base.to_string(),
    })
}
