use crate::domain::models::PromptIR;
use crate::error::ValidationError;
use indexmap::IndexSet;

fn blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Check an IR against its structural invariants, stopping at the first
/// violation. Every write of `prompt.ir.json` goes through this gate.
pub fn validate_ir(ir: Option<&PromptIR>) -> Result<(), ValidationError> {
    let ir = ir.ok_or(ValidationError::Absent)?;

    if blank(&ir.system_role) {
        return Err(ValidationError::EmptySystemRole);
    }
    if ir.rules.is_empty() {
        return Err(ValidationError::EmptyRules);
    }
    for (index, rule) in ir.rules.iter().enumerate() {
        if blank(&rule.id) {
            return Err(ValidationError::RuleMissingId { index });
        }
        if blank(&rule.description) {
            return Err(ValidationError::RuleMissingDescription { index });
        }
    }
    if blank(&ir.input_schema.kind) {
        return Err(ValidationError::EmptyInputSchemaType);
    }
    if blank(&ir.output_schema.kind) {
        return Err(ValidationError::EmptyOutputSchemaType);
    }
    if ir.failure_modes.is_empty() {
        return Err(ValidationError::EmptyFailureModes);
    }
    for (index, mode) in ir.failure_modes.iter().enumerate() {
        if blank(&mode.id) {
            return Err(ValidationError::FailureModeMissingId { index });
        }
        if blank(&mode.condition) {
            return Err(ValidationError::FailureModeMissingCondition { index });
        }
        if blank(&mode.response) {
            return Err(ValidationError::FailureModeMissingResponse { index });
        }
    }

    let mut seen = IndexSet::new();
    for (index, rule) in ir.rules.iter().enumerate() {
        if !seen.insert(rule.id.as_str()) {
            return Err(ValidationError::DuplicateRuleId {
                index,
                id: rule.id.clone(),
            });
        }
    }
    seen.clear();
    for (index, mode) in ir.failure_modes.iter().enumerate() {
        if !seen.insert(mode.id.as_str()) {
            return Err(ValidationError::DuplicateFailureModeId {
                index,
                id: mode.id.clone(),
            });
        }
    }
    Ok(())
}
