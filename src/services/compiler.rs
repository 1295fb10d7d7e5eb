//! Plan → PromptIR compilation.
//!
//! Both entry points go through [`assemble`], which pairs every emitted rule
//! and failure mode with its [`Source`]. The IR and the explain report are
//! projections of that one list, so they cannot drift apart.

use crate::domain::constants::{
    BASELINE_FAILURE_MODES, BASELINE_RULES, CURRENT_IR_VERSION, GENERIC_SYSTEM_ROLE,
    PLACEHOLDER_SCHEMA_TYPE, SYSTEM_ROLE_COMPLIANCE, SYSTEM_ROLE_PREFIX,
};
use crate::domain::models::{
    ExplainFailureMode, ExplainProperty, ExplainReport, ExplainRule, ExplainSchema, FailureMode,
    Plan, PlanItem, PromptIR, Property, Rule, Schema, SectionKind, Source, Traced,
};
use crate::error::StructuralError;
use crate::services::parser::parse_plan;
use crate::services::slug::{IdAllocator, IdKind};

struct Assembly {
    system_role: (String, Source),
    rules: Vec<(Rule, Source)>,
    failure_modes: Vec<(FailureMode, Source)>,
    input_schema: Schema,
    output_schema: Schema,
}

impl Assembly {
    fn to_ir(&self) -> PromptIR {
        PromptIR {
            version: CURRENT_IR_VERSION.to_string(),
            system_role: self.system_role.0.clone(),
            rules: self.rules.iter().map(|(r, _)| r.clone()).collect(),
            input_schema: self.input_schema.clone(),
            output_schema: self.output_schema.clone(),
            failure_modes: self.failure_modes.iter().map(|(f, _)| f.clone()).collect(),
        }
    }

    fn to_explain(&self) -> ExplainReport {
        let baseline = Source::baseline();
        let (role, role_source) = &self.system_role;
        ExplainReport {
            version: Traced::new(CURRENT_IR_VERSION.to_string(), &baseline),
            system_role: Traced::new(role.clone(), role_source),
            rules: self
                .rules
                .iter()
                .map(|(r, src)| ExplainRule {
                    id: Traced::new(r.id.clone(), src),
                    description: Traced::new(r.description.clone(), src),
                    condition: r.condition.clone().map(|c| Traced::new(c, src)),
                })
                .collect(),
            input_schema: explain_schema(&self.input_schema, &baseline),
            output_schema: explain_schema(&self.output_schema, &baseline),
            failure_modes: self
                .failure_modes
                .iter()
                .map(|(f, src)| ExplainFailureMode {
                    id: Traced::new(f.id.clone(), src),
                    condition: Traced::new(f.condition.clone(), src),
                    response: Traced::new(f.response.clone(), src),
                })
                .collect(),
        }
    }
}

pub fn compile(source: &str) -> Result<PromptIR, StructuralError> {
    let plan = parse_plan(source)?;
    Ok(assemble(&plan).to_ir())
}

pub fn compile_with_explain(source: &str) -> Result<(PromptIR, ExplainReport), StructuralError> {
    let plan = parse_plan(source)?;
    let assembly = assemble(&plan);
    Ok((assembly.to_ir(), assembly.to_explain()))
}

pub fn system_role(goal: &str) -> String {
    let goal = goal.trim();
    if goal.is_empty() {
        return GENERIC_SYSTEM_ROLE.to_string();
    }
    let mut goal = capitalize_ascii(goal);
    if !goal.ends_with(['.', '!', '?']) {
        goal.push('.');
    }
    format!("{SYSTEM_ROLE_PREFIX} {goal} {SYSTEM_ROLE_COMPLIANCE}")
}

fn capitalize_ascii(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => {
            first.to_ascii_uppercase().to_string() + chars.as_str()
        }
        _ => s.to_string(),
    }
}

fn assemble(plan: &Plan) -> Assembly {
    let baseline = Source::baseline();

    let mut rules: Vec<(Rule, Source)> = BASELINE_RULES
        .iter()
        .map(|&(id, description)| {
            let rule = Rule {
                id: id.to_string(),
                description: description.to_string(),
                condition: None,
            };
            (rule, baseline.clone())
        })
        .collect();
    let mut rule_ids = IdAllocator::with_reserved(BASELINE_RULES.iter().map(|(id, _)| *id));
    rules.extend(generated(&plan.constraints, SectionKind::Constraints, |text, index| {
        Rule {
            id: rule_ids.allocate(IdKind::Rule, text, index),
            description: text.to_string(),
            condition: None,
        }
    }));

    let mut failure_modes: Vec<(FailureMode, Source)> = BASELINE_FAILURE_MODES
        .iter()
        .map(|&(id, condition, response)| {
            let mode = FailureMode {
                id: id.to_string(),
                condition: condition.to_string(),
                response: response.to_string(),
            };
            (mode, baseline.clone())
        })
        .collect();
    let mut mode_ids =
        IdAllocator::with_reserved(BASELINE_FAILURE_MODES.iter().map(|(id, _, _)| *id));
    failure_modes.extend(generated(
        &plan.out_of_scope,
        SectionKind::OutOfScope,
        |text, index| FailureMode {
            id: mode_ids.allocate(IdKind::FailureMode, text, index),
            condition: format!("Request involves: {text}"),
            response: format!(
                "Return error indicating that {text} is out of scope and cannot be handled"
            ),
        },
    ));

    tracing::debug!(
        rules = rules.len(),
        failure_modes = failure_modes.len(),
        "assembled prompt IR"
    );

    Assembly {
        system_role: (
            system_role(&plan.goal),
            Source::plan(SectionKind::Goal, plan.goal_line),
        ),
        rules,
        failure_modes,
        input_schema: Schema::of_type(PLACEHOLDER_SCHEMA_TYPE),
        output_schema: Schema::of_type(PLACEHOLDER_SCHEMA_TYPE),
    }
}

/// Build one entry per non-empty item, in document order, passing the item's
/// position in its section.
fn generated<T>(
    items: &[PlanItem],
    section: SectionKind,
    mut build: impl FnMut(&str, usize) -> T,
) -> Vec<(T, Source)> {
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let text = item.text.trim();
            if text.is_empty() {
                return None;
            }
            Some((build(text, index), Source::plan(section, item.line)))
        })
        .collect()
}

fn explain_schema(schema: &Schema, source: &Source) -> ExplainSchema {
    ExplainSchema {
        kind: Traced::new(schema.kind.clone(), source),
        properties: schema
            .properties
            .iter()
            .map(|(name, p)| (name.clone(), explain_property(p, source)))
            .collect(),
        required: schema
            .required
            .iter()
            .map(|r| Traced::new(r.clone(), source))
            .collect(),
        items: schema
            .items
            .as_deref()
            .map(|s| Box::new(explain_schema(s, source))),
    }
}

fn explain_property(property: &Property, source: &Source) -> ExplainProperty {
    ExplainProperty {
        kind: Traced::new(property.kind.clone(), source),
        description: property
            .description
            .clone()
            .map(|d| Traced::new(d, source)),
        allowed: property
            .allowed
            .iter()
            .map(|v| Traced::new(v.clone(), source))
            .collect(),
        properties: property
            .properties
            .iter()
            .map(|(name, p)| (name.clone(), explain_property(p, source)))
            .collect(),
        items: property
            .items
            .as_deref()
            .map(|s| Box::new(explain_schema(s, source))),
    }
}
