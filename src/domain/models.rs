use crate::domain::constants::{EXPLAIN_FILE, IR_FILE, PLAN_DIR, PLAN_FILE, SCHEMA_FILE};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Serialize)]
pub struct JsonError {
    pub ok: bool,
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// The three sections a plan document is allowed to contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Goal,
    Constraints,
    OutOfScope,
}

impl SectionKind {
    pub const ALL: [SectionKind; 3] = [
        SectionKind::Goal,
        SectionKind::Constraints,
        SectionKind::OutOfScope,
    ];

    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Goal => "Goal",
            SectionKind::Constraints => "Constraints",
            SectionKind::OutOfScope => "Out of Scope",
        }
    }

    /// Case-insensitive match against a heading title.
    pub fn from_title(title: &str) -> Option<Self> {
        let wanted = title.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.title().to_lowercase() == wanted)
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanItem {
    pub text: String,
    /// 1-based line in the source document.
    pub line: usize,
}

/// Parsed plan document. Built once per compile and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub goal: String,
    pub goal_line: usize,
    pub constraints: Vec<PlanItem>,
    pub out_of_scope: Vec<PlanItem>,
}

/// The compiled prompt contract. This is the authoritative artifact.
///
/// Every field defaults on deserialization so that a partial file on disk
/// still loads and can be reported on by the validator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PromptIR {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub version: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub system_role: String,
    #[serde(default)]
    pub rules: Vec<Rule>,
    #[serde(default)]
    pub input_schema: Schema,
    #[serde(default)]
    pub output_schema: Schema,
    #[serde(default)]
    pub failure_modes: Vec<FailureMode>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rule {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FailureMode {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Property>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
}

impl Schema {
    pub fn of_type(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Property {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub allowed: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Property>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warn,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warn => f.write_str("warn"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: String,
    pub message: String,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditIssue {
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Baseline,
    Plan,
}

/// Where an emitted IR value came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    #[serde(rename = "type")]
    pub kind: SourceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl Source {
    pub fn baseline() -> Self {
        Self {
            kind: SourceKind::Baseline,
            section: None,
            line: None,
        }
    }

    pub fn plan(section: SectionKind, line: usize) -> Self {
        Self {
            kind: SourceKind::Plan,
            section: Some(section.title().to_string()),
            line: Some(line),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Traced<T> {
    pub value: T,
    pub source: Source,
}

impl<T> Traced<T> {
    pub fn new(value: T, source: &Source) -> Self {
        Self {
            value,
            source: source.clone(),
        }
    }
}

/// Provenance report: the IR with every scalar wrapped as `{value, source}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainReport {
    pub version: Traced<String>,
    pub system_role: Traced<String>,
    pub rules: Vec<ExplainRule>,
    pub input_schema: ExplainSchema,
    pub output_schema: ExplainSchema,
    pub failure_modes: Vec<ExplainFailureMode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainRule {
    pub id: Traced<String>,
    pub description: Traced<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Traced<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainFailureMode {
    pub id: Traced<String>,
    pub condition: Traced<String>,
    pub response: Traced<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainSchema {
    #[serde(rename = "type")]
    pub kind: Traced<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, ExplainProperty>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<Traced<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<ExplainSchema>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainProperty {
    #[serde(rename = "type")]
    pub kind: Traced<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Traced<String>>,
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub allowed: Vec<Traced<serde_json::Value>>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, ExplainProperty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<ExplainSchema>>,
}

/// Contents of `promptforge.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Artifact locations, relative to the project directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    pub plan: String,
    pub ir: String,
    pub schema: String,
    pub explain: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            plan: format!("{PLAN_DIR}/{PLAN_FILE}"),
            ir: IR_FILE.to_string(),
            schema: SCHEMA_FILE.to_string(),
            explain: EXPLAIN_FILE.to_string(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct InitReport {
    pub plan: String,
    pub template: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct CompileReport {
    pub plan: String,
    pub ir: String,
    pub schema: String,
    pub explain: Option<String>,
    pub version: String,
    pub rules: usize,
    pub failure_modes: usize,
}

#[derive(Serialize, Debug)]
pub struct LintReport {
    pub plan: String,
    pub errors: usize,
    pub warnings: usize,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Serialize, Debug)]
pub struct AuditReport {
    pub overall: String,
    pub issues: Vec<AuditIssue>,
}

#[derive(Serialize, Debug)]
pub struct MigrateReport {
    pub migrated: bool,
    pub from_version: String,
    pub to_version: String,
    pub ir: String,
    pub schema: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dropped_keys: Vec<String>,
}

#[derive(Serialize, Clone, Debug)]
pub struct TemplateInfo {
    pub name: String,
    pub description: String,
}
