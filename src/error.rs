use std::path::PathBuf;

/// The plan document is missing something compilation cannot do without.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    #[error("plan content is empty")]
    EmptyDocument,
    #[error("Goal section is required but not found. Expected: ## Goal")]
    MissingGoal,
    #[error("Goal section is empty at line {line}. Please provide a goal description")]
    EmptyGoal { line: usize },
}

/// A produced or loaded IR breaks a structural invariant.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("prompt IR is missing")]
    Absent,
    #[error("system_role is required and cannot be empty")]
    EmptySystemRole,
    #[error("rules array cannot be empty")]
    EmptyRules,
    #[error("rules[{index}].id is required and cannot be empty")]
    RuleMissingId { index: usize },
    #[error("rules[{index}].description is required and cannot be empty")]
    RuleMissingDescription { index: usize },
    #[error("input_schema.type is required and cannot be empty")]
    EmptyInputSchemaType,
    #[error("output_schema.type is required and cannot be empty")]
    EmptyOutputSchemaType,
    #[error("failure_modes array cannot be empty")]
    EmptyFailureModes,
    #[error("failure_modes[{index}].id is required and cannot be empty")]
    FailureModeMissingId { index: usize },
    #[error("failure_modes[{index}].condition is required and cannot be empty")]
    FailureModeMissingCondition { index: usize },
    #[error("failure_modes[{index}].response is required and cannot be empty")]
    FailureModeMissingResponse { index: usize },
    #[error("rules[{index}].id duplicates an earlier rule: {id}")]
    DuplicateRuleId { index: usize, id: String },
    #[error("failure_modes[{index}].id duplicates an earlier failure mode: {id}")]
    DuplicateFailureModeId { index: usize, id: String },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("unsupported IR version: {found} (this compiler writes version {current})")]
    Unsupported { found: String, current: String },
}

#[derive(thiserror::Error, Debug)]
pub enum ForgeError {
    #[error("failed to parse plan: {0}")]
    Structural(#[from] StructuralError),
    #[error("IR validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Version(#[from] VersionError),
    #[error("cannot {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("plan already exists at {}", .0.display())]
    PlanExists(PathBuf),
    #[error("plan not found at {}. Run 'promptforge init' first", .0.display())]
    PlanMissing(PathBuf),
    #[error("project directory does not exist: {}", .0.display())]
    ProjectMissing(PathBuf),
    #[error("unknown template: {0}")]
    UnknownTemplate(String),
}

impl ForgeError {
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ForgeError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Stable machine-readable code used in `--json` error output.
    pub fn code(&self) -> &'static str {
        match self {
            ForgeError::Structural(_) => "STRUCTURAL",
            ForgeError::Validation(_) => "VALIDATION",
            ForgeError::Version(_) => "VERSION",
            ForgeError::Io { .. } => "IO",
            ForgeError::Json { .. } => "PARSE",
            ForgeError::Config { .. } => "CONFIG",
            ForgeError::PlanExists(_) => "PLAN_EXISTS",
            ForgeError::PlanMissing(_) => "PLAN_MISSING",
            ForgeError::ProjectMissing(_) => "PROJECT_MISSING",
            ForgeError::UnknownTemplate(_) => "UNKNOWN_TEMPLATE",
        }
    }
}

pub type Result<T, E = ForgeError> = std::result::Result<T, E>;
