use crate::domain::models::{CompileReport, ExplainReport, InitReport, ProjectConfig, PromptIR};
use crate::error::{ForgeError, Result};
use crate::services::config::load_config;
use crate::services::validate::validate_ir;
use crate::services::{compiler, schema, templates};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub plan: PathBuf,
    pub ir: PathBuf,
    pub schema: PathBuf,
    pub explain: PathBuf,
}

impl ProjectPaths {
    pub fn resolve(project_dir: &Path) -> Result<Self> {
        if !project_dir.is_dir() {
            return Err(ForgeError::ProjectMissing(project_dir.to_path_buf()));
        }
        let config = load_config(project_dir)?;
        Ok(Self::with_config(project_dir, &config))
    }

    pub fn with_config(root: &Path, config: &ProjectConfig) -> Self {
        let p = &config.paths;
        Self {
            root: root.to_path_buf(),
            plan: root.join(&p.plan),
            ir: root.join(&p.ir),
            schema: root.join(&p.schema),
            explain: root.join(&p.explain),
        }
    }

    /// Path as shown to the operator: relative to the project root when possible.
    pub fn show(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

fn write_text(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ForgeError::io("create", parent, e))?;
    }
    std::fs::write(path, text).map_err(|e| ForgeError::io("write", path, e))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut text = serde_json::to_string_pretty(value).map_err(|source| ForgeError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    text.push('\n');
    write_text(path, &text)
}

/// Read the plan as text. Invalid UTF-8 is replaced rather than rejected.
pub fn read_plan(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(ForgeError::PlanMissing(path.to_path_buf()));
    }
    let bytes = std::fs::read(path).map_err(|e| ForgeError::io("read", path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path).map_err(|e| ForgeError::io("read", path, e))?;
    serde_json::from_str(&raw).map_err(|source| ForgeError::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_ir(path: &Path) -> Result<PromptIR> {
    read_json(path)
}

pub fn read_ir_value(path: &Path) -> Result<serde_json::Value> {
    read_json(path)
}

/// Persist an IR. Refuses to write anything that fails validation.
pub fn write_ir(ir: &PromptIR, path: &Path) -> Result<()> {
    validate_ir(Some(ir))?;
    write_json(path, ir)?;
    tracing::info!(path = %path.display(), version = %ir.version, "wrote prompt IR");
    Ok(())
}

pub fn write_schema(path: &Path) -> Result<()> {
    write_text(path, &schema::schema_text())?;
    tracing::info!(path = %path.display(), "wrote IR schema");
    Ok(())
}

pub fn write_explain(report: &ExplainReport, path: &Path) -> Result<()> {
    write_json(path, report)?;
    tracing::info!(path = %path.display(), "wrote explain report");
    Ok(())
}

/// Scaffold the plan document. Never overwrites an existing plan.
pub fn init_project(
    paths: &ProjectPaths,
    description: Option<&str>,
    template: Option<&str>,
) -> Result<InitReport> {
    if paths.plan.exists() {
        return Err(ForgeError::PlanExists(paths.plan.clone()));
    }
    let plan = templates::render_plan(template, description)?;
    write_text(&paths.plan, &plan)?;
    tracing::info!(path = %paths.plan.display(), template = ?template, "initialised plan");
    Ok(InitReport {
        plan: paths.show(&paths.plan),
        template: template.map(str::to_string),
    })
}

/// Compile the plan and write the IR, the schema artifact and optionally the
/// explain report. Nothing is written when compilation fails.
pub fn compile_project(paths: &ProjectPaths, explain: bool) -> Result<CompileReport> {
    let source = read_plan(&paths.plan)?;
    let (ir, report) = if explain {
        let (ir, report) = compiler::compile_with_explain(&source)?;
        (ir, Some(report))
    } else {
        (compiler::compile(&source)?, None)
    };

    write_ir(&ir, &paths.ir)?;
    write_schema(&paths.schema)?;
    if let Some(report) = &report {
        write_explain(report, &paths.explain)?;
    }

    Ok(CompileReport {
        plan: paths.show(&paths.plan),
        ir: paths.show(&paths.ir),
        schema: paths.show(&paths.schema),
        explain: report.map(|_| paths.show(&paths.explain)),
        version: ir.version.clone(),
        rules: ir.rules.len(),
        failure_modes: ir.failure_modes.len(),
    })
}
