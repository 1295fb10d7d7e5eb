use crate::domain::constants::CURRENT_IR_VERSION;
use crate::domain::models::{MigrateReport, PromptIR};
use crate::error::{Result, VersionError};
use crate::services::storage::{read_ir, read_ir_value, write_ir, write_schema, ProjectPaths};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionState {
    /// No version field, or the pre-release `"0"` marker.
    Unversioned,
    Current,
    Unsupported(String),
}

impl VersionState {
    pub fn of(version: &str) -> Self {
        match version {
            "" | "0" => VersionState::Unversioned,
            v if v == CURRENT_IR_VERSION => VersionState::Current,
            other => VersionState::Unsupported(other.to_string()),
        }
    }
}

type Step = fn(&mut PromptIR);

/// Ordered `(from_version, step)` pairs. Each step must leave the IR at a
/// later version than it found it.
const MIGRATIONS: &[(&str, Step)] = &[("", stamp_current), ("0", stamp_current)];

fn stamp_current(ir: &mut PromptIR) {
    ir.version = CURRENT_IR_VERSION.to_string();
}

/// Bring `ir` up to the current version in place. Returns whether anything
/// changed; on error `ir` is left untouched.
pub fn migrate_to_current(ir: &mut PromptIR) -> Result<bool, VersionError> {
    if let VersionState::Unsupported(found) = VersionState::of(&ir.version) {
        return Err(VersionError::Unsupported {
            found,
            current: CURRENT_IR_VERSION.to_string(),
        });
    }
    let mut migrated = false;
    while ir.version != CURRENT_IR_VERSION {
        let Some((_, step)) = MIGRATIONS.iter().find(|(from, _)| *from == ir.version) else {
            return Err(VersionError::Unsupported {
                found: ir.version.clone(),
                current: CURRENT_IR_VERSION.to_string(),
            });
        };
        tracing::debug!(from = %ir.version, "applying IR migration step");
        step(ir);
        migrated = true;
    }
    Ok(migrated)
}

/// Dotted paths of keys in `raw` that do not survive a round trip through
/// the IR model. Null and empty values carry nothing and are not reported.
pub fn unknown_keys(raw: &Value, ir: &PromptIR) -> Vec<String> {
    let kept = serde_json::to_value(ir).unwrap_or(Value::Null);
    let mut out = Vec::new();
    collect_unknown(raw, &kept, "", &mut out);
    out
}

fn collect_unknown(raw: &Value, kept: &Value, at: &str, out: &mut Vec<String>) {
    match (raw, kept) {
        (Value::Object(raw), Value::Object(kept)) => {
            for (key, value) in raw {
                let path = if at.is_empty() {
                    key.clone()
                } else {
                    format!("{at}.{key}")
                };
                match kept.get(key) {
                    Some(k) => collect_unknown(value, k, &path, out),
                    None if is_blank(value) => {}
                    None => out.push(path),
                }
            }
        }
        (Value::Array(raw), Value::Array(kept)) => {
            for (i, (r, k)) in raw.iter().zip(kept).enumerate() {
                collect_unknown(r, k, &format!("{at}[{i}]"), out);
            }
        }
        _ => {}
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(m) => m.is_empty(),
        Value::Array(a) => a.is_empty(),
        _ => false,
    }
}

/// Upgrade the project's IR on disk and refresh the schema artifact.
/// An unsupported version fails before any file is touched.
pub fn migrate_project(paths: &ProjectPaths) -> Result<MigrateReport> {
    let mut ir = read_ir(&paths.ir)?;
    let from_version = ir.version.clone();
    let dropped_keys = unknown_keys(&read_ir_value(&paths.ir)?, &ir);
    let migrated = migrate_to_current(&mut ir)?;
    if migrated {
        for key in &dropped_keys {
            tracing::warn!(key = %key, "dropping key not in the IR format");
        }
        write_ir(&ir, &paths.ir)?;
    }
    write_schema(&paths.schema)?;
    tracing::info!(from = %from_version, to = %ir.version, migrated, "migration finished");
    Ok(MigrateReport {
        migrated,
        from_version,
        to_version: ir.version,
        ir: paths.show(&paths.ir),
        schema: paths.show(&paths.schema),
        dropped_keys: if migrated { dropped_keys } else { Vec::new() },
    })
}
