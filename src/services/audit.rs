use crate::domain::constants::CURRENT_IR_VERSION;
use crate::domain::models::{AuditIssue, AuditReport, Severity};
use crate::error::{ForgeError, Result};
use crate::services::schema::schema_text;
use crate::services::storage::{read_ir, ProjectPaths};
use crate::services::validate::validate_ir;
use sha2::{Digest, Sha256};

fn fingerprint(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

fn issue(severity: Severity, message: String) -> AuditIssue {
    AuditIssue { severity, message }
}

/// Read-only health check of the persisted IR and schema artifact.
///
/// An IR that cannot be read or parsed is an error; everything past that
/// point is reported as issues.
pub fn audit_project(paths: &ProjectPaths) -> Result<Vec<AuditIssue>> {
    let ir = read_ir(&paths.ir)?;
    let mut issues = Vec::new();

    if let Err(e) = validate_ir(Some(&ir)) {
        issues.push(issue(Severity::Error, format!("IR validation failed: {e}")));
    }

    if ir.version != CURRENT_IR_VERSION {
        issues.push(issue(
            Severity::Error,
            format!(
                "IR version {} does not match current {CURRENT_IR_VERSION}. Run 'promptforge migrate'.",
                ir.version
            ),
        ));
    }

    let schema_name = paths.show(&paths.schema);
    match std::fs::read(&paths.schema) {
        Ok(on_disk) => {
            let expected = schema_text();
            if on_disk != expected.as_bytes() {
                issues.push(issue(
                    Severity::Warn,
                    format!(
                        "{schema_name} does not match the current schema (sha256 {} on disk, {} expected). Run 'promptforge compile' to refresh.",
                        fingerprint(&on_disk),
                        fingerprint(expected.as_bytes()),
                    ),
                ));
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            issues.push(issue(Severity::Warn, format!("{schema_name} is missing")));
        }
        Err(e) => return Err(ForgeError::io("read", &paths.schema, e)),
    }

    for i in &issues {
        tracing::warn!(severity = %i.severity, "{}", i.message);
    }
    Ok(issues)
}

pub fn overall(issues: &[AuditIssue]) -> &'static str {
    if issues.iter().any(|i| i.severity == Severity::Error) {
        "error"
    } else if issues.is_empty() {
        "ok"
    } else {
        "warn"
    }
}

pub fn report(issues: Vec<AuditIssue>) -> AuditReport {
    AuditReport {
        overall: overall(&issues).to_string(),
        issues,
    }
}
