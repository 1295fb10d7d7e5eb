use crate::cli::{Cli, Commands};
use promptforge::domain::models::{LintReport, Severity};
use promptforge::services::audit::{audit_project, report};
use promptforge::services::linter::{count, lint_plan};
use promptforge::services::migrate::migrate_project;
use promptforge::services::output::print_one;
use promptforge::services::storage::{read_plan, ProjectPaths};

pub fn handle_maintenance_commands(cli: &Cli) -> anyhow::Result<bool> {
    match &cli.command {
        Commands::Lint => {
            let paths = ProjectPaths::resolve(&cli.project_dir)?;
            let source = read_plan(&paths.plan)?;
            let diagnostics = lint_plan(&source);
            let report = LintReport {
                plan: paths.show(&paths.plan),
                errors: count(&diagnostics, Severity::Error),
                warnings: count(&diagnostics, Severity::Warn),
                diagnostics,
            };
            let failed = report.errors > 0;
            print_one(cli.json, !failed, report, |r| {
                if r.diagnostics.is_empty() {
                    return format!("{}: no issues found", r.plan);
                }
                r.diagnostics
                    .iter()
                    .map(|d| {
                        format!(
                            "{}:{}:{}: {} {} {}",
                            r.plan, d.line, d.column, d.severity, d.code, d.message
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            })?;
            if failed {
                std::process::exit(1);
            }
        }
        Commands::Audit => {
            let paths = ProjectPaths::resolve(&cli.project_dir)?;
            let report = report(audit_project(&paths)?);
            let failed = report.overall == "error";
            print_one(cli.json, !failed, report, |r| {
                if r.issues.is_empty() {
                    return "audit passed: no issues".to_string();
                }
                r.issues
                    .iter()
                    .map(|i| format!("{}: {}", i.severity, i.message))
                    .collect::<Vec<_>>()
                    .join("\n")
            })?;
            if failed {
                std::process::exit(1);
            }
        }
        Commands::Migrate => {
            let paths = ProjectPaths::resolve(&cli.project_dir)?;
            let report = migrate_project(&paths)?;
            print_one(cli.json, true, report, |r| {
                if r.migrated {
                    let mut line = format!(
                        "migrated {} from version {:?} to {}; schema {} refreshed",
                        r.ir, r.from_version, r.to_version, r.schema
                    );
                    if !r.dropped_keys.is_empty() {
                        line.push_str(&format!("; dropped {}", r.dropped_keys.join(", ")));
                    }
                    line
                } else {
                    format!(
                        "{} already at version {}; schema {} refreshed",
                        r.ir, r.to_version, r.schema
                    )
                }
            })?;
        }
        _ => return Ok(false),
    }
    Ok(true)
}
