use crate::cli::{Cli, Commands};
use promptforge::domain::models::TemplateInfo;
use promptforge::services::output::{print_one, print_out};
use promptforge::services::storage::{compile_project, init_project, ProjectPaths};
use promptforge::services::templates;

pub fn handle_authoring_commands(cli: &Cli) -> anyhow::Result<bool> {
    match &cli.command {
        Commands::Init {
            description,
            template,
        } => {
            let paths = ProjectPaths::resolve(&cli.project_dir)?;
            let description = description.join(" ");
            let description = Some(description.as_str()).filter(|d| !d.trim().is_empty());
            let report = init_project(&paths, description, template.as_deref())?;
            print_one(cli.json, true, report, |r| match &r.template {
                Some(t) => format!("created {} from template {t}", r.plan),
                None => format!("created {}", r.plan),
            })?;
        }
        Commands::Compile { explain } => {
            let paths = ProjectPaths::resolve(&cli.project_dir)?;
            let report = compile_project(&paths, *explain)?;
            print_one(cli.json, true, report, |r| {
                let mut line = format!(
                    "compiled {} -> {} (version {}, {} rules, {} failure modes); schema {}",
                    r.plan, r.ir, r.version, r.rules, r.failure_modes, r.schema
                );
                if let Some(explain) = &r.explain {
                    line.push_str(&format!("; explain {explain}"));
                }
                line
            })?;
        }
        Commands::Templates => {
            let items: Vec<TemplateInfo> = templates::list().iter().map(|t| t.info()).collect();
            print_out(cli.json, &items, |t| format!("{} - {}", t.name, t.description))?;
        }
        _ => return Ok(false),
    }
    Ok(true)
}
