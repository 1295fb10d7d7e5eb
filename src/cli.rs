use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "promptforge",
    version,
    about = "Compile plan documents into machine-enforceable prompt contracts"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        default_value = ".",
        help = "Project directory containing promptforge/plan.md"
    )]
    pub project_dir: PathBuf,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scaffold promptforge/plan.md
    Init {
        /// Goal description written into the plan
        description: Vec<String>,
        #[arg(long, help = "Start from a built-in template (see `templates`)")]
        template: Option<String>,
    },
    /// Compile the plan into prompt.ir.json and its schema
    Compile {
        #[arg(long, help = "Also write prompt.ir.explain.json")]
        explain: bool,
    },
    /// Check the plan for structural problems and weak wording
    Lint,
    /// List built-in plan templates
    Templates,
    /// Upgrade prompt.ir.json to the current IR version
    Migrate,
    /// Check prompt.ir.json validity, version and schema freshness
    Audit,
}
