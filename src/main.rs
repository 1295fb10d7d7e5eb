use clap::Parser;
use promptforge::services::output::error_json;
use promptforge::ForgeError;
use std::env;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::Cli;
use commands::{handle_authoring_commands, handle_maintenance_commands};

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

/// Logs go to stderr so `--json` output on stdout stays parseable.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("PROMPTFORGE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    if env_bool("PROMPTFORGE_LOG_JSON", false) {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer.with_target(false))
            .init();
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    if handle_authoring_commands(cli)? {
        return Ok(());
    }
    handle_maintenance_commands(cli)?;
    Ok(())
}

fn error_code(err: &anyhow::Error) -> &'static str {
    err.downcast_ref::<ForgeError>()
        .map(ForgeError::code)
        .unwrap_or("INTERNAL")
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    tracing::debug!(command = ?cli.command, project = %cli.project_dir.display(), "starting");

    if let Err(err) = run(&cli) {
        if cli.json {
            println!("{}", error_json(error_code(&err), &err.to_string()));
        } else {
            eprintln!("error: {err}");
        }
        std::process::exit(1);
    }
}
