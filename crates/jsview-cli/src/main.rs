mod args;
mod commands;
mod util;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jsview", version, about = "Browse JSON Schema and OpenAPI schema documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show breadcrumbs, an example and the side navigation for a location
    View(commands::view::Args),
    /// Print an example value for a schema node
    Example(commands::example::Args),
    /// Print the raw schema a reference points at
    Resolve(commands::resolve::Args),
    /// List the root's properties and definitions
    Links(commands::links::Args),
    /// Manage the recently viewed list
    Recent(commands::recent::Args),
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("JSVIEW_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::View(args) => commands::view::run(args),
        Commands::Example(args) => commands::example::run(args),
        Commands::Resolve(args) => commands::resolve::run(args),
        Commands::Links(args) => commands::links::run(args),
        Commands::Recent(args) => commands::recent::run(args),
    }
}
