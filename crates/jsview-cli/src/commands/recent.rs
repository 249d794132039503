//! Recently viewed schemas.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Subcommand;
use jsview_loader::RecentlyViewed;

use crate::args::{load_config, recent_store};

#[derive(clap::Args)]
pub struct Args {
    #[command(subcommand)]
    command: Option<RecentCommand>,
    /// Config file to use instead of the nearest jsview.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum RecentCommand {
    /// List recently viewed schemas, newest first (default)
    List,
    /// Forget all recently viewed schemas
    Clear,
    /// Show the store file path
    Path,
}

pub fn run(args: Args) -> anyhow::Result<ExitCode> {
    let config = load_config(args.config.as_deref())?;
    let store = recent_store(&config);

    match args.command.unwrap_or(RecentCommand::List) {
        RecentCommand::List => {
            let links = store.links();
            if links.is_empty() {
                eprintln!("No recently viewed schemas.");
            }
            for link in links {
                println!("{}\t{}", link.title, link.url);
            }
        }
        RecentCommand::Clear => {
            store.clear()?;
            eprintln!("Cleared {}", store.path().display());
        }
        RecentCommand::Path => println!("{}", store.path().display()),
    }
    Ok(ExitCode::SUCCESS)
}
