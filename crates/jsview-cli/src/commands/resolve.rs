//! Print the raw schema a reference points at.

use std::process::ExitCode;

use jsview_schema::{InternalLookup, Lookup, Reference, path::title_of};

use crate::args::LoaderArgs;
use crate::util::to_json;

#[derive(clap::Args)]
pub struct Args {
    /// Schema file path or URL
    pub schema: String,
    /// Reference to resolve (e.g. "#/definitions/pet")
    pub reference: String,
    /// Print only the node's display title
    #[arg(long)]
    pub title: bool,
    /// Compact JSON output
    #[arg(long)]
    pub compact: bool,
    #[command(flatten)]
    pub loader: LoaderArgs,
}

pub fn run(args: Args) -> anyhow::Result<ExitCode> {
    let config = args.loader.config()?;
    let document = args.loader.load(&config, &args.schema)?;

    let lookup = InternalLookup::new(&document);
    let reference = Reference::new(args.reference);
    if args.title {
        println!("{}", title_of(&reference, &lookup));
        return Ok(ExitCode::SUCCESS);
    }

    // Resolve first so that a non-schema target is reported as such
    lookup.resolve(&reference)?;
    let raw = lookup.resolve_raw(&reference)?;
    println!("{}", to_json(raw, args.compact)?);
    Ok(ExitCode::SUCCESS)
}
