//! Print an example value for a schema node.

use std::process::ExitCode;

use jsview_schema::{InternalLookup, Reference, generate_partial_at};

use crate::args::{LoaderArgs, ViewerArgs};
use crate::util::{EXIT_PARTIAL, print_generation_errors, to_json};

#[derive(clap::Args)]
pub struct Args {
    /// Schema file path or URL
    pub schema: String,
    /// Reference of the node to generate for
    #[arg(default_value = "#")]
    pub reference: String,
    /// Compact JSON output
    #[arg(long)]
    pub compact: bool,
    #[command(flatten)]
    pub viewer: ViewerArgs,
    #[command(flatten)]
    pub loader: LoaderArgs,
}

pub fn run(args: Args) -> anyhow::Result<ExitCode> {
    let config = args.loader.config()?;
    let stage = args.viewer.view_options(&config).stage;
    let document = args.loader.load(&config, &args.schema)?;

    let lookup = InternalLookup::new(&document);
    let example = generate_partial_at(&Reference::new(args.reference), &lookup, stage);
    if let Some(value) = &example.value {
        println!("{}", to_json(value, args.compact)?);
    }

    if example.is_complete() {
        Ok(ExitCode::SUCCESS)
    } else {
        print_generation_errors(&example.errors);
        Ok(ExitCode::from(EXIT_PARTIAL))
    }
}
