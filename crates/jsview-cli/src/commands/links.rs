//! List the side navigation links of a schema.

use std::process::ExitCode;

use jsview_schema::{extract_links, link_to};

use crate::args::{LoaderArgs, ViewerArgs};

#[derive(clap::Args)]
pub struct Args {
    /// Schema file path or URL
    pub schema: String,
    #[command(flatten)]
    pub viewer: ViewerArgs,
    #[command(flatten)]
    pub loader: LoaderArgs,
}

pub fn run(args: Args) -> anyhow::Result<ExitCode> {
    let config = args.loader.config()?;
    let options = args.viewer.view_options(&config);
    let document = args.loader.load(&config, &args.schema)?;

    for link in extract_links(&document) {
        println!(
            "{}\t{}\t{}",
            link.section.keyword(),
            link.title,
            link_to(&options.base_prefix, std::slice::from_ref(&link.reference))
        );
    }
    Ok(ExitCode::SUCCESS)
}
