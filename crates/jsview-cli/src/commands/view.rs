//! Show one location of a schema: breadcrumbs, example and side navigation.

use std::process::ExitCode;

use jsview_schema::{Reference, SchemaNode, SchemaView, link_to};
use tracing::debug;

use crate::args::{LoaderArgs, ViewerArgs};
use crate::util::{EXIT_PARTIAL, print_generation_errors, to_json};

#[derive(clap::Args)]
pub struct Args {
    /// Schema file path or URL
    pub schema: String,
    /// References to navigate through, outermost first (e.g. "#/definitions/pet")
    pub references: Vec<String>,
    /// Raw viewer location to open instead of building one from references
    #[arg(long, conflicts_with = "references")]
    pub location: Option<String>,
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
    let options = args.viewer.view_options(&config);
    let document = args.loader.load(&config, &args.schema)?;

    let location = match args.location {
        Some(location) => location,
        None => {
            let mut references: Vec<Reference> =
                args.references.iter().map(|r| Reference::new(r.as_str())).collect();
            if references.is_empty() {
                references.push(Reference::root());
            }
            link_to(&options.base_prefix, &references)
        }
    };
    debug!("navigating to {location}");
    let view = SchemaView::build(&document, &location, &options)?;

    let crumbs: Vec<&str> = view.trail.iter().map(|e| e.title.as_str()).collect();
    println!("{}", crumbs.join(" > "));
    if let Some(SchemaNode::Object(schema)) = &view.selected
        && let Some(description) = &schema.description
    {
        println!("\n{description}");
    }

    println!();
    match &view.example.value {
        Some(value) => println!("{}", to_json(value, args.compact)?),
        None => println!("<no example>"),
    }

    let mut section = None;
    for link in &view.links {
        if section != Some(link.section) {
            section = Some(link.section);
            println!("\n{}:", link.section.keyword());
        }
        println!(
            "  {:<24} {}",
            link.title,
            link_to(&options.base_prefix, std::slice::from_ref(&link.reference))
        );
    }

    if view.example.is_complete() {
        Ok(ExitCode::SUCCESS)
    } else {
        print_generation_errors(&view.example.errors);
        Ok(ExitCode::from(EXIT_PARTIAL))
    }
}
