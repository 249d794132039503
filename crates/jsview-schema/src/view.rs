//! Everything a front end needs to show one navigation location.

use crate::document::Document;
use crate::example::{GenerationResult, PartialExample, generate_partial_at};
use crate::lookup::InternalLookup;
use crate::node::SchemaNode;
use crate::path::{NavigationError, PathElement, navigate};
use crate::side_nav::{Link, extract_links};
use crate::stage::Stage;

/// Settings fixed for a viewer instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewOptions {
    /// Location segments the viewer is mounted under
    pub base_prefix: Vec<String>,
    pub stage: Stage,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            base_prefix: vec!["view".to_string()],
            stage: Stage::Both,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SchemaView {
    pub trail: Vec<PathElement>,
    pub selected: Option<SchemaNode>,
    pub example: PartialExample,
    pub links: Vec<Link>,
}

impl SchemaView {
    pub fn build(
        document: &Document,
        location: &str,
        options: &ViewOptions,
    ) -> Result<SchemaView, NavigationError> {
        let lookup = InternalLookup::new(document);
        let navigation = navigate(location, &options.base_prefix, &lookup)?;
        let example = generate_partial_at(&navigation.current().reference, &lookup, options.stage);

        Ok(SchemaView {
            trail: navigation.trail,
            selected: navigation.selected,
            example,
            links: extract_links(document),
        })
    }

    /// The example as a value-or-errors result.
    pub fn example_result(&self) -> GenerationResult {
        self.example.clone().into_result()
    }
}
