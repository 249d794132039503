//! Link list for the side navigation.

use serde_json::Value;

use crate::document::Document;
use crate::node::SchemaNode;
use crate::pointer::Reference;

/// Keyword a link was found under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkSection {
    Properties,
    Definitions,
    Defs,
}

impl LinkSection {
    pub const ALL: [LinkSection; 3] = [
        LinkSection::Properties,
        LinkSection::Definitions,
        LinkSection::Defs,
    ];

    pub fn keyword(&self) -> &'static str {
        match self {
            LinkSection::Properties => "properties",
            LinkSection::Definitions => "definitions",
            LinkSection::Defs => "$defs",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub section: LinkSection,
    pub title: String,
    pub reference: Reference,
}

/// Links to the root's properties and definitions, in document order.
///
/// Entries that are not schemas are skipped. The title is the entry's own
/// `title`, falling back to its key.
pub fn extract_links(document: &Document) -> Vec<Link> {
    let Value::Object(root) = document.raw() else {
        return Vec::new();
    };

    let mut links = Vec::new();
    for section in LinkSection::ALL {
        let Some(Value::Object(entries)) = root.get(section.keyword()) else {
            continue;
        };
        let base = Reference::root().child(section.keyword());
        for (key, value) in entries {
            let Some(node) = SchemaNode::from_value(value) else {
                continue;
            };
            links.push(Link {
                section,
                title: node.title().unwrap_or(key).to_string(),
                reference: base.child(key),
            });
        }
    }
    links
}
