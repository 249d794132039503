//! Navigation locations to breadcrumb trails.
//!
//! A location looks like `/view/%23%2Fdefinitions%2Fuser/%23%2Fdefinitions%2Faddress`:
//! the viewer's base prefix followed by one percent-encoded reference per
//! navigation step.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::lookup::Lookup;
use crate::node::SchemaNode;
use crate::pointer::Reference;

pub const NOT_FOUND_TITLE: &str = "<not found>";
pub const ANYTHING_TITLE: &str = "<anything>";
pub const NOTHING_TITLE: &str = "<nothing>";
pub const DEFAULT_TITLE: &str = "object";

/// Characters escaped in a location segment (same set as `encodeURIComponent`).
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// One breadcrumb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathElement {
    pub title: String,
    pub reference: Reference,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("Could not work out what to load from the schema")]
    NoNavigationTarget,
}

/// Result of navigating to a location.
#[derive(Debug, Clone, PartialEq)]
pub struct Navigation {
    pub trail: Vec<PathElement>,
    /// Node of the last breadcrumb, `None` when it does not resolve
    pub selected: Option<SchemaNode>,
}

impl Navigation {
    pub fn current(&self) -> &PathElement {
        // `navigate` never builds an empty trail
        &self.trail[self.trail.len() - 1]
    }
}

/// Split a location into raw segments after removing one leading `/`.
pub fn split_location(location: &str) -> Vec<String> {
    let location = location.strip_prefix('/').unwrap_or(location);
    location.split('/').map(String::from).collect()
}

/// Display title for a reference.
pub fn title_of(reference: &Reference, lookup: &impl Lookup) -> String {
    match lookup.resolve(reference) {
        Err(_) => NOT_FOUND_TITLE.to_string(),
        Ok(SchemaNode::Boolean(true)) => ANYTHING_TITLE.to_string(),
        Ok(SchemaNode::Boolean(false)) => NOTHING_TITLE.to_string(),
        Ok(SchemaNode::Object(o)) => o.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
    }
}

/// Turn raw location segments into a breadcrumb trail.
///
/// Segments shared with `base_prefix` are skipped. A segment that is not a
/// `#` reference becomes the invalid-reference sentinel so it shows up as a
/// broken breadcrumb.
pub fn resolve_path<S, B>(
    raw_segments: &[S],
    base_prefix: &[B],
    lookup: &impl Lookup,
) -> Result<Vec<PathElement>, NavigationError>
where
    S: AsRef<str>,
    B: AsRef<str>,
{
    if raw_segments.is_empty() {
        return Err(NavigationError::NoNavigationTarget);
    }

    let shared = raw_segments
        .iter()
        .zip(base_prefix)
        .take_while(|&(segment, base)| segment.as_ref() == base.as_ref())
        .count();

    if shared == raw_segments.len() {
        let reference = Reference::root();
        let title = title_of(&reference, lookup);
        return Ok(vec![PathElement { title, reference }]);
    }

    let trail: Vec<PathElement> = raw_segments[shared..]
        .iter()
        .map(|segment| {
            let reference = classify(segment.as_ref());
            let title = title_of(&reference, lookup);
            PathElement { title, reference }
        })
        .collect();

    if trail.is_empty() {
        return Err(NavigationError::NoNavigationTarget);
    }
    Ok(trail)
}

/// Resolve a full location to its trail and selected node.
pub fn navigate<B: AsRef<str>>(
    location: &str,
    base_prefix: &[B],
    lookup: &impl Lookup,
) -> Result<Navigation, NavigationError> {
    let trail = resolve_path(&split_location(location), base_prefix, lookup)?;
    let selected = trail
        .last()
        .and_then(|element| lookup.resolve(&element.reference).ok());
    Ok(Navigation { trail, selected })
}

/// Build the location for a sequence of references below `base_prefix`.
pub fn link_to<B: AsRef<str>>(base_prefix: &[B], references: &[Reference]) -> String {
    let mut location = String::new();
    for base in base_prefix {
        location.push('/');
        location.push_str(base.as_ref());
    }
    for reference in references {
        location.push('/');
        location.extend(utf8_percent_encode(reference.as_str(), SEGMENT));
    }
    if location.is_empty() {
        location.push('/');
    }
    location
}

fn classify(segment: &str) -> Reference {
    match percent_decode_str(segment).decode_utf8() {
        Ok(decoded) if decoded.starts_with('#') => Reference::new(decoded.into_owned()),
        _ => Reference::invalid(),
    }
}
