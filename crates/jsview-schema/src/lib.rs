//! JSON Schema browsing engine.
//!
//! This crate resolves `#`-rooted references inside a single schema document,
//! turns navigation locations into breadcrumb trails, and synthesizes example
//! values for schema nodes. Everything here is synchronous and works on an
//! immutable [`Document`].

pub mod document;
pub mod example;
pub mod lookup;
pub mod node;
pub mod path;
pub mod pointer;
pub mod side_nav;
pub mod stage;
pub mod view;

pub use document::{Document, DocumentError};
pub use example::{
    GenerationError, GenerationErrorKind, GenerationResult, PartialExample, generate, generate_at,
    generate_partial, generate_partial_at,
};
pub use lookup::{ExternalResolver, InternalLookup, Lookup, LookupError, Unresolvable};
pub use node::{Items, ObjectSchema, SchemaNode, SchemaType};
pub use path::{Navigation, NavigationError, PathElement, link_to, navigate, resolve_path};
pub use pointer::Reference;
pub use side_nav::{Link, LinkSection, extract_links};
pub use stage::Stage;
pub use view::{SchemaView, ViewOptions};
