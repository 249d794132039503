//! Reference resolution.
//!
//! The engine depends on the [`Lookup`] trait. [`InternalLookup`] walks the
//! raw document of a single [`Document`] and hands every reference that does
//! not start with `#` to an [`ExternalResolver`]. Only [`Unresolvable`] is
//! provided, so cross-document references never resolve.

use serde_json::Value;

use crate::document::Document;
use crate::node::SchemaNode;
use crate::pointer::{Reference, array_index};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("Reference {0} does not exist in the document")]
    NotFound(Reference),

    #[error("Reference {0} does not point at a schema")]
    NotASchema(Reference),

    #[error("Reference {0} points outside the document and cannot be resolved")]
    External(Reference),
}

impl LookupError {
    pub fn reference(&self) -> &Reference {
        match self {
            LookupError::NotFound(r) | LookupError::NotASchema(r) | LookupError::External(r) => r,
        }
    }
}

pub trait Lookup: Send + Sync {
    fn resolve(&self, reference: &Reference) -> Result<SchemaNode, LookupError>;
}

/// Resolution of references into other documents.
pub trait ExternalResolver: Send + Sync {
    fn resolve_external(&self, reference: &Reference) -> Result<SchemaNode, LookupError>;
}

/// External resolver that resolves nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unresolvable;

impl ExternalResolver for Unresolvable {
    fn resolve_external(&self, reference: &Reference) -> Result<SchemaNode, LookupError> {
        Err(LookupError::External(reference.clone()))
    }
}

/// Lookup over one document.
#[derive(Debug, Clone)]
pub struct InternalLookup<'doc, X = Unresolvable> {
    document: &'doc Document,
    external: X,
}

impl<'doc> InternalLookup<'doc> {
    pub fn new(document: &'doc Document) -> Self {
        InternalLookup {
            document,
            external: Unresolvable,
        }
    }
}

impl<'doc, X: ExternalResolver> InternalLookup<'doc, X> {
    pub fn with_external(document: &'doc Document, external: X) -> Self {
        InternalLookup { document, external }
    }

    pub fn document(&self) -> &'doc Document {
        self.document
    }

    /// The raw value a `#`-rooted reference points at.
    pub fn resolve_raw(&self, reference: &Reference) -> Result<&'doc Value, LookupError> {
        if !reference.is_internal() {
            return Err(LookupError::External(reference.clone()));
        }
        let tokens = reference
            .tokens()
            .ok_or_else(|| LookupError::NotFound(reference.clone()))?;

        let mut current = self.document.raw();
        for token in &tokens {
            current = match current {
                Value::Object(map) => map.get(token.as_str()),
                Value::Array(list) => array_index(token).and_then(|i| list.get(i)),
                _ => None,
            }
            .ok_or_else(|| LookupError::NotFound(reference.clone()))?;
        }
        Ok(current)
    }
}

impl<X: ExternalResolver> Lookup for InternalLookup<'_, X> {
    fn resolve(&self, reference: &Reference) -> Result<SchemaNode, LookupError> {
        if !reference.is_internal() {
            return self.external.resolve_external(reference);
        }
        if reference.is_root() {
            return Ok(self.document.root().clone());
        }
        let raw = self.resolve_raw(reference)?;
        SchemaNode::from_value(raw).ok_or_else(|| LookupError::NotASchema(reference.clone()))
    }
}
