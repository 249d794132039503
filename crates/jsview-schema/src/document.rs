use serde_json::Value;

use crate::node::SchemaNode;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DocumentError {
    #[error("Document root is not a schema: expected a boolean or an object, found {0}")]
    NotASchema(&'static str),
}

/// A loaded schema document.
///
/// Immutable once built; a reload produces a new `Document`.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: SchemaNode,
    raw: Value,
}

impl Document {
    pub fn from_value(raw: Value) -> Result<Self, DocumentError> {
        let root = SchemaNode::from_value(&raw).ok_or(DocumentError::NotASchema(kind(&raw)))?;
        Ok(Document { root, raw })
    }

    pub fn root(&self) -> &SchemaNode {
        &self.root
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn title(&self) -> Option<&str> {
        self.root.title()
    }

    /// The root `$id`, if any.
    pub fn id(&self) -> Option<&str> {
        self.root.as_object().and_then(|o| o.id.as_deref())
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
