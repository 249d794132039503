//! JSON Schema node representation.
//!
//! A [`SchemaNode`] is built from a raw `serde_json::Value` leniently: keywords
//! with an unexpected JSON shape are skipped instead of failing the whole node,
//! because pointers may address keyword containers such as `#/properties`
//! whose members happen to be named like keywords.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Primitive type tags accepted by the `type` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
}

impl SchemaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::String => "string",
            SchemaType::Number => "number",
            SchemaType::Integer => "integer",
            SchemaType::Boolean => "boolean",
            SchemaType::Array => "array",
            SchemaType::Object => "object",
            SchemaType::Null => "null",
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(SchemaType::String),
            "number" => Ok(SchemaType::Number),
            "integer" => Ok(SchemaType::Integer),
            "boolean" => Ok(SchemaType::Boolean),
            "array" => Ok(SchemaType::Array),
            "object" => Ok(SchemaType::Object),
            "null" => Ok(SchemaType::Null),
            _ => Err(()),
        }
    }
}

/// A parsed schema fragment.
#[derive(Debug, Clone, PartialEq)]
#[allow(clippy::large_enum_variant)]
pub enum SchemaNode {
    /// Boolean schema (true = allow all, false = deny all)
    Boolean(bool),

    /// Keyword schema
    Object(ObjectSchema),
}

/// Form of the `items` keyword.
#[derive(Debug, Clone, PartialEq)]
pub enum Items {
    /// Every element matches the same schema
    Single(Box<SchemaNode>),
    /// Draft-04 positional form
    Tuple(Vec<SchemaNode>),
}

/// Schema with keywords.
///
/// Only the keywords the viewer reads are kept. When `reference` is set the
/// remaining fields are informational; resolution follows the reference.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectSchema {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub types: Vec<SchemaType>,
    pub properties: IndexMap<String, SchemaNode>,
    pub required: Vec<String>,
    pub items: Option<Items>,
    pub reference: Option<String>,
    pub all_of: Vec<SchemaNode>,
    pub any_of: Vec<SchemaNode>,
    pub one_of: Vec<SchemaNode>,
    pub read_only: bool,
    pub write_only: bool,
    /// Entries of both `definitions` and `$defs`, in document order
    pub definitions: IndexMap<String, SchemaNode>,
    pub const_value: Option<Value>,
    pub default: Option<Value>,
    pub enum_values: Vec<Value>,
    pub examples: Vec<Value>,
}

impl SchemaNode {
    /// Build a node from a raw value.
    ///
    /// Returns `None` when the value is neither a boolean nor an object.
    pub fn from_value(value: &Value) -> Option<SchemaNode> {
        match value {
            Value::Bool(b) => Some(SchemaNode::Boolean(*b)),
            Value::Object(map) => Some(SchemaNode::Object(ObjectSchema::from_map(map))),
            _ => None,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            SchemaNode::Boolean(_) => None,
            SchemaNode::Object(o) => o.title.as_deref(),
        }
    }

    pub fn reference(&self) -> Option<&str> {
        match self {
            SchemaNode::Boolean(_) => None,
            SchemaNode::Object(o) => o.reference.as_deref(),
        }
    }

    pub fn as_object(&self) -> Option<&ObjectSchema> {
        match self {
            SchemaNode::Boolean(_) => None,
            SchemaNode::Object(o) => Some(o),
        }
    }

    /// `true` schema: matches anything.
    pub fn is_anything(&self) -> bool {
        matches!(self, SchemaNode::Boolean(true))
    }
}

impl ObjectSchema {
    fn from_map(map: &Map<String, Value>) -> ObjectSchema {
        let mut definitions = node_map(map.get("definitions"));
        definitions.extend(node_map(map.get("$defs")));

        ObjectSchema {
            id: string(map.get("$id")),
            title: string(map.get("title")),
            description: string(map.get("description")),
            types: types(map.get("type")),
            properties: node_map(map.get("properties")),
            required: map
                .get("required")
                .and_then(Value::as_array)
                .map(|names| {
                    names
                        .iter()
                        .filter_map(Value::as_str)
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
            items: match map.get("items") {
                Some(Value::Array(items)) => Some(Items::Tuple(
                    items.iter().filter_map(SchemaNode::from_value).collect(),
                )),
                Some(item) => SchemaNode::from_value(item).map(|n| Items::Single(Box::new(n))),
                None => None,
            },
            reference: string(map.get("$ref")),
            all_of: node_list(map.get("allOf")),
            any_of: node_list(map.get("anyOf")),
            one_of: node_list(map.get("oneOf")),
            read_only: flag(map.get("readOnly")),
            write_only: flag(map.get("writeOnly")),
            definitions,
            const_value: map.get("const").cloned(),
            default: map.get("default").cloned(),
            enum_values: map
                .get("enum")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
            examples: map
                .get("examples")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
        }
    }

    /// Whether the node has keywords that shape the generated value.
    pub fn has_structure(&self) -> bool {
        !self.properties.is_empty()
            || self.items.is_some()
            || !self.all_of.is_empty()
            || !self.any_of.is_empty()
            || !self.one_of.is_empty()
    }

    /// First recognised `type`.
    pub fn primary_type(&self) -> Option<SchemaType> {
        self.types.first().copied()
    }
}

fn string(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(String::from)
}

fn flag(value: Option<&Value>) -> bool {
    value.and_then(Value::as_bool).unwrap_or(false)
}

fn types(value: Option<&Value>) -> Vec<SchemaType> {
    match value {
        Some(Value::String(s)) => s.parse::<SchemaType>().into_iter().collect(),
        Some(Value::Array(list)) => list
            .iter()
            .filter_map(Value::as_str)
            .filter_map(|s| s.parse().ok())
            .collect(),
        _ => Vec::new(),
    }
}

fn node_map(value: Option<&Value>) -> IndexMap<String, SchemaNode> {
    let Some(Value::Object(map)) = value else {
        return IndexMap::new();
    };
    map.iter()
        .filter_map(|(k, v)| SchemaNode::from_value(v).map(|n| (k.clone(), n)))
        .collect()
}

fn node_list(value: Option<&Value>) -> Vec<SchemaNode> {
    let Some(Value::Array(list)) = value else {
        return Vec::new();
    };
    list.iter().filter_map(SchemaNode::from_value).collect()
}
