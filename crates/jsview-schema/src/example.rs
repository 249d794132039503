//! Example value synthesis.
//!
//! The generator walks a schema node and produces one representative JSON
//! value. Errors never stop the walk: they are recorded with the example path
//! they occurred at and generation continues with the siblings.
//!
//! Policies:
//! - `allOf` branches are merged left to right, later keys win.
//! - `anyOf`/`oneOf` use the first branch that generates without errors.
//! - `const`, `default`, the first of `examples` and the first of `enum` are
//!   used as-is, in that order, before any structural keyword.
//! - Arrays get a single representative element.

use std::fmt;

use serde_json::{Map, Value};

use crate::lookup::{Lookup, LookupError};
use crate::node::{Items, ObjectSchema, SchemaNode, SchemaType};
use crate::pointer::{Reference, escape_token};
use crate::stage::Stage;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationErrorKind {
    #[error("{0}")]
    ReferenceNotFound(LookupError),

    #[error("Schema `false` cannot be satisfied")]
    UnsatisfiableSchema,

    #[error("Cyclic reference: it is already being expanded")]
    CyclicReference,
}

/// One failure inside a generated example.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at {} (reference {reference})", display_path(.path))]
pub struct GenerationError {
    /// Reference being expanded where the failure happened
    pub reference: Reference,
    /// JSON Pointer into the generated value, empty for the top level
    pub path: String,
    pub kind: GenerationErrorKind,
}

fn display_path(path: &str) -> &str {
    if path.is_empty() { "/" } else { path }
}

/// Outcome of [`generate`]: a value or the errors, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationResult {
    Value(Value),
    Errors(Vec<GenerationError>),
}

impl GenerationResult {
    pub fn value(&self) -> Option<&Value> {
        match self {
            GenerationResult::Value(v) => Some(v),
            GenerationResult::Errors(_) => None,
        }
    }

    pub fn errors(&self) -> &[GenerationError] {
        match self {
            GenerationResult::Value(_) => &[],
            GenerationResult::Errors(errors) => errors,
        }
    }

    pub fn is_errors(&self) -> bool {
        matches!(self, GenerationResult::Errors(_))
    }
}

/// Best-effort example: failed subtrees are left out of `value`.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialExample {
    /// `None` when nothing at all could be generated
    pub value: Option<Value>,
    pub errors: Vec<GenerationError>,
}

impl PartialExample {
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_result(self) -> GenerationResult {
        if self.errors.is_empty() {
            GenerationResult::Value(self.value.unwrap_or_else(anything))
        } else {
            GenerationResult::Errors(self.errors)
        }
    }
}

impl fmt::Display for PartialExample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{value}")?,
            None => f.write_str("<no example>")?,
        }
        for error in &self.errors {
            write!(f, "\n{error}")?;
        }
        Ok(())
    }
}

/// Generate an example for `node`.
pub fn generate(node: &SchemaNode, lookup: &impl Lookup, stage: Stage) -> GenerationResult {
    generate_partial(node, lookup, stage).into_result()
}

/// Generate an example for the node at `reference`, treating the reference
/// as already being expanded.
pub fn generate_at(reference: &Reference, lookup: &impl Lookup, stage: Stage) -> GenerationResult {
    generate_partial_at(reference, lookup, stage).into_result()
}

pub fn generate_partial(node: &SchemaNode, lookup: &impl Lookup, stage: Stage) -> PartialExample {
    let mut generator = Generator::new(lookup, stage);
    let value = generator.node(node);
    generator.state.finish(value)
}

pub fn generate_partial_at(
    reference: &Reference,
    lookup: &impl Lookup,
    stage: Stage,
) -> PartialExample {
    let mut generator = Generator::new(lookup, stage);
    let value = generator.reference(reference.clone());
    generator.state.finish(value)
}

fn anything() -> Value {
    Value::Object(Map::new())
}

// =============================================================================
// GenerationState
// =============================================================================

#[derive(Debug, Default)]
struct GenerationState {
    /// Escaped tokens of the current example path
    path: Vec<String>,
    /// References on the current expansion path
    expanding: Vec<Reference>,
    errors: Vec<GenerationError>,
}

impl GenerationState {
    fn push_path(&mut self, token: &str) {
        self.path.push(escape_token(token));
    }

    fn pop_path(&mut self) {
        self.path.pop();
    }

    fn pointer(&self) -> String {
        self.path.iter().map(|t| format!("/{t}")).collect()
    }

    fn record(&mut self, reference: Option<Reference>, kind: GenerationErrorKind) {
        let reference = reference
            .or_else(|| self.expanding.last().cloned())
            .unwrap_or_else(Reference::root);
        self.errors.push(GenerationError {
            reference,
            path: self.pointer(),
            kind,
        });
    }

    fn finish(self, value: Option<Value>) -> PartialExample {
        PartialExample {
            value,
            errors: self.errors,
        }
    }
}

// =============================================================================
// Generator
// =============================================================================

struct Generator<'l, L: ?Sized> {
    lookup: &'l L,
    stage: Stage,
    state: GenerationState,
}

impl<'l, L: Lookup + ?Sized> Generator<'l, L> {
    fn new(lookup: &'l L, stage: Stage) -> Self {
        Generator {
            lookup,
            stage,
            state: GenerationState::default(),
        }
    }

    fn node(&mut self, node: &SchemaNode) -> Option<Value> {
        match node {
            SchemaNode::Boolean(true) => Some(anything()),
            SchemaNode::Boolean(false) => {
                self.state
                    .record(None, GenerationErrorKind::UnsatisfiableSchema);
                None
            }
            SchemaNode::Object(o) => match &o.reference {
                Some(reference) => self.reference(Reference::new(reference.as_str())),
                None => self.object(o),
            },
        }
    }

    fn reference(&mut self, reference: Reference) -> Option<Value> {
        if self.state.expanding.contains(&reference) {
            self.state
                .record(Some(reference), GenerationErrorKind::CyclicReference);
            return None;
        }
        match self.lookup.resolve(&reference) {
            Ok(resolved) => {
                self.state.expanding.push(reference);
                let value = self.node(&resolved);
                self.state.expanding.pop();
                value
            }
            Err(e) => {
                self.state
                    .record(Some(reference), GenerationErrorKind::ReferenceNotFound(e));
                None
            }
        }
    }

    fn object(&mut self, o: &ObjectSchema) -> Option<Value> {
        if let Some(literal) = literal(o) {
            return Some(self.staged_literal(o, literal));
        }
        if !o.has_structure() {
            return Some(trivial(o.primary_type()));
        }

        let mut value = None;
        if !o.properties.is_empty() {
            value = Some(self.properties(o));
        } else if let Some(items) = &o.items {
            value = Some(self.items(items));
        } else if o.primary_type().is_some() {
            // Combinator branches refine the declared type
            value = Some(trivial(o.primary_type()));
        }
        for branch in &o.all_of {
            if let Some(part) = self.node(branch) {
                value = Some(merge(value, part));
            }
        }
        for branches in [&o.any_of, &o.one_of] {
            if branches.is_empty() {
                continue;
            }
            if let Some(part) = self.first_success(branches) {
                value = Some(merge(value, part));
            }
        }
        value
    }

    fn properties(&mut self, o: &ObjectSchema) -> Value {
        let mut map = Map::new();
        for (name, property) in &o.properties {
            if !self.visible(property) {
                continue;
            }
            self.state.push_path(name);
            if let Some(value) = self.node(property) {
                map.insert(name.clone(), value);
            }
            self.state.pop_path();
        }
        Value::Object(map)
    }

    /// A mapping literal loses the keys of properties the stage excludes.
    fn staged_literal(&self, o: &ObjectSchema, literal: &Value) -> Value {
        match literal {
            Value::Object(map) if !o.properties.is_empty() => Value::Object(
                map.iter()
                    .filter(|(key, _)| {
                        o.properties
                            .get(key.as_str())
                            .is_none_or(|property| self.visible(property))
                    })
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect(),
            ),
            _ => literal.clone(),
        }
    }

    /// Stage filter for a property, looking through a direct `$ref`.
    fn visible(&self, property: &SchemaNode) -> bool {
        let Some(o) = property.as_object() else {
            return true;
        };
        if !self.stage.includes(o.read_only, o.write_only) {
            return false;
        }
        match &o.reference {
            Some(reference) => match self.lookup.resolve(&Reference::new(reference.as_str())) {
                Ok(SchemaNode::Object(target)) => {
                    self.stage.includes(target.read_only, target.write_only)
                }
                _ => true,
            },
            None => true,
        }
    }

    fn items(&mut self, items: &Items) -> Value {
        let schemas: Vec<&SchemaNode> = match items {
            Items::Single(item) => vec![item.as_ref()],
            Items::Tuple(list) => list.iter().collect(),
        };
        let mut array = Vec::with_capacity(schemas.len());
        for (index, schema) in schemas.into_iter().enumerate() {
            self.state.push_path(&index.to_string());
            if let Some(value) = self.node(schema) {
                array.push(value);
            }
            self.state.pop_path();
        }
        Value::Array(array)
    }

    /// First branch generating without errors. Errors of the branches tried
    /// before it are dropped; if every branch fails, all errors are kept and
    /// the first partial value is returned.
    fn first_success(&mut self, branches: &[SchemaNode]) -> Option<Value> {
        let checkpoint = self.state.errors.len();
        let mut fallback = None;
        for branch in branches {
            let before = self.state.errors.len();
            let value = self.node(branch);
            let clean = self.state.errors.len() == before;
            match value {
                Some(value) if clean => {
                    self.state.errors.drain(checkpoint..before);
                    return Some(value);
                }
                Some(value) => {
                    fallback.get_or_insert(value);
                }
                None => {}
            }
        }
        fallback
    }
}

fn literal(o: &ObjectSchema) -> Option<&Value> {
    o.const_value
        .as_ref()
        .or(o.default.as_ref())
        .or(o.examples.first())
        .or(o.enum_values.first())
}

fn trivial(ty: Option<SchemaType>) -> Value {
    match ty {
        Some(SchemaType::String) => Value::String(String::new()),
        Some(SchemaType::Number) | Some(SchemaType::Integer) => Value::from(0),
        Some(SchemaType::Boolean) => Value::Bool(false),
        Some(SchemaType::Array) => Value::Array(Vec::new()),
        Some(SchemaType::Null) => Value::Null,
        Some(SchemaType::Object) | None => anything(),
    }
}

/// Mappings are merged with later keys winning. Otherwise the later value
/// replaces the earlier one, except that an empty mapping never replaces a
/// non-mapping.
fn merge(acc: Option<Value>, next: Value) -> Value {
    match (acc, next) {
        (None, next) => next,
        (Some(Value::Object(mut acc)), Value::Object(next)) => {
            acc.extend(next);
            Value::Object(acc)
        }
        (Some(acc), Value::Object(next)) if next.is_empty() => acc,
        (Some(_), next) => next,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::lookup::InternalLookup;
    use serde_json::json;

    fn run(schema: Value, stage: Stage) -> GenerationResult {
        let doc = Document::from_value(schema).unwrap();
        let lookup = InternalLookup::new(&doc);
        generate(doc.root(), &lookup, stage)
    }

    fn partial(schema: Value) -> PartialExample {
        let doc = Document::from_value(schema).unwrap();
        let lookup = InternalLookup::new(&doc);
        generate_partial(doc.root(), &lookup, Stage::Both)
    }

    fn value(schema: Value) -> Value {
        match run(schema, Stage::Both) {
            GenerationResult::Value(v) => v,
            GenerationResult::Errors(e) => panic!("Expected value, got errors: {:?}", e),
        }
    }

    #[test]
    fn test_boolean_schemas() {
        assert_eq!(value(json!(true)), json!({}));
        let result = run(json!(false), Stage::Both);
        assert_eq!(result.errors().len(), 1);
        assert_eq!(
            result.errors()[0].kind,
            GenerationErrorKind::UnsatisfiableSchema
        );
    }

    #[test]
    fn test_trivial_types() {
        assert_eq!(value(json!({"type": "string"})), json!(""));
        assert_eq!(value(json!({"type": "number"})), json!(0));
        assert_eq!(value(json!({"type": "integer"})), json!(0));
        assert_eq!(value(json!({"type": "boolean"})), json!(false));
        assert_eq!(value(json!({"type": "array"})), json!([]));
        assert_eq!(value(json!({"type": "object"})), json!({}));
        assert_eq!(value(json!({"type": "null"})), json!(null));
        assert_eq!(value(json!({"title": "untyped"})), json!({}));
        assert_eq!(value(json!({"type": ["integer", "null"]})), json!(0));
    }

    #[test]
    fn test_literal_hints() {
        assert_eq!(value(json!({"type": "string", "const": "fixed"})), json!("fixed"));
        assert_eq!(value(json!({"type": "integer", "default": 8080})), json!(8080));
        assert_eq!(value(json!({"examples": ["a", "b"]})), json!("a"));
        assert_eq!(value(json!({"enum": ["red", "green"]})), json!("red"));
        assert_eq!(
            value(json!({"const": 1, "default": 2, "examples": [3], "enum": [4]})),
            json!(1)
        );
    }

    #[test]
    fn test_properties_in_declaration_order() {
        let v = value(json!({
            "properties": {
                "zeta": {"type": "string"},
                "alpha": {"type": "number"},
                "nested": {"properties": {"flag": {"type": "boolean"}}}
            }
        }));
        assert_eq!(v, json!({"zeta": "", "alpha": 0, "nested": {"flag": false}}));
        let keys: Vec<&String> = v.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "nested"]);
    }

    #[test]
    fn test_stage_filters_read_and_write_only() {
        let schema = json!({
            "properties": {
                "id": {"type": "integer", "readOnly": true},
                "password": {"type": "string", "writeOnly": true},
                "name": {"type": "string"}
            }
        });
        assert_eq!(
            run(schema.clone(), Stage::Request),
            GenerationResult::Value(json!({"password": "", "name": ""}))
        );
        assert_eq!(
            run(schema.clone(), Stage::Response),
            GenerationResult::Value(json!({"id": 0, "name": ""}))
        );
        assert_eq!(
            run(schema, Stage::Both),
            GenerationResult::Value(json!({"id": 0, "password": "", "name": ""}))
        );
    }

    #[test]
    fn test_stage_filter_looks_through_reference() {
        let schema = json!({
            "properties": {"id": {"$ref": "#/definitions/id"}},
            "definitions": {"id": {"type": "string", "readOnly": true}}
        });
        assert_eq!(
            run(schema.clone(), Stage::Request),
            GenerationResult::Value(json!({}))
        );
        assert_eq!(
            run(schema, Stage::Response),
            GenerationResult::Value(json!({"id": ""}))
        );
    }

    #[test]
    fn test_items() {
        assert_eq!(
            value(json!({"type": "array", "items": {"type": "string"}})),
            json!([""])
        );
        assert_eq!(
            value(json!({"items": [{"type": "string"}, {"type": "number"}]})),
            json!(["", 0])
        );
    }

    #[test]
    fn test_reference_resolution() {
        let v = value(json!({
            "properties": {"pet": {"$ref": "#/definitions/pet", "type": "string"}},
            "definitions": {"pet": {"properties": {"name": {"type": "string"}}}}
        }));
        // Siblings of $ref are ignored
        assert_eq!(v, json!({"pet": {"name": ""}}));
    }

    #[test]
    fn test_missing_reference() {
        let result = run(
            json!({"properties": {"a": {"$ref": "#/definitions/missing"}}}),
            Stage::Both,
        );
        let errors = result.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].reference.as_str(), "#/definitions/missing");
        assert_eq!(errors[0].path, "/a");
        assert!(matches!(
            errors[0].kind,
            GenerationErrorKind::ReferenceNotFound(LookupError::NotFound(_))
        ));
    }

    #[test]
    fn test_external_reference_is_an_error() {
        let result = run(json!({"$ref": "https://example.com/schema.json"}), Stage::Both);
        assert!(matches!(
            result.errors()[0].kind,
            GenerationErrorKind::ReferenceNotFound(LookupError::External(_))
        ));
    }

    #[test]
    fn test_cycle_through_root() {
        let result = run(
            json!({"$ref": "#/$defs/a", "$defs": {"a": {"$ref": "#"}}}),
            Stage::Both,
        );
        let errors = result.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, GenerationErrorKind::CyclicReference);
        assert_eq!(errors[0].reference.as_str(), "#/$defs/a");
    }

    #[test]
    fn test_self_cycle() {
        let result = run(
            json!({"$ref": "#/$defs/a", "$defs": {"a": {"$ref": "#/$defs/a"}}}),
            Stage::Both,
        );
        assert_eq!(
            result.errors()[0].kind,
            GenerationErrorKind::CyclicReference
        );
    }

    #[test]
    fn test_recursive_property_is_cut_but_siblings_survive() {
        let p = partial(json!({
            "$ref": "#/definitions/node",
            "definitions": {
                "node": {
                    "properties": {
                        "name": {"type": "string"},
                        "child": {"$ref": "#/definitions/node"}
                    }
                }
            }
        }));
        assert_eq!(p.value, Some(json!({"name": ""})));
        assert_eq!(p.errors.len(), 1);
        assert_eq!(p.errors[0].path, "/child");
        assert_eq!(p.errors[0].kind, GenerationErrorKind::CyclicReference);
    }

    #[test]
    fn test_shared_reference_is_not_a_cycle() {
        let v = value(json!({
            "properties": {
                "home": {"$ref": "#/definitions/address"},
                "work": {"$ref": "#/definitions/address"}
            },
            "definitions": {"address": {"properties": {"street": {"type": "string"}}}}
        }));
        assert_eq!(v, json!({"home": {"street": ""}, "work": {"street": ""}}));
    }

    #[test]
    fn test_all_of_merges_last_wins() {
        let v = value(json!({
            "allOf": [
                {"properties": {"a": {"type": "string"}, "b": {"type": "string"}}},
                {"properties": {"b": {"type": "number"}, "c": {"type": "boolean"}}}
            ]
        }));
        assert_eq!(v, json!({"a": "", "b": 0, "c": false}));
    }

    #[test]
    fn test_all_of_aggregates_errors() {
        let result = run(
            json!({"allOf": [false, {"$ref": "#/nope"}, {"type": "object"}]}),
            Stage::Both,
        );
        let kinds: Vec<&GenerationErrorKind> = result.errors().iter().map(|e| &e.kind).collect();
        assert_eq!(kinds.len(), 2);
        assert_eq!(kinds[0], &GenerationErrorKind::UnsatisfiableSchema);
        assert!(matches!(kinds[1], GenerationErrorKind::ReferenceNotFound(_)));
    }

    #[test]
    fn test_any_of_falls_through() {
        assert_eq!(
            run(json!({"anyOf": [false, {"type": "number"}]}), Stage::Both),
            GenerationResult::Value(json!(0))
        );
        assert_eq!(
            value(json!({"oneOf": [{"type": "string"}, {"type": "number"}]})),
            json!("")
        );
    }

    #[test]
    fn test_any_of_skips_branch_with_inner_errors() {
        assert_eq!(
            value(json!({"anyOf": [{"properties": {"a": false}}, {"type": "boolean"}]})),
            json!(false)
        );
    }

    #[test]
    fn test_any_of_all_failing() {
        let result = run(json!({"oneOf": [false, {"$ref": "#/x"}]}), Stage::Both);
        assert_eq!(result.errors().len(), 2);
    }

    #[test]
    fn test_properties_with_all_of() {
        let v = value(json!({
            "properties": {"id": {"type": "integer"}},
            "allOf": [{"properties": {"name": {"type": "string"}}}]
        }));
        assert_eq!(v, json!({"id": 0, "name": ""}));
    }

    #[test]
    fn test_empty_mapping_does_not_replace_scalar() {
        assert_eq!(value(json!({"allOf": [{"type": "string"}, {"minLength": 1}]})), json!(""));
    }

    #[test]
    fn test_declared_type_seeds_combinators() {
        assert_eq!(
            value(json!({"type": "string", "oneOf": [{"format": "date"}, {"format": "time"}]})),
            json!("")
        );
        assert_eq!(
            value(json!({"type": "integer", "anyOf": [{"minimum": 1}]})),
            json!(0)
        );
        assert_eq!(
            value(json!({"type": "string", "anyOf": [{"const": "on"}]})),
            json!("on")
        );
    }

    #[test]
    fn test_literal_respects_stage() {
        let schema = json!({
            "properties": {
                "o": {
                    "default": {"id": 1, "name": "rex", "extra": true},
                    "properties": {
                        "id": {"type": "integer", "readOnly": true},
                        "name": {"type": "string"},
                        "secret": {"type": "string", "writeOnly": true}
                    }
                }
            }
        });
        assert_eq!(
            run(schema.clone(), Stage::Request),
            GenerationResult::Value(json!({"o": {"name": "rex", "extra": true}}))
        );
        assert_eq!(
            run(schema, Stage::Response),
            GenerationResult::Value(json!({"o": {"id": 1, "name": "rex", "extra": true}}))
        );
        assert_eq!(
            run(json!({"const": {"id": 1}}), Stage::Request),
            GenerationResult::Value(json!({"id": 1}))
        );
    }

    #[test]
    fn test_partial_example() {
        let p = partial(json!({
            "properties": {
                "ok": {"type": "string"},
                "bad": false,
                "list": {"items": {"$ref": "#/missing"}}
            }
        }));
        assert_eq!(p.value, Some(json!({"ok": "", "list": []})));
        let paths: Vec<&str> = p.errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["/bad", "/list/0"]);
        assert!(!p.is_complete());
        assert!(p.into_result().is_errors());
    }

    #[test]
    fn test_error_path_is_escaped() {
        let p = partial(json!({"properties": {"a/b": false}}));
        assert_eq!(p.errors[0].path, "/a~1b");
    }

    #[test]
    fn test_error_display() {
        let p = partial(json!({"properties": {"x": false}}));
        assert_eq!(
            p.errors[0].to_string(),
            "Schema `false` cannot be satisfied at /x (reference #)"
        );
    }

    #[test]
    fn test_generate_at_seeds_expansion() {
        let doc = Document::from_value(json!({
            "definitions": {"loop": {"properties": {"again": {"$ref": "#/definitions/loop"}}}}
        }))
        .unwrap();
        let lookup = InternalLookup::new(&doc);
        let p = generate_partial_at(&Reference::new("#/definitions/loop"), &lookup, Stage::Both);
        assert_eq!(p.value, Some(json!({})));
        assert_eq!(p.errors[0].path, "/again");

        let result = generate_at(&Reference::new("#/definitions/none"), &lookup, Stage::Both);
        assert!(result.is_errors());
    }
}
